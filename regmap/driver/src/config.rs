use clap::Parser;
use regmap_core::{Reporting, DEFAULT_BASE_ADDRESS};

/// Configuration for a driver run.
///
/// Every field has a default, so running with no arguments creates three
/// enabled devices and writes `0x1234` to register `0x00` of each.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "regmap", version, about = "Exercise register reads and writes on simulated devices")]
pub struct DriverConfig {
	/// Number of devices to create, named `Device_<index>`
	#[arg(long, env = "REGMAP_COUNT", default_value_t = 3)]
	pub count: usize,

	/// Base address of the first device
	#[arg(long, env = "REGMAP_BASE", default_value = "0x1000", value_parser = parse_u32)]
	pub base: u32,

	/// Distance between the base addresses of consecutive devices
	#[arg(long, env = "REGMAP_STRIDE", default_value = "0x100", value_parser = parse_u32)]
	pub stride: u32,

	/// Leave the device with this index disabled (repeatable)
	#[arg(long = "disable", value_name = "INDEX")]
	pub disabled: Vec<usize>,

	/// Register offset to write and read back
	#[arg(long, default_value = "0x00", value_parser = parse_u32)]
	pub offset: u32,

	/// Value to write; only the low 16 bits are stored. Pass negative hex as `--value=-0x10`
	#[arg(long, default_value = "0x1234", value_parser = parse_i64, allow_negative_numbers = true)]
	pub value: i64,

	/// Where write lines go: stdout, log or silent
	#[arg(long, env = "REGMAP_REPORTING", default_value_t = Reporting::from_features())]
	pub reporting: Reporting,

	/// Print a JSON snapshot of every device after the run
	#[arg(long)]
	pub dump: bool,
}

impl DriverConfig {
	/// Whether the device at `index` should be enabled
	pub fn is_enabled(&self, index: usize) -> bool {
		!self.disabled.contains(&index)
	}
}

impl Default for DriverConfig {
	fn default() -> Self {
		Self {
			count: 3,
			base: DEFAULT_BASE_ADDRESS,
			stride: 0x100,
			disabled: Vec::new(),
			offset: 0x00,
			value: 0x1234,
			reporting: Reporting::from_features(),
			dump: false,
		}
	}
}

/// Splits an optional `0x` prefix off, returning the digits and their radix
fn split_radix(s: &str) -> (&str, u32) {
	match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
		Some(hex) => (hex, 16),
		None => (s, 10),
	}
}

/// Parses a decimal or `0x`-prefixed hexadecimal integer
fn parse_u32(s: &str) -> Result<u32, String> {
	let (digits, radix) = split_radix(s);
	if digits.starts_with(['+', '-']) {
		return Err(format!("Invalid integer '{}': unexpected sign", s));
	}
	u32::from_str_radix(digits, radix).map_err(|e| format!("Invalid integer '{}': {}", s, e))
}

/// Like [parse_u32], but accepts a single leading `-`
fn parse_i64(s: &str) -> Result<i64, String> {
	let (negative, unsigned) = match s.strip_prefix('-') {
		Some(rest) => (true, rest),
		None => (false, s),
	};
	let (digits, radix) = split_radix(unsigned);
	if digits.starts_with(['+', '-']) {
		return Err(format!("Invalid integer '{}': unexpected sign", s));
	}

	let magnitude = i128::from_str_radix(digits, radix)
		.map_err(|e| format!("Invalid integer '{}': {}", s, e))?;
	let value = if negative { -magnitude } else { magnitude };
	i64::try_from(value).map_err(|_| format!("Invalid integer '{}': out of range for i64", s))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_no_arguments_matches_default() {
		let config = DriverConfig::try_parse_from(["regmap"]).unwrap();
		assert_eq!(config, DriverConfig::default());
	}

	#[test]
	fn test_parse_flags() {
		let config = DriverConfig::try_parse_from([
			"regmap",
			"--count",
			"2",
			"--base",
			"0x4000",
			"--stride",
			"16",
			"--disable",
			"1",
			"--offset",
			"0x0c",
			"--value",
			"-1",
			"--reporting",
			"silent",
			"--dump",
		])
		.unwrap();

		assert_eq!(config.count, 2);
		assert_eq!(config.base, 0x4000);
		assert_eq!(config.stride, 16);
		assert_eq!(config.disabled, vec![1]);
		assert_eq!(config.offset, 0x0c);
		assert_eq!(config.value, -1);
		assert_eq!(config.reporting, Reporting::Silent);
		assert!(config.dump);
		assert!(config.is_enabled(0));
		assert!(!config.is_enabled(1));
	}

	#[test]
	fn test_rejects_bad_numbers() {
		assert!(DriverConfig::try_parse_from(["regmap", "--base", "0xzz"]).is_err());
		assert!(DriverConfig::try_parse_from(["regmap", "--reporting", "syslog"]).is_err());
	}

	#[test]
	fn test_parse_integers() {
		assert_eq!(parse_u32("4096").unwrap(), 0x1000);
		assert_eq!(parse_u32("0X1F").unwrap(), 0x1f);
		assert_eq!(parse_i64("-0x10").unwrap(), -16);
		assert!(parse_u32("-1").is_err());
		assert_eq!(parse_i64("-9223372036854775808").unwrap(), i64::MIN);
		assert_eq!(parse_i64("-0x8000000000000000").unwrap(), i64::MIN);
	}

	#[test]
	fn test_parse_rejects_misplaced_signs() {
		assert!(parse_u32("0x+10").is_err());
		assert!(parse_u32("+10").is_err());
		assert!(parse_i64("0x-5").is_err());
		assert!(parse_i64("--9223372036854775808").is_err());
		assert!(parse_i64("-0x-8000000000000000").is_err());
		assert!(parse_i64("-+1").is_err());
	}

	#[test]
	fn test_parse_rejects_out_of_range() {
		assert!(parse_i64("9223372036854775808").is_err());
		assert!(parse_i64("-0x8000000000000001").is_err());
		assert!(parse_u32("0x100000000").is_err());
	}

	#[test]
	fn test_value_flag_signs() {
		let config = DriverConfig::try_parse_from(["regmap", "--value=-0x10"]).unwrap();
		assert_eq!(config.value, -16);

		let config = DriverConfig::try_parse_from(["regmap", "--value", "-5"]).unwrap();
		assert_eq!(config.value, -5);

		assert!(DriverConfig::try_parse_from(["regmap", "--value=--9223372036854775808"]).is_err());
	}
}
