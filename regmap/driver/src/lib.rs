//! Regmap Driver - builds a set of devices and exercises their registers
//!
//! Each device gets one write followed by a read-back of the same register.
//! A failure on one device is reported as `Error with <name>: <message>` and
//! the run moves on to the next device.

pub mod config;

pub use config::DriverConfig;

use regmap_core::{DeviceError, EmbeddedDevice, RegisterWrite, Reporting, REGISTER_MASK};
use std::io::Write;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

/// Errors thrown by the driver.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
	#[error(transparent)]
	Device(#[from] DeviceError),

	#[error("Register mismatch: {actual} != 0x{expected:04x}")]
	RegisterMismatch { expected: u16, actual: u16 },

	#[error("Base address of device {index} does not fit in 32 bits")]
	AddressOverflow { index: usize },

	#[error("Failed to write driver output: {0}")]
	Output(#[source] std::io::Error),

	#[error("Failed to serialize device snapshots: {0}")]
	Serialize(#[source] serde_json::Error),
}

/// Result of exercising a single device.
#[derive(Debug)]
pub struct DeviceOutcome {
	pub name: String,
	/// The value read back after the write
	pub result: Result<u16, DriverError>,
}

impl DeviceOutcome {
	pub fn is_ok(&self) -> bool {
		self.result.is_ok()
	}
}

/// Creates `config.count` devices named `Device_<index>`, spaced `config.stride` apart.
///
/// The devices are silent; [run] reports their writes into its own output.
pub fn build_devices(config: &DriverConfig) -> Result<Vec<EmbeddedDevice>, DriverError> {
	(0..config.count)
		.map(|index| {
			let address = u32::try_from(index)
				.ok()
				.and_then(|i| i.checked_mul(config.stride))
				.and_then(|step| config.base.checked_add(step))
				.ok_or(DriverError::AddressOverflow { index })?;

			let mut device = EmbeddedDevice::with_address(format!("Device_{}", index), address);
			device.set_reporting(Reporting::Silent);
			device.set_enabled(config.is_enabled(index));
			Ok(device)
		})
		.collect()
}

/// Writes `value` to `offset` and checks that reading it back returns the masked value.
pub fn exercise(
	device: &mut EmbeddedDevice,
	offset: u32,
	value: i64,
) -> Result<RegisterWrite, DriverError> {
	let write = device.write_register(offset, value)?;

	let expected = (value & REGISTER_MASK) as u16;
	let actual = device.read_register(offset);
	if actual != expected {
		return Err(DriverError::RegisterMismatch { expected, actual });
	}

	Ok(write)
}

/// Runs the driver, writing every console line to `out` in device order: the
/// write lines (per `config.reporting`), the error lines and the optional snapshot dump.
///
/// Per-device failures never abort the run; they are returned in the matching
/// [DeviceOutcome]. Only building the devices or writing to `out` can fail.
pub fn run<W: Write>(config: &DriverConfig, out: &mut W) -> Result<Vec<DeviceOutcome>, DriverError> {
	let mut devices = build_devices(config)?;
	let mut outcomes = Vec::with_capacity(devices.len());

	for device in devices.iter_mut() {
		let result = match exercise(device, config.offset, config.value) {
			Ok(write) => {
				config.reporting.report(&write, out).map_err(DriverError::Output)?;
				Ok(write.value)
			}
			Err(err) => {
				tracing::warn!(device = device.name(), error = %err, "device operation failed");
				writeln!(out, "Error with {}: {}", device.name(), err)
					.map_err(DriverError::Output)?;
				Err(err)
			}
		};
		outcomes.push(DeviceOutcome { name: device.name().to_string(), result });
	}

	if config.dump {
		let snapshots: Vec<_> = devices.iter().map(EmbeddedDevice::snapshot).collect();
		let json = serde_json::to_string_pretty(&snapshots).map_err(DriverError::Serialize)?;
		writeln!(out, "{}", json).map_err(DriverError::Output)?;
	}

	Ok(outcomes)
}

/// Runs the driver for the binary: console lines go to `out`, and a failure that
/// aborts the whole run is written to `err` as `Error: <message>`.
///
/// Never fails, so the process exit code stays 0. An aborted run yields no outcomes.
pub fn run_to_completion<W: Write, E: Write>(
	config: &DriverConfig,
	out: &mut W,
	err: &mut E,
) -> Vec<DeviceOutcome> {
	match run(config, out) {
		Ok(outcomes) => outcomes,
		Err(error) => {
			tracing::error!(error = %error, "driver run aborted");
			if let Err(io) = writeln!(err, "Error: {}", error) {
				tracing::error!(error = %io, "failed to report aborted run");
			}
			Vec::new()
		}
	}
}

/// Log filter for the binary: `RUST_LOG`, defaulting to WARN.
///
/// In [Reporting::Log] mode the write lines are INFO events from `regmap_core`,
/// so that target is raised to INFO.
pub fn log_filter(reporting: Reporting) -> EnvFilter {
	let mut filter = EnvFilter::builder()
		.with_default_directive(LevelFilter::WARN.into())
		.from_env_lossy();
	if reporting == Reporting::Log {
		if let Ok(directive) = "regmap_core=info".parse() {
			filter = filter.add_directive(directive);
		}
	}
	filter
}
