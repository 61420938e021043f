use crate::device::RegisterWrite;
use std::io::Write;

/// Reporting mode - determines where the line for a successful register write goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reporting {
	/// Print the write line on standard output
	Stdout,
	/// Emit the write line as a tracing event
	Log,
	/// Do not report writes
	Silent,
}

impl Reporting {
	/// Parse from string
	pub fn from_str(s: &str) -> Result<Self, String> {
		match s.to_lowercase().as_str() {
			"stdout" => Ok(Reporting::Stdout),
			"log" => Ok(Reporting::Log),
			"silent" => Ok(Reporting::Silent),
			_ => Err(format!("Invalid reporting mode: '{}'. Valid values: stdout, log, silent", s)),
		}
	}

	/// Convert to string representation
	pub fn as_str(&self) -> &'static str {
		match self {
			Reporting::Stdout => "stdout",
			Reporting::Log => "log",
			Reporting::Silent => "silent",
		}
	}

	/// Load the compiled default from feature flags
	pub fn from_features() -> Self {
		// Default is Stdout (no feature flag needed)
		#[cfg(feature = "report-log")]
		let reporting = Reporting::Log;
		#[cfg(all(feature = "report-silent", not(feature = "report-log")))]
		let reporting = Reporting::Silent;
		#[cfg(not(any(feature = "report-log", feature = "report-silent")))]
		let reporting = Reporting::Stdout;

		reporting
	}

	/// Report a write line: `Stdout` writes it to `out`, `Log` emits a tracing event
	pub fn report<W: Write>(&self, write: &RegisterWrite, out: &mut W) -> std::io::Result<()> {
		match self {
			Reporting::Stdout => writeln!(out, "{}", write),
			Reporting::Log => {
				tracing::info!("{}", write);
				Ok(())
			}
			Reporting::Silent => Ok(()),
		}
	}
}

impl Default for Reporting {
	fn default() -> Self {
		Reporting::from_features()
	}
}

impl std::str::FromStr for Reporting {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Reporting::from_str(s)
	}
}

impl std::fmt::Display for Reporting {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}
