//! Regmap Core - a register-mapped device model
//!
//! This crate provides [EmbeddedDevice], a named device living at a base address
//! whose register file is simulated by a map from [RegisterKey] to 16-bit values.
//!
//! ```rust
//! use regmap_core::{DeviceError, EmbeddedDevice, Reporting};
//!
//! let mut device = EmbeddedDevice::with_address("Device_0", 0x1000);
//! device.set_reporting(Reporting::Silent);
//!
//! // New devices start disabled and refuse writes
//! assert!(matches!(device.write_register(0x00, 0x1234), Err(DeviceError::NotEnabled { .. })));
//!
//! device.enable();
//! let write = device.write_register(0x00, 0x1234).unwrap();
//! assert_eq!(write.to_string(), "Write 0x1234 to Device_0@0x00001000");
//! assert_eq!(device.read_register(0x00), 0x1234);
//! ```
//!
//! # Reporting
//!
//! Every successful write is reported as a single line. Where that line goes is
//! controlled by [Reporting]: standard output (the default), a `tracing` event, or
//! nowhere. The compiled default is picked by the `report-*` features, see
//! [Reporting::from_features].

pub mod device;
pub mod key;
pub mod reporting;
pub mod snapshot;

pub use device::{EmbeddedDevice, RegisterWrite, DEFAULT_BASE_ADDRESS, REGISTER_MASK};
pub use key::RegisterKey;
pub use reporting::Reporting;
pub use snapshot::DeviceSnapshot;

/// Errors thrown by an [EmbeddedDevice].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeviceError {
	#[error("Device not enabled")]
	NotEnabled { name: String },
}
