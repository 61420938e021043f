use crate::key::RegisterKey;
use crate::reporting::Reporting;
use crate::snapshot::DeviceSnapshot;
use crate::DeviceError;
use std::collections::BTreeMap;

/// Base address used when a device is constructed without one.
pub const DEFAULT_BASE_ADDRESS: u32 = 0x1000;

/// Registers hold 16-bit values; every write is masked with this.
pub const REGISTER_MASK: i64 = 0xFFFF;

/// Record of a successful register write.
///
/// Its [Display](std::fmt::Display) form is the line reported for the write, e.g.
/// `Write 0x1234 to Device_0@0x00001000`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterWrite {
	pub device: String,
	pub offset: u32,
	pub address: u64,
	pub value: u16,
}

impl std::fmt::Display for RegisterWrite {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Write 0x{:04x} to {}@0x{:08x}", self.value, self.device, self.address)
	}
}

/// A named, address-mapped device with a simulated register file.
///
/// Reads are always permitted. Writes require the device to be enabled, which
/// is left to the caller; a new device starts disabled.
#[derive(Debug, Clone)]
pub struct EmbeddedDevice {
	name: String,
	base_address: u32,
	registers: BTreeMap<RegisterKey, u16>,
	enabled: bool,
	reporting: Reporting,
}

impl EmbeddedDevice {
	/// Create a disabled device at [DEFAULT_BASE_ADDRESS]
	pub fn new(name: impl Into<String>) -> Self {
		Self::with_address(name, DEFAULT_BASE_ADDRESS)
	}

	/// Create a disabled device at the given base address
	pub fn with_address(name: impl Into<String>, base_address: u32) -> Self {
		Self {
			name: name.into(),
			base_address,
			registers: BTreeMap::new(),
			enabled: false,
			reporting: Reporting::default(),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn base_address(&self) -> u32 {
		self.base_address
	}

	pub fn is_enabled(&self) -> bool {
		self.enabled
	}

	pub fn set_enabled(&mut self, enabled: bool) {
		self.enabled = enabled;
	}

	pub fn enable(&mut self) {
		self.set_enabled(true);
	}

	pub fn disable(&mut self) {
		self.set_enabled(false);
	}

	pub fn reporting(&self) -> Reporting {
		self.reporting
	}

	pub fn set_reporting(&mut self, reporting: Reporting) {
		self.reporting = reporting;
	}

	/// Absolute address of a register, only used for display.
	pub fn address_of(&self, offset: u32) -> u64 {
		u64::from(self.base_address) + u64::from(offset)
	}

	/// Stored registers in key order.
	pub fn registers(&self) -> impl Iterator<Item = (&RegisterKey, u16)> {
		self.registers.iter().map(|(key, value)| (key, *value))
	}

	/// Reads a register, returning 0 for a register that was never written.
	pub fn read_register(&self, offset: u32) -> u16 {
		let key = RegisterKey::from_offset(offset);
		let value = self.registers.get(&key).copied().unwrap_or(0);
		tracing::debug!(device = %self.name, %key, value, "read register");
		value
	}

	/// Writes the low 16 bits of `value` to a register and reports the write.
	///
	/// # Errors
	///
	/// [DeviceError::NotEnabled] if the device is disabled. The register file is
	/// left untouched in that case.
	pub fn write_register(&mut self, offset: u32, value: i64) -> Result<RegisterWrite, DeviceError> {
		if !self.enabled {
			return Err(DeviceError::NotEnabled { name: self.name.clone() });
		}

		let masked = (value & REGISTER_MASK) as u16;
		let key = RegisterKey::from_offset(offset);
		tracing::debug!(device = %self.name, %key, value = masked, "write register");
		self.registers.insert(key, masked);

		let write = RegisterWrite {
			device: self.name.clone(),
			offset,
			address: self.address_of(offset),
			value: masked,
		};
		self.report(&write);
		Ok(write)
	}

	fn report(&self, write: &RegisterWrite) {
		if let Err(err) = self.reporting.report(write, &mut std::io::stdout()) {
			tracing::warn!(device = %self.name, error = %err, "failed to report register write");
		}
	}

	/// Serializable copy of the device state
	pub fn snapshot(&self) -> DeviceSnapshot {
		DeviceSnapshot {
			name: self.name.clone(),
			base_address: self.base_address,
			enabled: self.enabled,
			registers: self.registers.clone(),
		}
	}
}
