use crate::key::RegisterKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Serializable view of an [EmbeddedDevice](crate::EmbeddedDevice).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
	pub name: String,
	pub base_address: u32,
	pub enabled: bool,
	pub registers: BTreeMap<RegisterKey, u16>,
}

impl DeviceSnapshot {
	/// Stored value for an offset, if it was ever written
	pub fn register(&self, offset: u32) -> Option<u16> {
		self.registers.get(&RegisterKey::from_offset(offset)).copied()
	}
}
