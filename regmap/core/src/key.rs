use serde::{Deserialize, Serialize};

/// Key under which a register value is stored, `reg_` followed by the offset as
/// lowercase hex padded to four digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegisterKey(String);

impl RegisterKey {
	pub fn from_offset(offset: u32) -> Self {
		Self(format!("reg_{:04x}", offset))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Display for RegisterKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}
