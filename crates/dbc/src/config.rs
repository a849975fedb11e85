//! Data layer configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::hotfix::ApplyMode;

/// Controls which variants are built and how hotfixes are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DbcConfig {
	/// Build the alternate variant when its tables are provided.
	pub load_alternate: bool,
	pub apply_hotfixes: bool,
	/// Block non-quiet hotfixes whose verification value does not match and fail finalize.
	pub strict_verification: bool,
}

impl Default for DbcConfig {
	fn default() -> Self {
		Self {
			load_alternate: true,
			apply_hotfixes: true,
			strict_verification: false,
		}
	}
}

impl DbcConfig {
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(input)?)
	}

	pub fn apply_mode(&self) -> ApplyMode {
		if self.strict_verification {
			ApplyMode::Strict
		} else {
			ApplyMode::Lenient
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_document_uses_defaults() {
		assert_eq!(DbcConfig::from_toml_str("").unwrap(), DbcConfig::default());
	}

	#[test]
	fn partial_document_overrides_fields() {
		let config = DbcConfig::from_toml_str("strict_verification = true\nload_alternate = false\n").unwrap();
		assert!(config.strict_verification);
		assert!(!config.load_alternate);
		assert!(config.apply_hotfixes);
		assert_eq!(config.apply_mode(), ApplyMode::Strict);
	}

	#[test]
	fn unknown_keys_are_rejected() {
		let err = DbcConfig::from_toml_str("ptr = true").unwrap_err();
		assert!(matches!(err, ConfigError::Parse(_)));
		assert!(err.to_string().starts_with("invalid data layer config"));
	}
}
