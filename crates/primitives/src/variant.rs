use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two parallel datasets a record table may be generated for.
///
/// `Primary` is the live dataset; `Alternate` carries test-realm data that may diverge
/// from it. Every table, link graph and patch overlay exists once per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataVariant {
	#[default]
	Primary,
	Alternate,
}

impl DataVariant {
	/// Both variants in storage order.
	pub const ALL: [DataVariant; 2] = [DataVariant::Primary, DataVariant::Alternate];

	/// Dense slot used for per-variant arrays.
	#[inline]
	pub const fn index(self) -> usize {
		match self {
			Self::Primary => 0,
			Self::Alternate => 1,
		}
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Primary => "primary",
			Self::Alternate => "alternate",
		}
	}

	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"primary" | "live" => Some(Self::Primary),
			"alternate" | "ptr" => Some(Self::Alternate),
			_ => None,
		}
	}
}

impl fmt::Display for DataVariant {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
