use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of record stored in a generated table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
	/// Ability (spell) records.
	Spell,
	/// Effects owned by abilities.
	Effect,
	/// Resource costs owned by abilities.
	Power,
	/// Talent records referencing abilities.
	Talent,
}

impl RecordKind {
	pub const ALL: [RecordKind; 4] = [RecordKind::Spell, RecordKind::Effect, RecordKind::Power, RecordKind::Talent];

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Spell => "spell",
			Self::Effect => "effect",
			Self::Power => "power",
			Self::Talent => "talent",
		}
	}

	/// Dense slot used for per-kind arrays.
	#[inline]
	pub const fn index(self) -> usize {
		match self {
			Self::Spell => 0,
			Self::Effect => 1,
			Self::Power => 2,
			Self::Talent => 3,
		}
	}
}

impl fmt::Display for RecordKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
