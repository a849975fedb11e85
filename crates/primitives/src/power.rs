use std::fmt;

/// Resource type consumed by a cost record.
///
/// Discriminants follow the generator's encoding; unrecognized values are preserved in
/// [`PowerType::Other`] so that round-tripping a raw value never loses information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerType {
	Health,
	Mana,
	Rage,
	Focus,
	Energy,
	Chi,
	Rune,
	RunicPower,
	SoulShard,
	Eclipse,
	HolyPower,
	BurningEmber,
	DemonicFury,
	Other(i32),
}

impl PowerType {
	/// Decodes a raw generator value.
	pub const fn from_raw(raw: i32) -> Self {
		match raw {
			-2 => Self::Health,
			0 => Self::Mana,
			1 => Self::Rage,
			2 => Self::Focus,
			3 => Self::Energy,
			4 => Self::Chi,
			5 => Self::Rune,
			6 => Self::RunicPower,
			7 => Self::SoulShard,
			8 => Self::Eclipse,
			9 => Self::HolyPower,
			14 => Self::BurningEmber,
			15 => Self::DemonicFury,
			other => Self::Other(other),
		}
	}

	/// Encodes back to the generator value.
	pub const fn as_raw(self) -> i32 {
		match self {
			Self::Health => -2,
			Self::Mana => 0,
			Self::Rage => 1,
			Self::Focus => 2,
			Self::Energy => 3,
			Self::Chi => 4,
			Self::Rune => 5,
			Self::RunicPower => 6,
			Self::SoulShard => 7,
			Self::Eclipse => 8,
			Self::HolyPower => 9,
			Self::BurningEmber => 14,
			Self::DemonicFury => 15,
			Self::Other(raw) => raw,
		}
	}

	/// Divisor turning a stored cost into resource units.
	///
	/// Stored costs are scaled per resource (mana in hundredths, rage and runic power in
	/// tenths). `percentage` selects the divisor for percent-of-base costs, which only
	/// differs for demonic fury (a percentage of its 1000-point base).
	pub fn cost_divisor(self, percentage: bool) -> f64 {
		match self {
			Self::Mana => 100.0,
			Self::Rage | Self::RunicPower | Self::BurningEmber => 10.0,
			Self::DemonicFury if percentage => 0.1,
			_ => 1.0,
		}
	}
}

impl Default for PowerType {
	fn default() -> Self {
		Self::Mana
	}
}

impl fmt::Display for PowerType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Health => f.write_str("health"),
			Self::Mana => f.write_str("mana"),
			Self::Rage => f.write_str("rage"),
			Self::Focus => f.write_str("focus"),
			Self::Energy => f.write_str("energy"),
			Self::Chi => f.write_str("chi"),
			Self::Rune => f.write_str("rune"),
			Self::RunicPower => f.write_str("runic_power"),
			Self::SoulShard => f.write_str("soul_shard"),
			Self::Eclipse => f.write_str("eclipse"),
			Self::HolyPower => f.write_str("holy_power"),
			Self::BurningEmber => f.write_str("burning_ember"),
			Self::DemonicFury => f.write_str("demonic_fury"),
			Self::Other(raw) => write!(f, "power({raw})"),
		}
	}
}
