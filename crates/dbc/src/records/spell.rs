use std::time::Duration;

use grimoire_primitives::{AttributeSet, ClassFlags, RecordKind, SchoolMask, SpellAttribute};

use super::{FieldDef, Record, field};

/// An ability record.
#[derive(Debug, Clone, PartialEq)]
pub struct SpellData {
	pub name: &'static str,
	pub id: u32,
	pub missile_speed: f64,
	pub school: SchoolMask,
	pub class_mask: u32,
	pub race_mask: u32,
	/// Scaling table selector; 0 disables scaling, negative values pick special tables.
	pub scaling_type: i32,
	/// 0 means unrestricted.
	pub max_scaling_level: u32,
	pub spell_level: u32,
	pub max_level: u32,
	pub min_range: f64,
	pub max_range: f64,
	pub cooldown_ms: u32,
	pub gcd_ms: u32,
	pub charges: u32,
	pub charge_cooldown_ms: u32,
	pub category: u32,
	/// Negative durations are infinite.
	pub duration_ms: f64,
	pub rune_cost: u32,
	/// Stored in tenths.
	pub runic_power_gain: u32,
	pub max_stack: u32,
	/// Percent.
	pub proc_chance: u32,
	pub proc_charges: u32,
	pub proc_flags: u32,
	pub internal_cooldown_ms: u32,
	pub rppm: f64,
	pub cast_min_ms: i32,
	pub cast_max_ms: i32,
	pub cast_div: i32,
	pub c_scaling: f64,
	pub c_scaling_level: u32,
	pub replace_spell_id: u32,
	pub attributes: AttributeSet,
	pub class_flags: ClassFlags,
	pub class_flags_family: u32,
	pub desc: &'static str,
	pub tooltip: &'static str,
	pub desc_vars: &'static str,
	pub icon: &'static str,
	pub active_icon: &'static str,
	pub rank_str: &'static str,
}

static NIL: SpellData = SpellData::EMPTY;
static NOT_FOUND: SpellData = SpellData::EMPTY;

static FIELDS: &[FieldDef<SpellData>] = &[
	field!(ro SpellData, id),
	field!(rw SpellData, missile_speed as f64),
	FieldDef {
		name: "school",
		get: |r: &SpellData| r.school.bits() as f64,
		set: Some(|r: &mut SpellData, v: f64| r.school = SchoolMask::from_bits_retain(v as u32)),
	},
	field!(rw SpellData, class_mask as u32),
	field!(rw SpellData, race_mask as u32),
	field!(rw SpellData, scaling_type as i32),
	field!(rw SpellData, max_scaling_level as u32),
	field!(rw SpellData, spell_level as u32),
	field!(rw SpellData, max_level as u32),
	field!(rw SpellData, min_range as f64),
	field!(rw SpellData, max_range as f64),
	field!(rw SpellData, cooldown_ms as u32),
	field!(rw SpellData, gcd_ms as u32),
	field!(rw SpellData, charges as u32),
	field!(rw SpellData, charge_cooldown_ms as u32),
	field!(rw SpellData, category as u32),
	field!(rw SpellData, duration_ms as f64),
	field!(rw SpellData, rune_cost as u32),
	field!(rw SpellData, runic_power_gain as u32),
	field!(rw SpellData, max_stack as u32),
	field!(rw SpellData, proc_chance as u32),
	field!(rw SpellData, proc_charges as u32),
	field!(rw SpellData, proc_flags as u32),
	field!(rw SpellData, internal_cooldown_ms as u32),
	field!(rw SpellData, rppm as f64),
	field!(rw SpellData, cast_min_ms as i32),
	field!(rw SpellData, cast_max_ms as i32),
	field!(rw SpellData, cast_div as i32),
	field!(rw SpellData, c_scaling as f64),
	field!(rw SpellData, c_scaling_level as u32),
	field!(rw SpellData, replace_spell_id as u32),
	field!(rw SpellData, class_flags_family as u32),
];

impl SpellData {
	/// All-zero record with empty strings.
	pub const EMPTY: SpellData = SpellData {
		name: "",
		id: 0,
		missile_speed: 0.0,
		school: SchoolMask::empty(),
		class_mask: 0,
		race_mask: 0,
		scaling_type: 0,
		max_scaling_level: 0,
		spell_level: 0,
		max_level: 0,
		min_range: 0.0,
		max_range: 0.0,
		cooldown_ms: 0,
		gcd_ms: 0,
		charges: 0,
		charge_cooldown_ms: 0,
		category: 0,
		duration_ms: 0.0,
		rune_cost: 0,
		runic_power_gain: 0,
		max_stack: 0,
		proc_chance: 0,
		proc_charges: 0,
		proc_flags: 0,
		internal_cooldown_ms: 0,
		rppm: 0.0,
		cast_min_ms: 0,
		cast_max_ms: 0,
		cast_div: 0,
		c_scaling: 0.0,
		c_scaling_level: 0,
		replace_spell_id: 0,
		attributes: AttributeSet::EMPTY,
		class_flags: ClassFlags::EMPTY,
		class_flags_family: 0,
		desc: "",
		tooltip: "",
		desc_vars: "",
		icon: "",
		active_icon: "",
		rank_str: "",
	};

	pub const fn new(id: u32, name: &'static str) -> Self {
		Self {
			id,
			name,
			..Self::EMPTY
		}
	}

	pub fn cooldown(&self) -> Duration {
		Duration::from_millis(self.cooldown_ms.into())
	}

	pub fn gcd(&self) -> Duration {
		Duration::from_millis(self.gcd_ms.into())
	}

	pub fn charge_cooldown(&self) -> Duration {
		Duration::from_millis(self.charge_cooldown_ms.into())
	}

	pub fn internal_cooldown(&self) -> Duration {
		Duration::from_millis(self.internal_cooldown_ms.into())
	}

	/// `None` for infinite (negative) durations.
	pub fn duration(&self) -> Option<Duration> {
		(self.duration_ms >= 0.0).then(|| Duration::from_secs_f64(self.duration_ms / 1000.0))
	}

	/// Proc chance as a fraction.
	pub fn proc_probability(&self) -> f64 {
		f64::from(self.proc_chance) / 100.0
	}

	pub fn runic_power(&self) -> f64 {
		f64::from(self.runic_power_gain) / 10.0
	}

	/// Cast time at `level`, interpolated between the minimum and maximum cast times.
	pub fn cast_time(&self, level: u32) -> Duration {
		if self.cast_div < 0 {
			return Duration::from_millis(self.cast_min_ms.max(0) as u64);
		}
		if self.cast_div <= 1 || i64::from(level) >= i64::from(self.cast_div) {
			return Duration::from_millis(self.cast_max_ms.max(0) as u64);
		}
		let span = f64::from(self.cast_max_ms - self.cast_min_ms);
		let step = f64::from(level.saturating_sub(1)) / f64::from(self.cast_div - 1);
		let ms = f64::from(self.cast_min_ms) + span * step;
		Duration::from_secs_f64(ms.max(0.0) / 1000.0)
	}

	pub fn has(&self, attr: SpellAttribute) -> bool {
		self.attributes.has(attr)
	}

	pub fn is_passive(&self) -> bool {
		self.has(SpellAttribute::PASSIVE)
	}

	pub fn is_level(&self, level: u32) -> bool {
		level >= self.spell_level
	}

	pub fn in_range(&self, range: f64) -> bool {
		range >= self.min_range && range <= self.max_range
	}

	/// An empty class mask means usable by any class.
	pub fn is_class(&self, mask: u32) -> bool {
		self.class_mask == 0 || self.class_mask & mask == mask
	}

	pub fn is_race(&self, mask: u32) -> bool {
		self.race_mask & mask == mask
	}
}

impl Default for SpellData {
	fn default() -> Self {
		Self::EMPTY
	}
}

impl Record for SpellData {
	const KIND: RecordKind = RecordKind::Spell;

	fn id(&self) -> u32 {
		self.id
	}

	fn set_id(&mut self, id: u32) {
		self.id = id;
	}

	fn nil() -> &'static Self {
		&NIL
	}

	fn not_found() -> &'static Self {
		&NOT_FOUND
	}

	fn fields() -> &'static [FieldDef<Self>] {
		FIELDS
	}
}
