use std::time::Duration;

use grimoire_primitives::{ClassFlags, PowerType, RecordKind};

use super::{FieldDef, Record, field};

/// An effect owned by an ability.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectData {
	pub id: u32,
	/// Owning ability.
	pub spell_id: u32,
	/// 1-based slot within the owning ability.
	pub position: u32,
	pub effect_type: u32,
	pub subtype: u32,
	pub m_avg: f64,
	pub m_delta: f64,
	pub m_unk: f64,
	pub sp_coeff: f64,
	pub ap_coeff: f64,
	pub amplitude_ms: f64,
	pub radius: f64,
	pub radius_max: f64,
	pub base_value: i32,
	pub misc_value: i32,
	pub misc_value_2: i32,
	pub class_flags: ClassFlags,
	/// Ability triggered by this effect, 0 for none.
	pub trigger_spell_id: u32,
	pub m_chain: f64,
	pub pp_combo_points: f64,
	pub real_ppl: f64,
	pub die_sides: i32,
}

static NIL: EffectData = EffectData::EMPTY;
static NOT_FOUND: EffectData = EffectData::EMPTY;

static FIELDS: &[FieldDef<EffectData>] = &[
	field!(ro EffectData, id),
	field!(ro EffectData, spell_id),
	field!(ro EffectData, position),
	field!(rw EffectData, effect_type as u32),
	field!(rw EffectData, subtype as u32),
	field!(rw EffectData, m_avg as f64),
	field!(rw EffectData, m_delta as f64),
	field!(rw EffectData, m_unk as f64),
	field!(rw EffectData, sp_coeff as f64),
	field!(rw EffectData, ap_coeff as f64),
	field!(rw EffectData, amplitude_ms as f64),
	field!(rw EffectData, radius as f64),
	field!(rw EffectData, radius_max as f64),
	field!(rw EffectData, base_value as i32),
	field!(rw EffectData, misc_value as i32),
	field!(rw EffectData, misc_value_2 as i32),
	field!(ro EffectData, trigger_spell_id),
	field!(rw EffectData, m_chain as f64),
	field!(rw EffectData, pp_combo_points as f64),
	field!(rw EffectData, real_ppl as f64),
	field!(rw EffectData, die_sides as i32),
];

impl EffectData {
	pub const EMPTY: EffectData = EffectData {
		id: 0,
		spell_id: 0,
		position: 0,
		effect_type: 0,
		subtype: 0,
		m_avg: 0.0,
		m_delta: 0.0,
		m_unk: 0.0,
		sp_coeff: 0.0,
		ap_coeff: 0.0,
		amplitude_ms: 0.0,
		radius: 0.0,
		radius_max: 0.0,
		base_value: 0,
		misc_value: 0,
		misc_value_2: 0,
		class_flags: ClassFlags::EMPTY,
		trigger_spell_id: 0,
		m_chain: 0.0,
		pp_combo_points: 0.0,
		real_ppl: 0.0,
		die_sides: 0,
	};

	pub const fn new(id: u32, spell_id: u32, position: u32) -> Self {
		Self {
			id,
			spell_id,
			position,
			..Self::EMPTY
		}
	}

	/// Base value read as a percentage.
	pub fn percent(&self) -> f64 {
		f64::from(self.base_value) / 100.0
	}

	/// Base value read as milliseconds.
	pub fn time_value(&self) -> Duration {
		Duration::from_millis(self.base_value.max(0) as u64)
	}

	/// Tick period of periodic effects.
	pub fn period(&self) -> Duration {
		Duration::from_secs_f64(self.amplitude_ms.max(0.0) / 1000.0)
	}

	/// Never smaller than [`EffectData::radius`].
	pub fn max_radius(&self) -> f64 {
		self.radius_max.max(self.radius)
	}

	pub fn mastery_value(&self) -> f64 {
		self.sp_coeff / 100.0
	}

	/// Base value scaled for the resource it grants.
	pub fn resource(&self, power: PowerType) -> f64 {
		f64::from(self.base_value) / power.cost_divisor(false)
	}

	pub fn class_flag(&self, index: u32) -> bool {
		self.class_flags.has(index)
	}
}

impl Default for EffectData {
	fn default() -> Self {
		Self::EMPTY
	}
}

impl Record for EffectData {
	const KIND: RecordKind = RecordKind::Effect;

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
