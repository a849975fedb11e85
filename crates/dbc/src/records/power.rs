use grimoire_primitives::{PowerType, RecordKind};

use super::{FieldDef, Record, field};

/// A resource cost owned by an ability.
///
/// Flat costs are stored scaled by [`PowerType::cost_divisor`]; when a flat cost is zero
/// the matching percentage cost applies instead.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerData {
	pub id: u32,
	/// Owning ability.
	pub spell_id: u32,
	/// Aura during which this cost is active, 0 for always.
	pub aura_id: u32,
	pub power_type: i32,
	pub cost: i32,
	pub cost_max: i32,
	pub cost_per_second: i32,
	pub pct_cost: f64,
	pub pct_cost_max: f64,
	pub pct_cost_per_second: f64,
}

static NIL: PowerData = PowerData::EMPTY;
static NOT_FOUND: PowerData = PowerData::EMPTY;

static FIELDS: &[FieldDef<PowerData>] = &[
	field!(ro PowerData, id),
	field!(ro PowerData, spell_id),
	field!(rw PowerData, aura_id as u32),
	field!(rw PowerData, power_type as i32),
	field!(rw PowerData, cost as i32),
	field!(rw PowerData, cost_max as i32),
	field!(rw PowerData, cost_per_second as i32),
	field!(rw PowerData, pct_cost as f64),
	field!(rw PowerData, pct_cost_max as f64),
	field!(rw PowerData, pct_cost_per_second as f64),
];

impl PowerData {
	pub const EMPTY: PowerData = PowerData {
		id: 0,
		spell_id: 0,
		aura_id: 0,
		power_type: 0,
		cost: 0,
		cost_max: 0,
		cost_per_second: 0,
		pct_cost: 0.0,
		pct_cost_max: 0.0,
		pct_cost_per_second: 0.0,
	};

	pub const fn new(id: u32, spell_id: u32, power: PowerType) -> Self {
		Self {
			id,
			spell_id,
			power_type: power.as_raw(),
			..Self::EMPTY
		}
	}

	pub fn power(&self) -> PowerType {
		PowerType::from_raw(self.power_type)
	}

	/// Cost in resource units.
	pub fn cost(&self) -> f64 {
		self.scaled(self.cost, self.pct_cost)
	}

	pub fn max_cost(&self) -> f64 {
		self.scaled(self.cost_max, self.pct_cost_max)
	}

	pub fn cost_per_second(&self) -> f64 {
		self.scaled(self.cost_per_second, self.pct_cost_per_second)
	}

	fn scaled(&self, flat: i32, pct: f64) -> f64 {
		if flat > 0 {
			f64::from(flat) / self.power().cost_divisor(false)
		} else {
			pct / self.power().cost_divisor(true)
		}
	}
}

impl Default for PowerData {
	fn default() -> Self {
		Self::EMPTY
	}
}

impl Record for PowerData {
	const KIND: RecordKind = RecordKind::Power;

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
