use grimoire_primitives::RecordKind;

use super::{FieldDef, Record, field};

/// A talent choice granting an ability.
#[derive(Debug, Clone, PartialEq)]
pub struct TalentData {
	pub name: &'static str,
	pub id: u32,
	pub class_mask: u32,
	pub spec: u32,
	pub col: u32,
	pub row: u32,
	/// Granted ability.
	pub spell_id: u32,
	/// Ability replaced by the talent, 0 for none.
	pub replace_id: u32,
}

static NIL: TalentData = TalentData::EMPTY;
static NOT_FOUND: TalentData = TalentData::EMPTY;

static FIELDS: &[FieldDef<TalentData>] = &[
	field!(ro TalentData, id),
	field!(rw TalentData, class_mask as u32),
	field!(rw TalentData, spec as u32),
	field!(rw TalentData, col as u32),
	field!(rw TalentData, row as u32),
	field!(ro TalentData, spell_id),
	field!(rw TalentData, replace_id as u32),
];

impl TalentData {
	pub const EMPTY: TalentData = TalentData {
		name: "",
		id: 0,
		class_mask: 0,
		spec: 0,
		col: 0,
		row: 0,
		spell_id: 0,
		replace_id: 0,
	};

	pub const fn new(id: u32, name: &'static str, spell_id: u32) -> Self {
		Self {
			id,
			name,
			spell_id,
			..Self::EMPTY
		}
	}

	/// True when every bit of `mask` is set; an empty mask never matches.
	pub fn is_class(&self, mask: u32) -> bool {
		mask != 0 && self.class_mask & mask == mask
	}
}

impl Default for TalentData {
	fn default() -> Self {
		Self::EMPTY
	}
}

impl Record for TalentData {
	const KIND: RecordKind = RecordKind::Talent;

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
