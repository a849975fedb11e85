//! Resolved copies of patched records.
//!
//! # Role
//!
//! Generated tables are never mutated. Hotfixes and overrides write into an [`Overlay`]:
//! a per-kind map from id to a patched copy of the record. Lookups consult the overlay
//! before the custom arena and the tables.
//!
//! # Invariants
//!
//! - An overlay record starts as a copy of the raw record (custom if present, otherwise
//!   table) and is keyed by that record's id.
//! - A field write against a record that exists nowhere is dropped; hotfixes report it as
//!   missing before writing.

use std::collections::hash_map::Entry;

use grimoire_primitives::{DataVariant, RecordKind};
use rustc_hash::FxHashMap as HashMap;

use crate::custom::{CustomArena, CustomData};
use crate::db::Tables;
use crate::hotfix::PatchTarget;
use crate::index::Index;
use crate::overrides::OverrideRegistry;
use crate::records::{EffectData, PowerData, Record, SpellData, TalentData};

/// Patched copies of records, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Overlay {
	spells: HashMap<u32, SpellData>,
	effects: HashMap<u32, EffectData>,
	powers: HashMap<u32, PowerData>,
	talents: HashMap<u32, TalentData>,
}

impl Overlay {
	pub fn get<T: Stored>(&self, id: u32) -> Option<&T> {
		T::overlay(self).get(&id)
	}

	pub fn len(&self) -> usize {
		self.spells.len() + self.effects.len() + self.powers.len() + self.talents.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// A record kind held by the data layer, with access to each storage layer.
pub trait Stored: Record {
	fn table(tables: &Tables) -> &Index<Self>;

	/// `None` for kinds without a custom arena.
	fn custom(custom: &CustomData) -> Option<&CustomArena<Self>>;

	fn overlay(overlay: &Overlay) -> &HashMap<u32, Self>;

	fn overlay_mut(overlay: &mut Overlay) -> &mut HashMap<u32, Self>;
}

macro_rules! impl_stored {
	($ty:ty, $field:ident, |$custom:ident| $arena:expr) => {
		impl Stored for $ty {
			fn table(tables: &Tables) -> &Index<Self> {
				&tables.$field
			}

			fn custom($custom: &CustomData) -> Option<&CustomArena<Self>> {
				$arena
			}

			fn overlay(overlay: &Overlay) -> &HashMap<u32, Self> {
				&overlay.$field
			}

			fn overlay_mut(overlay: &mut Overlay) -> &mut HashMap<u32, Self> {
				&mut overlay.$field
			}
		}
	};
}

impl_stored!(SpellData, spells, |custom| Some(&custom.spells));
impl_stored!(EffectData, effects, |custom| Some(&custom.effects));
impl_stored!(PowerData, powers, |custom| Some(&custom.powers));
impl_stored!(TalentData, talents, |_custom| None);

/// Unpatched record: custom first, then table.
pub(crate) fn raw<'a, T: Stored>(tables: &'a Tables, custom: &'a CustomData, id: u32) -> Option<&'a T> {
	T::custom(custom)
		.and_then(|arena| arena.find(id))
		.or_else(|| Some(T::table(tables).lookup(id)).filter(|r| r.found()))
}

/// Writes fields into an overlay, copying raw records on first touch.
pub(crate) struct Patcher<'a> {
	pub tables: &'a Tables,
	pub custom: &'a CustomData,
	pub overlay: &'a mut Overlay,
}

impl Patcher<'_> {
	fn read_field<T: Stored>(&self, id: u32, field: &str) -> Option<f64> {
		let record = self.overlay.get::<T>(id).or_else(|| raw::<T>(self.tables, self.custom, id))?;
		record.field(field).ok()
	}

	fn write_field<T: Stored>(&mut self, id: u32, field: &str, value: f64) {
		let record = match T::overlay_mut(self.overlay).entry(id) {
			Entry::Occupied(slot) => slot.into_mut(),
			Entry::Vacant(slot) => match raw::<T>(self.tables, self.custom, id) {
				Some(record) => slot.insert(record.clone()),
				None => return,
			},
		};
		if let Err(err) = record.set_field(field, value) {
			tracing::warn!(domain = "dbc", kind = %T::KIND, id, field, %err, "patch rejected");
		}
	}
}

impl PatchTarget for Patcher<'_> {
	fn read(&self, kind: RecordKind, id: u32, field: &'static str) -> Option<f64> {
		match kind {
			RecordKind::Spell => self.read_field::<SpellData>(id, field),
			RecordKind::Effect => self.read_field::<EffectData>(id, field),
			RecordKind::Power => self.read_field::<PowerData>(id, field),
			RecordKind::Talent => self.read_field::<TalentData>(id, field),
		}
	}

	fn write(&mut self, kind: RecordKind, id: u32, field: &'static str, value: f64) {
		match kind {
			RecordKind::Spell => self.write_field::<SpellData>(id, field, value),
			RecordKind::Effect => self.write_field::<EffectData>(id, field, value),
			RecordKind::Power => self.write_field::<PowerData>(id, field, value),
			RecordKind::Talent => self.write_field::<TalentData>(id, field, value),
		}
	}
}

/// Applies every override of `variant`; returns how many hit an existing record.
pub(crate) fn apply_overrides(overrides: &OverrideRegistry, variant: DataVariant, patcher: &mut Patcher<'_>) -> usize {
	let mut applied = 0;
	for entry in overrides.for_variant(variant) {
		if patcher.read(entry.kind, entry.id, entry.field).is_none() {
			tracing::warn!(domain = "overrides", %variant, kind = %entry.kind, id = entry.id, field = entry.field, "override target does not exist");
			continue;
		}
		patcher.write(entry.kind, entry.id, entry.field, entry.value);
		applied += 1;
	}
	applied
}
