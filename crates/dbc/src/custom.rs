//! Custom record overlay.
//!
//! # Role
//!
//! Records that are not part of the generated tables (wholly new abilities, or clones of
//! generated ones) live in per-variant arenas. A custom record whose id matches a table
//! record shadows it. Custom records are linked at finalize with the same linker as the
//! tables.
//!
//! # Invariants
//!
//! - Ids are unique within an arena and never 0.
//! - Arena slots are stable: records are appended, never removed.

use grimoire_primitives::{DataVariant, RecordKind};
use rustc_hash::FxHashMap as HashMap;

use crate::error::CustomError;
use crate::link::{Arena, Handle};
use crate::records::{EffectData, PowerData, Record, SpellData};

/// Append-only storage for custom records of one kind.
#[derive(Debug, Clone)]
pub struct CustomArena<T: Record> {
	records: Vec<T>,
	by_id: HashMap<u32, u32>,
}

impl<T: Record> Default for CustomArena<T> {
	fn default() -> Self {
		Self {
			records: Vec::new(),
			by_id: HashMap::default(),
		}
	}
}

impl<T: Record> CustomArena<T> {
	fn insert(&mut self, variant: DataVariant, record: T) -> Result<u32, CustomError> {
		let id = record.id();
		if id == 0 {
			return Err(CustomError::ReservedId { kind: T::KIND });
		}
		if self.by_id.contains_key(&id) {
			return Err(CustomError::Duplicate {
				kind: T::KIND,
				id,
				variant,
			});
		}
		let slot = self.records.len() as u32;
		self.records.push(record);
		self.by_id.insert(id, slot);
		tracing::debug!(domain = "custom", kind = %T::KIND, id, %variant, "added custom record");
		Ok(slot)
	}

	pub fn find(&self, id: u32) -> Option<&T> {
		self.by_id.get(&id).map(|&slot| &self.records[slot as usize])
	}

	pub fn find_mut(&mut self, id: u32) -> Option<&mut T> {
		self.by_id.get(&id).map(|&slot| &mut self.records[slot as usize])
	}

	pub fn iter(&self) -> std::slice::Iter<'_, T> {
		self.records.iter()
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Largest id in the arena, 0 when empty.
	pub fn max_id(&self) -> u32 {
		self.by_id.keys().copied().max().unwrap_or(0)
	}
}

impl<T: Record> Arena<T> for CustomArena<T> {
	fn slots(&self) -> usize {
		self.records.len()
	}

	fn at(&self, slot: u32) -> Option<&T> {
		self.records.get(slot as usize)
	}

	fn locate(&self, id: u32) -> Option<u32> {
		self.by_id.get(&id).copied()
	}

	fn handle(&self, slot: u32) -> Handle {
		Handle::Custom(slot)
	}
}

/// Custom abilities, effects and costs of one variant.
#[derive(Debug, Clone)]
pub struct CustomData {
	variant: DataVariant,
	pub(crate) spells: CustomArena<SpellData>,
	pub(crate) effects: CustomArena<EffectData>,
	pub(crate) powers: CustomArena<PowerData>,
	replaced: HashMap<u32, u32>,
}

impl CustomData {
	pub fn new(variant: DataVariant) -> Self {
		Self {
			variant,
			spells: CustomArena::default(),
			effects: CustomArena::default(),
			powers: CustomArena::default(),
			replaced: HashMap::default(),
		}
	}

	pub fn variant(&self) -> DataVariant {
		self.variant
	}

	pub fn add_spell(&mut self, spell: SpellData) -> Result<&mut SpellData, CustomError> {
		let slot = self.spells.insert(self.variant, spell)?;
		Ok(&mut self.spells.records[slot as usize])
	}

	pub fn add_effect(&mut self, effect: EffectData) -> Result<&mut EffectData, CustomError> {
		let slot = self.effects.insert(self.variant, effect)?;
		Ok(&mut self.effects.records[slot as usize])
	}

	pub fn add_power(&mut self, power: PowerData) -> Result<&mut PowerData, CustomError> {
		let slot = self.powers.insert(self.variant, power)?;
		Ok(&mut self.powers.records[slot as usize])
	}

	/// Mutable access to a custom ability. Reassigning its id is not supported.
	pub fn spell_mut(&mut self, id: u32) -> Option<&mut SpellData> {
		self.spells.find_mut(id)
	}

	pub fn effect_mut(&mut self, id: u32) -> Option<&mut EffectData> {
		self.effects.find_mut(id)
	}

	pub fn power_mut(&mut self, id: u32) -> Option<&mut PowerData> {
		self.powers.find_mut(id)
	}

	pub fn find_spell(&self, id: u32) -> Option<&SpellData> {
		self.spells.find(id)
	}

	pub fn find_effect(&self, id: u32) -> Option<&EffectData> {
		self.effects.find(id)
	}

	pub fn find_power(&self, id: u32) -> Option<&PowerData> {
		self.powers.find(id)
	}

	pub fn spells(&self) -> &CustomArena<SpellData> {
		&self.spells
	}

	pub fn effects(&self) -> &CustomArena<EffectData> {
		&self.effects
	}

	pub fn powers(&self) -> &CustomArena<PowerData> {
		&self.powers
	}

	/// Records that `spell` is replaced by `replaced_by`, e.g. a talent that swaps one
	/// ability for another. Each ability takes at most one replacement.
	pub fn replace_id(&mut self, spell: u32, replaced_by: u32) -> Result<(), CustomError> {
		if spell == 0 || replaced_by == 0 {
			return Err(CustomError::ReservedId { kind: RecordKind::Spell });
		}
		if let Some(&existing) = self.replaced.get(&spell) {
			return Err(CustomError::Replaced {
				spell,
				replaced_by: existing,
				variant: self.variant,
			});
		}
		self.replaced.insert(spell, replaced_by);
		tracing::debug!(domain = "custom", variant = %self.variant, spell, replaced_by, "registered replacement");
		Ok(())
	}

	/// Id of the ability replacing `spell`, 0 when nothing replaces it.
	pub fn replaced_id(&self, spell: u32) -> u32 {
		self.replaced.get(&spell).copied().unwrap_or(0)
	}

	pub fn is_empty(&self) -> bool {
		self.spells.is_empty() && self.effects.is_empty() && self.powers.is_empty() && self.replaced.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use grimoire_primitives::{DataVariant, PowerType, RecordKind};

	use super::*;

	#[test]
	fn add_find_and_mutate() {
		let mut custom = CustomData::new(DataVariant::Primary);
		custom.add_spell(SpellData::new(900_001, "Custom Bolt")).unwrap().cooldown_ms = 1500;
		custom.add_effect(EffectData::new(800_001, 900_001, 1)).unwrap();
		custom.add_power(PowerData::new(700_001, 900_001, PowerType::Mana)).unwrap();

		assert_eq!(custom.find_spell(900_001).unwrap().cooldown_ms, 1500);
		custom.spell_mut(900_001).unwrap().gcd_ms = 1000;
		assert_eq!(custom.find_spell(900_001).unwrap().gcd_ms, 1000);
		assert_eq!(custom.find_effect(800_001).unwrap().spell_id, 900_001);
		assert!(custom.find_power(1).is_none());
		assert_eq!(custom.spells().max_id(), 900_001);
	}

	#[test]
	fn duplicate_and_zero_ids_are_rejected() {
		let mut custom = CustomData::new(DataVariant::Alternate);
		custom.add_spell(SpellData::new(5, "A")).unwrap();

		let dup = custom.add_spell(SpellData::new(5, "B")).unwrap_err();
		assert_eq!(
			dup,
			CustomError::Duplicate {
				kind: RecordKind::Spell,
				id: 5,
				variant: DataVariant::Alternate
			}
		);
		let zero = custom.add_effect(EffectData::new(0, 5, 1)).unwrap_err();
		assert_eq!(zero, CustomError::ReservedId { kind: RecordKind::Effect });
		assert_eq!(custom.spells().len(), 1);
	}

	#[test]
	fn replacements_take_one_mapping_per_spell() {
		let mut custom = CustomData::new(DataVariant::Primary);
		assert_eq!(custom.replaced_id(100), 0);
		custom.replace_id(100, 300).unwrap();
		assert_eq!(custom.replaced_id(100), 300);
		assert_eq!(custom.replaced_id(300), 0, "the mapping is one way");
		assert!(!custom.is_empty());

		let again = custom.replace_id(100, 200).unwrap_err();
		assert_eq!(
			again,
			CustomError::Replaced {
				spell: 100,
				replaced_by: 300,
				variant: DataVariant::Primary
			}
		);
		assert_eq!(custom.replaced_id(100), 300);

		assert_eq!(custom.replace_id(0, 300).unwrap_err(), CustomError::ReservedId { kind: RecordKind::Spell });
		assert_eq!(custom.replace_id(200, 0).unwrap_err(), CustomError::ReservedId { kind: RecordKind::Spell });
		assert_eq!(custom.replaced_id(200), 0);
	}

	#[test]
	fn arena_handles_are_custom() {
		let mut custom = CustomData::new(DataVariant::Primary);
		custom.add_spell(SpellData::new(10, "A")).unwrap();
		custom.add_spell(SpellData::new(3, "B")).unwrap();
		assert_eq!(custom.spells().locate(3), Some(1));
		assert_eq!(custom.spells().handle(1), Handle::Custom(1));
		assert_eq!(custom.spells().iter_slots().count(), 2);
	}
}
