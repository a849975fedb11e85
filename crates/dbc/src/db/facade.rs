use std::sync::Arc;

use grimoire_primitives::{DataVariant, PowerType};
use smallvec::SmallVec;

use super::{GameData, VariantData};
use crate::hotfix::HotfixReport;
use crate::link::{Arena, EffectLinks, Handle, SpellLinks};
use crate::overlay::{Overlay, Stored, raw};
use crate::records::{EffectData, PowerData, Record, SpellData, TalentData};

/// Read-only view of a [`GameData`] bound to one variant.
///
/// Cloning is cheap. All queries degrade to sentinel records instead of failing.
#[derive(Debug, Clone)]
pub struct Dbc {
	data: Arc<GameData>,
	variant: DataVariant,
	hotfixes: bool,
}

impl Dbc {
	/// Binds `data` to `variant`, falling back to primary when the alternate is absent.
	pub fn new(data: Arc<GameData>, variant: DataVariant) -> Self {
		let variant = if data.is_loaded(variant) { variant } else { DataVariant::Primary };
		Self {
			data,
			variant,
			hotfixes: true,
		}
	}

	/// The variant actually served.
	pub fn variant(&self) -> DataVariant {
		self.variant
	}

	pub fn data(&self) -> &Arc<GameData> {
		&self.data
	}

	/// A view resolving overrides, custom records and tables, skipping hotfixes.
	pub fn without_hotfixes(&self) -> Self {
		Self {
			hotfixes: false,
			..self.clone()
		}
	}

	pub fn hotfix_report(&self) -> HotfixReport {
		self.data.hotfixes.report(self.variant)
	}

	fn current(&self) -> &VariantData {
		self.data.variant(self.variant)
	}

	fn overlay(&self) -> &Overlay {
		let data = self.current();
		if self.hotfixes { &data.patched } else { &data.overridden }
	}

	/// Resolved record of kind `T`, or the not-found sentinel.
	pub fn record<T: Stored>(&self, id: u32) -> &T {
		if id == 0 {
			return T::not_found();
		}
		let data = self.current();
		self.overlay()
			.get::<T>(id)
			.or_else(|| raw::<T>(&data.tables, &data.custom, id))
			.unwrap_or(T::not_found())
	}

	pub fn spell(&self, id: u32) -> &SpellData {
		self.record(id)
	}

	pub fn effect(&self, id: u32) -> &EffectData {
		self.record(id)
	}

	pub fn power(&self, id: u32) -> &PowerData {
		self.record(id)
	}

	pub fn talent(&self, id: u32) -> &TalentData {
		self.record(id)
	}

	fn resolve<T: Stored>(&self, handle: Handle) -> &T {
		let data = self.current();
		let target = match handle {
			Handle::Empty => return T::nil(),
			Handle::NotFound => return T::not_found(),
			Handle::Table(row) => T::table(&data.tables).get(row),
			Handle::Custom(slot) => T::custom(&data.custom).and_then(|arena| arena.at(slot)),
		};
		target.map_or(T::not_found(), |r| self.record(r.id()))
	}

	/// Links of an ability; a custom ability shadows the table one.
	fn spell_links(&self, id: u32) -> Option<&SpellLinks> {
		let data = self.current();
		match data.custom.spells.locate(id) {
			Some(slot) => data.custom_links.spell(slot),
			None => data.tables.spells.position(id).and_then(|row| data.tables.links.spell(row)),
		}
	}

	fn effect_links(&self, id: u32) -> Option<&EffectLinks> {
		let data = self.current();
		match data.custom.effects.locate(id) {
			Some(slot) => data.custom_links.effect(slot),
			None => data.tables.effects.position(id).and_then(|row| data.tables.links.effect(row)),
		}
	}

	/// Number of effect slots, including gaps.
	pub fn effect_count(&self, ability: u32) -> usize {
		self.spell_links(ability).map_or(0, |l| l.effects.len())
	}

	/// Effect at 1-based `position`.
	///
	/// Sentinel abilities yield the nil effect, as do gaps in the position sequence.
	///
	/// # Panics
	///
	/// When `position` is 0 or above [`effect_count`](Self::effect_count).
	pub fn effect_at(&self, ability: u32, position: usize) -> &EffectData {
		if !self.spell(ability).found() {
			return EffectData::nil();
		}
		let count = self.effect_count(ability);
		assert!(
			(1..=count).contains(&position),
			"effect position {position} out of range for spell {ability} with {count} effects"
		);
		self.spell_links(ability)
			.map_or(EffectData::nil(), |l| self.resolve(l.effects[position - 1]))
	}

	/// Effects in position order; gaps yield the nil effect.
	pub fn effects(&self, ability: u32) -> impl Iterator<Item = &EffectData> + '_ {
		self.spell_links(ability)
			.into_iter()
			.flat_map(|l| l.effects.iter())
			.map(|&h| self.resolve::<EffectData>(h))
	}

	pub fn power_count(&self, ability: u32) -> usize {
		self.spell_links(ability).map_or(0, |l| l.powers.len())
	}

	/// Cost at 1-based index `n`; the nil cost when the ability has none.
	///
	/// # Panics
	///
	/// When the ability has costs and `n` is 0 or above [`power_count`](Self::power_count).
	pub fn power_at(&self, ability: u32, n: usize) -> &PowerData {
		let count = self.power_count(ability);
		if count == 0 {
			return PowerData::nil();
		}
		assert!((1..=count).contains(&n), "power index {n} out of range for spell {ability} with {count} costs");
		self.spell_links(ability)
			.map_or(PowerData::nil(), |l| self.resolve(l.powers[n - 1]))
	}

	pub fn powers(&self, ability: u32) -> impl Iterator<Item = &PowerData> + '_ {
		self.spell_links(ability)
			.into_iter()
			.flat_map(|l| l.powers.iter())
			.map(|&h| self.resolve::<PowerData>(h))
	}

	/// First cost of `power`; the nil cost when there is none.
	pub fn cost_for(&self, ability: u32, power: PowerType) -> &PowerData {
		self.powers(ability)
			.find(|p| p.power() == power)
			.unwrap_or(PowerData::nil())
	}

	/// Scaled cost of `power`, 0 when the ability has no such cost.
	pub fn cost(&self, ability: u32, power: PowerType) -> f64 {
		self.cost_for(ability, power).cost()
	}

	fn driver_handles(&self, ability: u32) -> SmallVec<[Handle; 2]> {
		let data = self.current();
		let mut handles = SmallVec::new();
		if let Some(links) = data.custom.spells.locate(ability).and_then(|slot| data.custom_links.spell(slot)) {
			handles.extend(links.drivers.iter().copied());
		}
		if let Some(row) = data.tables.spells.position(ability) {
			if let Some(links) = data.tables.links.spell(row) {
				handles.extend(links.drivers.iter().copied());
			}
			handles.extend(data.custom_links.foreign_drivers(row).iter().copied());
		}
		handles
	}

	/// First ability whose effect triggers `ability`, preferring drivers that resolve.
	///
	/// Nil when nothing triggers it; not-found when no triggering effect's owner id
	/// resolved.
	pub fn driver_of(&self, ability: u32) -> &SpellData {
		let handles = self.driver_handles(ability);
		match handles.iter().find(|h| h.is_resolved()) {
			Some(&h) => self.resolve(h),
			None if handles.is_empty() => SpellData::nil(),
			None => SpellData::not_found(),
		}
	}

	pub fn drivers(&self, ability: u32) -> Vec<&SpellData> {
		self.driver_handles(ability).into_iter().map(|h| self.resolve(h)).collect()
	}

	pub fn n_drivers(&self, ability: u32) -> usize {
		self.driver_handles(ability).len()
	}

	/// Id of the ability replacing `spell`, 0 when nothing replaces it.
	pub fn replaced_id(&self, spell: u32) -> u32 {
		self.current().custom.replaced_id(spell)
	}

	/// Owning ability of an effect; nil for an unknown effect.
	pub fn effect_owner(&self, effect: u32) -> &SpellData {
		self.effect_links(effect).map_or(SpellData::nil(), |l| self.resolve(l.spell))
	}

	/// Ability triggered by an effect; nil when it triggers nothing.
	pub fn trigger_of(&self, effect: u32) -> &SpellData {
		self.effect_links(effect).map_or(SpellData::nil(), |l| self.resolve(l.trigger))
	}

	/// Ability granted by a talent; nil for an unknown talent.
	pub fn talent_spell(&self, talent: u32) -> &SpellData {
		let data = self.current();
		data.tables
			.talents
			.position(talent)
			.and_then(|row| data.tables.links.talent(row))
			.map_or(SpellData::nil(), |l| self.resolve(l.spell))
	}

	/// Ability named `name`, ignoring ASCII case. Custom abilities are searched first.
	pub fn spell_by_name(&self, name: &str) -> &SpellData {
		let data = self.current();
		let custom = data.custom.spells.iter().find(|s| s.name.eq_ignore_ascii_case(name));
		let id = match custom {
			Some(spell) => spell.id,
			None => data.named_spells.find_first(|s| s.name.eq_ignore_ascii_case(name)).id,
		};
		self.spell(id)
	}

	/// Ability `id`, only if its name matches `name`.
	pub fn spell_confirmed(&self, id: u32, name: &str) -> &SpellData {
		let spell = self.spell(id);
		if spell.found() && spell.name.eq_ignore_ascii_case(name) {
			spell
		} else {
			SpellData::not_found()
		}
	}

	/// Talent named `name`; `spec` 0 matches any specialization.
	pub fn find_talent(&self, name: &str, spec: u32) -> &TalentData {
		self.named_talents()
			.find(|t| t.name.eq_ignore_ascii_case(name) && (spec == 0 || t.spec == spec))
			.unwrap_or(TalentData::not_found())
	}

	/// Talent at a grid cell of a class; `spec` 0 matches any specialization.
	pub fn talent_at(&self, class_mask: u32, row: u32, col: u32, spec: u32) -> &TalentData {
		self.named_talents()
			.find(|t| t.is_class(class_mask) && t.row == row && t.col == col && (spec == 0 || t.spec == spec))
			.unwrap_or(TalentData::not_found())
	}

	fn named_talents(&self) -> impl Iterator<Item = &TalentData> + '_ {
		self.current().named_talents.iter().map(|t| self.talent(t.id))
	}
}
