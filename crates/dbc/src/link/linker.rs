use grimoire_primitives::DataVariant;

use super::{Arena, EffectLinks, Handle, LinkGraph, SpellLinks, TalentLinks};
use crate::index::Index;
use crate::records::{EffectData, PowerData, SpellData, TalentData};

/// Slot of `handle` if it points into `arena`.
fn local_slot<T: crate::records::Record>(arena: &impl Arena<T>, handle: Handle) -> Option<u32> {
	match handle {
		Handle::Table(slot) | Handle::Custom(slot) if arena.handle(slot) == handle => Some(slot),
		_ => None,
	}
}

/// Largest effect position attached to an ability.
pub(crate) const MAX_EFFECT_POSITION: u32 = 64;

fn resolve_id(id: u32, resolve: &impl Fn(u32) -> Handle) -> Handle {
	if id == 0 { Handle::Empty } else { resolve(id) }
}

/// Links the abilities, effects and costs of one arena.
///
/// `resolve_spell` maps an ability id to a handle; it is consulted for owners and
/// triggers, so references may leave the arena (custom effects triggering table
/// abilities). Drivers registered on abilities outside the arena land in
/// [`LinkGraph::foreign_drivers`].
pub(crate) fn link_arena(
	label: &'static str,
	variant: DataVariant,
	spells: &impl Arena<SpellData>,
	effects: &impl Arena<EffectData>,
	powers: &impl Arena<PowerData>,
	resolve_spell: impl Fn(u32) -> Handle,
) -> LinkGraph {
	let mut graph = LinkGraph {
		spells: vec![SpellLinks::default(); spells.slots()],
		effects: vec![EffectLinks::default(); effects.slots()],
		..LinkGraph::default()
	};

	for (slot, effect) in effects.iter_slots() {
		let owner = resolve_id(effect.spell_id, &resolve_spell);
		let trigger = resolve_id(effect.trigger_spell_id, &resolve_spell);
		graph.effects[slot as usize] = EffectLinks { spell: owner, trigger };

		match local_slot(spells, owner) {
			Some(_) if effect.position == 0 => {
				tracing::warn!(
					domain = "dbc",
					arena = label,
					%variant,
					effect = effect.id,
					spell = effect.spell_id,
					"effect has position 0, not attached"
				);
			}
			Some(_) if effect.position > MAX_EFFECT_POSITION => {
				tracing::warn!(
					domain = "dbc",
					arena = label,
					%variant,
					effect = effect.id,
					spell = effect.spell_id,
					position = effect.position,
					max = MAX_EFFECT_POSITION,
					"effect position out of range, not attached"
				);
			}
			Some(owner_slot) => {
				let list = &mut graph.spells[owner_slot as usize].effects;
				let at = effect.position as usize - 1;
				if list.len() <= at {
					list.resize(at + 1, Handle::Empty);
				}
				if list[at].is_resolved() {
					tracing::warn!(
						domain = "dbc",
						arena = label,
						%variant,
						effect = effect.id,
						spell = effect.spell_id,
						position = effect.position,
						"duplicate effect position, keeping the first"
					);
				} else {
					list[at] = effects.handle(slot);
				}
			}
			None => {
				tracing::trace!(domain = "dbc", arena = label, %variant, effect = effect.id, ?owner, "effect owner outside arena");
			}
		}

		if !trigger.is_resolved() {
			continue;
		}
		let drivers = match local_slot(spells, trigger) {
			Some(target) => &mut graph.spells[target as usize].drivers,
			None => match trigger {
				Handle::Table(row) => graph.foreign_drivers.entry(row).or_default(),
				_ => continue,
			},
		};
		// An owner id of 0 still names a driver, just not one that resolves.
		let driver = if owner == Handle::Empty { Handle::NotFound } else { owner };
		if !drivers.contains(&driver) {
			drivers.push(driver);
		}
	}

	for (slot, power) in powers.iter_slots() {
		let owner = resolve_id(power.spell_id, &resolve_spell);
		if let Some(owner_slot) = local_slot(spells, owner) {
			graph.spells[owner_slot as usize].powers.push(powers.handle(slot));
		}
	}

	tracing::debug!(
		domain = "dbc",
		arena = label,
		%variant,
		spells = spells.slots(),
		effects = effects.slots(),
		powers = powers.slots(),
		"linked arena"
	);

	graph
}

/// Resolves each talent's granted ability.
pub(crate) fn link_talents(graph: &mut LinkGraph, talents: &Index<TalentData>, resolve_spell: impl Fn(u32) -> Handle) {
	graph.talents = talents
		.iter()
		.map(|talent| TalentLinks {
			spell: resolve_id(talent.spell_id, &resolve_spell),
		})
		.collect();
}
