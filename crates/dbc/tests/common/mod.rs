//! Shared dataset for data layer integration tests.

use grimoire_dbc::{EffectData, PowerData, SpellData, StaticTables, TalentData, VariantTables};
use grimoire_primitives::{PowerType, SchoolMask, SpellAttribute};

pub const FROSTBOLT: u32 = 116;
pub const ICE_LANCE: u32 = 30455;
pub const FINGERS_OF_FROST: u32 = 44544;
pub const FROZEN_ORB: u32 = 84714;
pub const ORB_DAMAGE: u32 = 84721;

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt::try_init();
}

fn spell(id: u32, name: &'static str) -> SpellData {
	SpellData {
		school: SchoolMask::FROST,
		..SpellData::new(id, name)
	}
}

fn effect(id: u32, spell_id: u32, position: u32) -> EffectData {
	EffectData::new(id, spell_id, position)
}

/// A small frost mage kit: Frostbolt procs Fingers of Frost, Frozen Orb triggers its
/// damage ability, Ice Lance is granted by nothing but costs mana.
fn primary() -> VariantTables {
	let mut frostbolt = spell(FROSTBOLT, "Frostbolt");
	frostbolt.cast_min_ms = 2000;
	frostbolt.cast_max_ms = 2000;
	frostbolt.gcd_ms = 1500;
	frostbolt.max_range = 40.0;

	let mut fof = spell(FINGERS_OF_FROST, "Fingers of Frost");
	fof.attributes.set(SpellAttribute::PASSIVE, true);
	fof.proc_chance = 15;

	let mut orb = spell(FROZEN_ORB, "Frozen Orb");
	orb.cooldown_ms = 60_000;
	orb.duration_ms = 10_000.0;

	VariantTables {
		spells: vec![
			frostbolt,
			spell(ICE_LANCE, "Ice Lance"),
			fof,
			orb,
			spell(ORB_DAMAGE, "Frozen Orb Damage"),
			SpellData::EMPTY,
		],
		effects: vec![
			EffectData {
				sp_coeff: 1.9,
				..effect(11, FROSTBOLT, 1)
			},
			EffectData {
				trigger_spell_id: FINGERS_OF_FROST,
				..effect(12, FROSTBOLT, 2)
			},
			EffectData {
				sp_coeff: 0.47,
				..effect(20, ICE_LANCE, 1)
			},
			EffectData {
				trigger_spell_id: ORB_DAMAGE,
				amplitude_ms: 500.0,
				..effect(40, FROZEN_ORB, 1)
			},
			EffectData {
				sp_coeff: 0.51,
				radius_max: 8.0,
				..effect(41, ORB_DAMAGE, 1)
			},
			EffectData::EMPTY,
		],
		powers: vec![
			PowerData {
				cost: 400,
				..PowerData::new(1, FROSTBOLT, PowerType::Mana)
			},
			PowerData {
				pct_cost: 1.0,
				..PowerData::new(2, ICE_LANCE, PowerType::Mana)
			},
			PowerData {
				cost: 1000,
				..PowerData::new(3, FROZEN_ORB, PowerType::Mana)
			},
		],
		talents: vec![TalentData {
			class_mask: 1 << 7,
			spec: 64,
			row: 3,
			col: 1,
			..TalentData::new(900, "Fingers of Frost", FINGERS_OF_FROST)
		}],
	}
}

/// The same kit one balance pass later: Frozen Orb has a shorter cooldown.
fn alternate() -> VariantTables {
	let mut tables = primary();
	if let Some(orb) = tables.spells.iter_mut().find(|s| s.id == FROZEN_ORB) {
		orb.cooldown_ms = 45_000;
	}
	tables
}

pub fn provider() -> StaticTables {
	StaticTables::new(primary()).with_alternate(alternate())
}
