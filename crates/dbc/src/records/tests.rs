use grimoire_primitives::{PowerType, RecordKind, SpellAttribute};
use rstest::rstest;

use super::*;
use crate::error::FieldError;

#[test]
fn sentinels_are_distinct_by_address() {
	assert!(SpellData::nil().is_nil());
	assert!(!SpellData::nil().is_not_found());
	assert!(SpellData::not_found().is_not_found());
	assert!(SpellData::nil().found());
	assert!(!SpellData::not_found().found());
	assert_eq!(SpellData::nil(), SpellData::not_found());

	let copy = SpellData::nil().clone();
	assert!(!copy.is_nil(), "a copy is not the singleton");
	assert!(!copy.ok());

	assert!(EffectData::not_found().is_not_found());
	assert!(PowerData::nil().is_nil());
	assert!(TalentData::not_found().is_not_found());
}

#[test]
fn field_roundtrip_through_table() {
	let mut spell = SpellData::new(100, "Fireball");
	spell.set_field("cooldown_ms", 8000.0).unwrap();
	assert_eq!(spell.cooldown_ms, 8000);
	assert_eq!(spell.field("cooldown_ms").unwrap(), 8000.0);
	assert_eq!(spell.cooldown().as_secs(), 8);

	spell.set_field("school", 4.0).unwrap();
	assert_eq!(spell.field("school").unwrap(), 4.0);
}

#[rstest]
#[case(RecordKind::Spell, "id")]
#[case(RecordKind::Effect, "spell_id")]
#[case(RecordKind::Effect, "position")]
#[case(RecordKind::Effect, "trigger_spell_id")]
#[case(RecordKind::Power, "spell_id")]
#[case(RecordKind::Talent, "spell_id")]
fn reference_fields_are_read_only(#[case] kind: RecordKind, #[case] field: &str) {
	assert_eq!(
		validate_writable(kind, field),
		Err(FieldError::ReadOnly {
			kind,
			field: field.to_string()
		})
	);
}

#[test]
fn unknown_field_is_rejected() {
	let mut effect = EffectData::new(1, 2, 1);
	assert!(matches!(effect.set_field("nonsense", 1.0), Err(FieldError::Unknown { .. })));
	assert!(matches!(effect.field("nonsense"), Err(FieldError::Unknown { .. })));
	assert!(validate_writable(RecordKind::Effect, "base_value").is_ok());
}

#[test]
fn field_names_are_unique_per_kind() {
	fn check<T: Record>() {
		let mut names: Vec<_> = T::fields().iter().map(|d| d.name).collect();
		let len = names.len();
		names.sort_unstable();
		names.dedup();
		assert_eq!(names.len(), len, "{} has duplicate field names", T::KIND);
	}
	check::<SpellData>();
	check::<EffectData>();
	check::<PowerData>();
	check::<TalentData>();
}

#[rstest]
#[case(PowerType::Mana, 400, 0.0, 4.0)]
#[case(PowerType::Rage, 150, 0.0, 15.0)]
#[case(PowerType::Energy, 25, 0.0, 25.0)]
#[case(PowerType::Mana, 0, 5.0, 0.05)]
fn power_cost_scaling(#[case] power: PowerType, #[case] flat: i32, #[case] pct: f64, #[case] expected: f64) {
	let mut cost = PowerData::new(1, 10, power);
	cost.cost = flat;
	cost.pct_cost = pct;
	assert!((cost.cost() - expected).abs() < 1e-9);
}

#[test]
fn cast_time_interpolates_by_level() {
	let mut spell = SpellData::new(1, "Bolt");
	spell.cast_min_ms = 1000;
	spell.cast_max_ms = 3000;
	spell.cast_div = 21;
	assert_eq!(spell.cast_time(1).as_millis(), 1000);
	assert_eq!(spell.cast_time(11).as_millis(), 2000);
	assert_eq!(spell.cast_time(90).as_millis(), 3000);

	spell.cast_div = -1;
	spell.cast_min_ms = -5;
	assert_eq!(spell.cast_time(90).as_millis(), 0);
}

#[test]
fn attribute_and_class_helpers() {
	let mut spell = SpellData::new(1, "Aura");
	spell.attributes.set(SpellAttribute::PASSIVE, true);
	assert!(spell.is_passive());
	assert!(spell.is_class(0x8));
	spell.class_mask = 0x8;
	assert!(spell.is_class(0x8));
	assert!(!spell.is_class(0x4));

	let talent = TalentData {
		class_mask: 0x8,
		..TalentData::new(5, "Pyroblast", 1)
	};
	assert!(talent.is_class(0x8));
	assert!(!talent.is_class(0));
}
