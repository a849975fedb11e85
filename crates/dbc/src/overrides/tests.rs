use grimoire_primitives::{DataVariant, RecordKind};

use super::*;
use crate::error::{FieldError, OverrideError};

#[test]
fn later_registration_replaces_earlier() {
	let mut registry = OverrideRegistry::new();
	registry.register(DataVariant::Primary, RecordKind::Spell, 100, "cooldown_ms", 3000.0).unwrap();
	registry.register(DataVariant::Primary, RecordKind::Spell, 100, "cooldown_ms", 4000.0).unwrap();

	assert_eq!(registry.len(), 1);
	assert_eq!(registry.resolve(DataVariant::Primary, RecordKind::Spell, 100, "cooldown_ms"), Some(4000.0));
}

#[test]
fn keys_are_per_variant_and_kind() {
	let mut registry = OverrideRegistry::new();
	registry.register(DataVariant::Alternate, RecordKind::Effect, 7, "base_value", 12.0).unwrap();

	assert_eq!(registry.resolve(DataVariant::Primary, RecordKind::Effect, 7, "base_value"), None);
	assert_eq!(registry.resolve(DataVariant::Alternate, RecordKind::Power, 7, "base_value"), None);
	assert_eq!(registry.resolve(DataVariant::Alternate, RecordKind::Effect, 7, "base_value"), Some(12.0));
	assert_eq!(registry.for_variant(DataVariant::Primary).count(), 0);
}

#[test]
fn invalid_registrations_are_rejected() {
	let mut registry = OverrideRegistry::new();

	let unknown = registry.register(DataVariant::Primary, RecordKind::Spell, 1, "bogus", 1.0);
	assert!(matches!(unknown, Err(OverrideError::Field(FieldError::Unknown { .. }))));

	let read_only = registry.register(DataVariant::Primary, RecordKind::Effect, 1, "trigger_spell_id", 1.0);
	assert!(matches!(read_only, Err(OverrideError::Field(FieldError::ReadOnly { .. }))));

	let zero = registry.register(DataVariant::Primary, RecordKind::Spell, 0, "rppm", 1.0);
	assert!(matches!(zero, Err(OverrideError::ReservedId { .. })));

	let inf = registry.register(DataVariant::Primary, RecordKind::Spell, 1, "rppm", f64::INFINITY);
	assert!(matches!(inf, Err(OverrideError::NonFinite { .. })));

	assert!(registry.is_empty());
}
