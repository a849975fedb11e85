use grimoire_primitives::{DataVariant, RecordKind};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use rustc_hash::FxHashMap as HashMap;

use super::*;
use crate::error::{FieldError, HotfixError};

/// Flat field store keyed by (kind, id, field).
#[derive(Default)]
struct Fields(HashMap<(RecordKind, u32, &'static str), f64>);

impl Fields {
	fn with(kind: RecordKind, id: u32, field: &'static str, value: f64) -> Self {
		let mut fields = Self::default();
		fields.0.insert((kind, id, field), value);
		fields
	}

	fn get(&self, kind: RecordKind, id: u32, field: &'static str) -> f64 {
		self.0[&(kind, id, field)]
	}
}

impl PatchTarget for Fields {
	fn read(&self, kind: RecordKind, id: u32, field: &'static str) -> Option<f64> {
		self.0.get(&(kind, id, field)).copied()
	}

	fn write(&mut self, kind: RecordKind, id: u32, field: &'static str, value: f64) {
		self.0.insert((kind, id, field), value);
	}
}

fn spec(op: HotfixOp, modifier: f64) -> HotfixSpec {
	HotfixSpec::new("2024-01-01", "cd", "Cooldown change", HotfixTarget::spell(100, "cooldown_ms", op, modifier))
}

#[rstest]
#[case(HotfixOp::Set, 5000.0, 5000.0)]
#[case(HotfixOp::Add, -2000.0, 6000.0)]
#[case(HotfixOp::Mul, 0.5, 4000.0)]
#[case(HotfixOp::Div, 4.0, 2000.0)]
fn operations(#[case] op: HotfixOp, #[case] modifier: f64, #[case] expected: f64) {
	let mut registry = HotfixRegistry::new();
	let handle = registry.register(spec(op, modifier)).unwrap();
	let mut fields = Fields::with(RecordKind::Spell, 100, "cooldown_ms", 8000.0);

	let summary = registry.apply(DataVariant::Primary, ApplyMode::Lenient, &mut fields);

	assert_eq!(summary.applied, 1);
	assert_eq!(fields.get(RecordKind::Spell, 100, "cooldown_ms"), expected);
	assert_eq!(
		registry.entry(handle).unwrap().state(DataVariant::Primary),
		HotfixState::Applied {
			before: 8000.0,
			after: expected,
			mismatch: false
		}
	);
}

#[test]
fn registration_rejects_invalid_entries() {
	let mut registry = HotfixRegistry::new();

	let bad_field = registry.register(HotfixSpec::new("g", "t", "n", HotfixTarget::spell(1, "bogus", HotfixOp::Set, 1.0)));
	assert!(matches!(bad_field, Err(HotfixError::Field(FieldError::Unknown { .. }))));

	let read_only = registry.register(HotfixSpec::new("g", "t", "n", HotfixTarget::effect(1, "spell_id", HotfixOp::Set, 1.0)));
	assert!(matches!(read_only, Err(HotfixError::Field(FieldError::ReadOnly { .. }))));

	let div_zero = registry.register(HotfixSpec::new("g", "t", "n", HotfixTarget::spell(1, "rppm", HotfixOp::Div, 0.0)));
	assert!(matches!(div_zero, Err(HotfixError::DivideByZero { .. })));

	let nan = registry.register(HotfixSpec::new("g", "t", "n", HotfixTarget::spell(1, "rppm", HotfixOp::Mul, f64::NAN)));
	assert!(matches!(nan, Err(HotfixError::NonFinite { .. })));

	let zero_id = registry.register(HotfixSpec::new("g", "t", "n", HotfixTarget::spell(0, "rppm", HotfixOp::Set, 1.0)));
	assert!(matches!(zero_id, Err(HotfixError::ReservedId { .. })));

	assert!(registry.is_empty());
}

#[test]
fn entries_chain_in_registration_order() {
	let mut registry = HotfixRegistry::new();
	registry.register(spec(HotfixOp::Add, 1000.0)).unwrap();
	registry.register(spec(HotfixOp::Mul, 2.0)).unwrap();
	let mut fields = Fields::with(RecordKind::Spell, 100, "cooldown_ms", 8000.0);

	registry.apply(DataVariant::Primary, ApplyMode::Lenient, &mut fields);

	assert_eq!(fields.get(RecordKind::Spell, 100, "cooldown_ms"), 18000.0);
}

#[test]
fn reapplying_never_double_counts() {
	let mut registry = HotfixRegistry::new();
	registry.register(spec(HotfixOp::Add, 500.0)).unwrap();
	let mut fields = Fields::with(RecordKind::Spell, 100, "cooldown_ms", 1000.0);

	let first = registry.apply(DataVariant::Primary, ApplyMode::Lenient, &mut fields);
	let second = registry.apply(DataVariant::Primary, ApplyMode::Lenient, &mut fields);

	assert_eq!(first.applied, 1);
	assert_eq!(second, ApplySummary { skipped: 1, ..ApplySummary::default() });
	assert_eq!(fields.get(RecordKind::Spell, 100, "cooldown_ms"), 1500.0);
}

#[test]
fn flags_select_variants() {
	let mut registry = HotfixRegistry::new();
	let handle = registry
		.register(HotfixSpec {
			flags: HotfixFlags::PRIMARY,
			..spec(HotfixOp::Set, 5000.0)
		})
		.unwrap();
	let mut alternate = Fields::with(RecordKind::Spell, 100, "cooldown_ms", 8000.0);

	let summary = registry.apply(DataVariant::Alternate, ApplyMode::Lenient, &mut alternate);

	assert_eq!(summary.applied, 0);
	assert_eq!(alternate.get(RecordKind::Spell, 100, "cooldown_ms"), 8000.0);
	assert_eq!(registry.entry(handle).unwrap().state(DataVariant::Alternate), HotfixState::Registered);
}

#[test]
fn missing_target_is_recorded() {
	let mut registry = HotfixRegistry::new();
	let handle = registry.register(spec(HotfixOp::Set, 1.0)).unwrap();
	let mut fields = Fields::default();

	let summary = registry.apply(DataVariant::Primary, ApplyMode::Lenient, &mut fields);

	assert_eq!(summary.missing, 1);
	assert_eq!(registry.entry(handle).unwrap().state(DataVariant::Primary), HotfixState::Missing);
}

fn verified(modifier: f64, expected: f64, flags: HotfixFlags) -> HotfixSpec {
	let mut target = HotfixTarget::spell(100, "cooldown_ms", HotfixOp::Set, modifier);
	target.verification = Some(expected);
	HotfixSpec {
		flags,
		..HotfixSpec::new("g", "verified", "n", target)
	}
}

#[test]
fn lenient_mode_applies_mismatched_entries() {
	let mut registry = HotfixRegistry::new();
	let handle = registry.register(verified(5000.0, 7000.0, HotfixFlags::DEFAULT)).unwrap();
	let mut fields = Fields::with(RecordKind::Spell, 100, "cooldown_ms", 8000.0);

	let summary = registry.apply(DataVariant::Primary, ApplyMode::Lenient, &mut fields);

	assert_eq!(summary.mismatched, 1);
	assert_eq!(fields.get(RecordKind::Spell, 100, "cooldown_ms"), 5000.0);
	assert!(matches!(
		registry.entry(handle).unwrap().state(DataVariant::Primary),
		HotfixState::Applied { mismatch: true, .. }
	));
}

#[test]
fn strict_mode_blocks_only_loud_mismatches() {
	let mut registry = HotfixRegistry::new();
	let loud = registry.register(verified(5000.0, 7000.0, HotfixFlags::DEFAULT)).unwrap();
	let matching = registry.register(verified(6000.0, 8000.0, HotfixFlags::DEFAULT)).unwrap();
	let quiet = registry
		.register(verified(4000.0, 1.0, HotfixFlags::DEFAULT | HotfixFlags::QUIET))
		.unwrap();
	let mut fields = Fields::with(RecordKind::Spell, 100, "cooldown_ms", 8000.0);

	let summary = registry.apply(DataVariant::Primary, ApplyMode::Strict, &mut fields);

	assert_eq!(summary.blocked, 1);
	assert_eq!(summary.applied, 2);
	assert_eq!(
		registry.entry(loud).unwrap().state(DataVariant::Primary),
		HotfixState::Blocked {
			expected: 7000.0,
			actual: 8000.0
		}
	);
	assert!(matches!(
		registry.entry(matching).unwrap().state(DataVariant::Primary),
		HotfixState::Applied { mismatch: false, .. }
	));
	assert!(matches!(
		registry.entry(quiet).unwrap().state(DataVariant::Primary),
		HotfixState::Applied { mismatch: true, .. }
	));
	assert_eq!(fields.get(RecordKind::Spell, 100, "cooldown_ms"), 4000.0);
}

#[test]
fn report_lists_applied_and_notes_but_not_quiet() {
	let mut registry = HotfixRegistry::new();
	registry.register(spec(HotfixOp::Set, 5000.0)).unwrap();
	registry.register_note("2024-01-02", "notes", "Tooltip only", HotfixFlags::DEFAULT);
	registry
		.register(HotfixSpec {
			flags: HotfixFlags::DEFAULT | HotfixFlags::QUIET,
			..HotfixSpec::new("2024-01-03", "hidden", "Quiet fix", HotfixTarget::spell(100, "gcd_ms", HotfixOp::Set, 1000.0))
		})
		.unwrap();
	registry
		.register(HotfixSpec {
			flags: HotfixFlags::ALTERNATE,
			..HotfixSpec::new("2024-01-04", "alt", "Alternate only", HotfixTarget::spell(100, "rppm", HotfixOp::Set, 2.0))
		})
		.unwrap();
	let mut fields = Fields::with(RecordKind::Spell, 100, "cooldown_ms", 8000.0);
	fields.0.insert((RecordKind::Spell, 100, "gcd_ms"), 1500.0);
	registry.apply(DataVariant::Primary, ApplyMode::Lenient, &mut fields);

	let report = registry.report(DataVariant::Primary);

	assert_eq!(report.lines.len(), 2);
	assert_eq!(
		report.to_string(),
		"hotfixes (primary):\n  [2024-01-01] cd: Cooldown change (spell 100 cooldown_ms: 8000 -> 5000)\n  [2024-01-02] notes: Tooltip only\n"
	);
}

#[test]
fn empty_report() {
	let registry = HotfixRegistry::new();
	let report = registry.report(DataVariant::Alternate);
	assert!(report.is_empty());
	assert_eq!(report.to_string(), "hotfixes (alternate):\n  (none)\n");
}

proptest! {
	#[test]
	fn add_then_subtract_restores(start in -1e6f64..1e6, delta in -1e6f64..1e6) {
		let mut registry = HotfixRegistry::new();
		registry.register(HotfixSpec::new("g", "a", "n", HotfixTarget::spell(1, "rppm", HotfixOp::Add, delta))).unwrap();
		registry.register(HotfixSpec::new("g", "b", "n", HotfixTarget::spell(1, "rppm", HotfixOp::Add, -delta))).unwrap();
		let mut fields = Fields::with(RecordKind::Spell, 1, "rppm", start);
		registry.apply(DataVariant::Primary, ApplyMode::Lenient, &mut fields);
		registry.apply(DataVariant::Primary, ApplyMode::Lenient, &mut fields);
		prop_assert!((fields.get(RecordKind::Spell, 1, "rppm") - start).abs() < 1e-6);
	}

	#[test]
	fn mul_then_div_restores(start in -1e6f64..1e6, factor in 0.01f64..100.0) {
		let mut registry = HotfixRegistry::new();
		registry.register(HotfixSpec::new("g", "a", "n", HotfixTarget::spell(1, "rppm", HotfixOp::Mul, factor))).unwrap();
		registry.register(HotfixSpec::new("g", "b", "n", HotfixTarget::spell(1, "rppm", HotfixOp::Div, factor))).unwrap();
		let mut fields = Fields::with(RecordKind::Spell, 1, "rppm", start);
		registry.apply(DataVariant::Primary, ApplyMode::Lenient, &mut fields);
		prop_assert!((fields.get(RecordKind::Spell, 1, "rppm") - start).abs() <= 1e-9 * start.abs().max(1.0));
	}
}
