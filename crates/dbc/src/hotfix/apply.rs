use grimoire_primitives::{DataVariant, RecordKind};

use super::{HotfixRegistry, HotfixState};

/// How verification mismatches are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplyMode {
	/// Log the mismatch, record it, and apply anyway.
	#[default]
	Lenient,
	/// Refuse non-quiet entries whose verification value does not match.
	Strict,
}

/// Field storage hotfixes read from and write to.
pub trait PatchTarget {
	/// Current value of a field, or `None` when the record does not exist.
	fn read(&self, kind: RecordKind, id: u32, field: &'static str) -> Option<f64>;

	fn write(&mut self, kind: RecordKind, id: u32, field: &'static str, value: f64);
}

/// Counts produced by one [`HotfixRegistry::apply`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
	pub applied: usize,
	/// Entries already applied by an earlier pass.
	pub skipped: usize,
	/// Applied entries whose verification value did not match.
	pub mismatched: usize,
	pub blocked: usize,
	pub missing: usize,
}

/// Verification values are compared at five decimal places.
fn same_value(a: f64, b: f64) -> bool {
	(a * 1e5).round() == (b * 1e5).round()
}

impl HotfixRegistry {
	/// Applies every pending entry flagged for `variant`, in registration order.
	pub fn apply(&mut self, variant: DataVariant, mode: ApplyMode, target: &mut impl PatchTarget) -> ApplySummary {
		let mut summary = ApplySummary::default();

		for entry in &mut self.entries {
			let (Some(spec_target), Some(field)) = (entry.spec.target.as_ref(), entry.field) else {
				continue;
			};
			let flags = entry.spec.flags;
			if !flags.applies_to(variant) {
				continue;
			}
			let slot = &mut entry.states[variant.index()];
			if matches!(slot, HotfixState::Applied { .. }) {
				summary.skipped += 1;
				continue;
			}

			let (kind, id) = (spec_target.kind, spec_target.id);
			let Some(before) = target.read(kind, id, field) else {
				tracing::warn!(
					domain = "hotfix",
					group = %entry.spec.group,
					tag = %entry.spec.tag,
					%kind,
					id,
					%variant,
					"hotfix target does not exist"
				);
				*slot = HotfixState::Missing;
				summary.missing += 1;
				continue;
			};

			let mismatch = spec_target.verification.is_some_and(|expected| !same_value(expected, before));
			if mismatch {
				let expected = spec_target.verification.unwrap_or(before);
				if mode == ApplyMode::Strict && !flags.is_quiet() {
					tracing::error!(
						domain = "hotfix",
						group = %entry.spec.group,
						tag = %entry.spec.tag,
						%kind,
						id,
						field,
						expected,
						actual = before,
						%variant,
						"verification mismatch, hotfix blocked"
					);
					*slot = HotfixState::Blocked { expected, actual: before };
					summary.blocked += 1;
					continue;
				}
				tracing::warn!(
					domain = "hotfix",
					group = %entry.spec.group,
					tag = %entry.spec.tag,
					%kind,
					id,
					field,
					expected,
					actual = before,
					%variant,
					"verification mismatch"
				);
			}

			let value = spec_target.op.apply(before, spec_target.modifier);
			target.write(kind, id, field, value);
			let after = target.read(kind, id, field).unwrap_or(value);

			tracing::debug!(
				domain = "hotfix",
				group = %entry.spec.group,
				tag = %entry.spec.tag,
				%kind,
				id,
				field,
				op = %spec_target.op,
				before,
				after,
				%variant,
				"applied hotfix"
			);
			*slot = HotfixState::Applied { before, after, mismatch };
			summary.applied += 1;
			if mismatch {
				summary.mismatched += 1;
			}
		}

		summary
	}
}
