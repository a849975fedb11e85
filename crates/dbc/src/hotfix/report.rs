use std::fmt;

use grimoire_primitives::{DataVariant, RecordKind};

use super::{HotfixRegistry, HotfixState};

/// Field change recorded by an applied entry.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
	pub kind: RecordKind,
	pub id: u32,
	pub field: &'static str,
	pub before: f64,
	pub after: f64,
	pub mismatch: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
	pub group: String,
	pub tag: String,
	pub note: String,
	/// `None` for note-only entries.
	pub change: Option<FieldChange>,
}

/// Audit listing of the hotfixes in effect for one variant.
#[derive(Debug, Clone, PartialEq)]
pub struct HotfixReport {
	pub variant: DataVariant,
	pub lines: Vec<ReportLine>,
}

impl HotfixReport {
	pub fn is_empty(&self) -> bool {
		self.lines.is_empty()
	}
}

impl fmt::Display for HotfixReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "hotfixes ({}):", self.variant)?;
		if self.lines.is_empty() {
			return writeln!(f, "  (none)");
		}
		for line in &self.lines {
			write!(f, "  [{}] {}: {}", line.group, line.tag, line.note)?;
			if let Some(change) = &line.change {
				write!(
					f,
					" ({} {} {}: {} -> {})",
					change.kind, change.id, change.field, change.before, change.after
				)?;
				if change.mismatch {
					f.write_str(" [verification mismatch]")?;
				}
			}
			writeln!(f)?;
		}
		Ok(())
	}
}

impl HotfixRegistry {
	/// Applied and note-only entries for `variant`, in registration order. Quiet entries
	/// are omitted.
	pub fn report(&self, variant: DataVariant) -> HotfixReport {
		let lines = self
			.entries
			.iter()
			.filter(|entry| entry.flags().applies_to(variant) && !entry.flags().is_quiet())
			.filter_map(|entry| {
				let change = match (entry.target(), entry.field, entry.state(variant)) {
					(None, _, _) => None,
					(Some(target), Some(field), HotfixState::Applied { before, after, mismatch }) => Some(FieldChange {
						kind: target.kind,
						id: target.id,
						field,
						before,
						after,
						mismatch,
					}),
					_ => return None,
				};
				Some(ReportLine {
					group: entry.group().to_string(),
					tag: entry.tag().to_string(),
					note: entry.note().to_string(),
					change,
				})
			})
			.collect();
		HotfixReport { variant, lines }
	}
}
