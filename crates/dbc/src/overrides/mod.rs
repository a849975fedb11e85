//! Direct field overrides.
//!
//! # Role
//!
//! An override replaces one field of one record in one variant with a fixed value. It
//! has the highest precedence: it is applied after every hotfix, and it also applies to
//! views that skip hotfixes.
//!
//! # Invariants
//!
//! - One value per (variant, kind, id, field); a later registration replaces the earlier.
//! - Fields are validated at registration against the record's field table.

use grimoire_primitives::{DataVariant, RecordKind};
use rustc_hash::FxHashMap as HashMap;

use crate::error::OverrideError;
use crate::records::validate_writable;

type OverrideKey = (DataVariant, RecordKind, u32, &'static str);

#[derive(Debug, Clone, PartialEq)]
pub struct OverrideEntry {
	pub variant: DataVariant,
	pub kind: RecordKind,
	pub id: u32,
	pub field: &'static str,
	pub value: f64,
}

/// Flat (variant, kind, id, field) to value table, in first-registration order.
#[derive(Debug, Clone, Default)]
pub struct OverrideRegistry {
	entries: Vec<OverrideEntry>,
	by_key: HashMap<OverrideKey, usize>,
}

impl OverrideRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register(
		&mut self,
		variant: DataVariant,
		kind: RecordKind,
		id: u32,
		field: &str,
		value: f64,
	) -> Result<(), OverrideError> {
		let field = validate_writable(kind, field)?;
		if id == 0 {
			return Err(OverrideError::ReservedId {
				kind,
				field: field.to_string(),
			});
		}
		if !value.is_finite() {
			return Err(OverrideError::NonFinite {
				kind,
				id,
				field: field.to_string(),
				value,
			});
		}

		let key = (variant, kind, id, field);
		if let Some(&at) = self.by_key.get(&key) {
			tracing::debug!(domain = "overrides", %variant, %kind, id, field, previous = self.entries[at].value, value, "replaced override");
			self.entries[at].value = value;
			return Ok(());
		}
		tracing::debug!(domain = "overrides", %variant, %kind, id, field, value, "registered override");
		self.by_key.insert(key, self.entries.len());
		self.entries.push(OverrideEntry {
			variant,
			kind,
			id,
			field,
			value,
		});
		Ok(())
	}

	/// Override value for a field, if any.
	pub fn resolve(&self, variant: DataVariant, kind: RecordKind, id: u32, field: &str) -> Option<f64> {
		let field = validate_writable(kind, field).ok()?;
		self.by_key.get(&(variant, kind, id, field)).map(|&at| self.entries[at].value)
	}

	pub fn entries(&self) -> &[OverrideEntry] {
		&self.entries
	}

	/// Entries of one variant, in registration order.
	pub fn for_variant(&self, variant: DataVariant) -> impl Iterator<Item = &OverrideEntry> + '_ {
		self.entries.iter().filter(move |e| e.variant == variant)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

#[cfg(test)]
mod tests;
