//! Id-indexed views over generated record tables.
//!
//! # Role
//!
//! An [`Index`] owns one table of one record kind for one dataset variant and answers
//! id lookups by binary search. A [`FilteredIndex`] shares the same rows but only exposes
//! those that matched a predicate at build time.
//!
//! # Invariants
//!
//! - Row ids are strictly increasing; violations are rejected by [`Index::build`].
//! - Id 0 never appears as a row: it terminates the table and everything after it is
//!   discarded.
//! - Lookup is total: a missing id yields [`Record::not_found`], never a panic.

use std::sync::Arc;

use grimoire_primitives::DataVariant;

use crate::error::TableError;
use crate::records::Record;

mod filtered;

pub use filtered::FilteredIndex;

/// Sorted, immutable table of one record kind.
#[derive(Debug, Clone)]
pub struct Index<T: Record> {
	label: &'static str,
	variant: DataVariant,
	rows: Arc<[T]>,
}

impl<T: Record> Index<T> {
	/// Builds an index from a generated table.
	///
	/// Rows from the first id-0 terminator onwards are dropped.
	pub fn build(label: &'static str, variant: DataVariant, mut rows: Vec<T>) -> Result<Self, TableError> {
		if let Some(end) = rows.iter().position(|r| r.id() == 0) {
			rows.truncate(end);
		}

		for (row, pair) in rows.windows(2).enumerate() {
			let (prev, id) = (pair[0].id(), pair[1].id());
			if id == prev {
				return Err(TableError::Duplicate {
					label,
					variant,
					row: row + 1,
					id,
				});
			}
			if id < prev {
				return Err(TableError::Unsorted {
					label,
					variant,
					row: row + 1,
					id,
					prev,
				});
			}
		}

		tracing::debug!(domain = "dbc", table = label, %variant, rows = rows.len(), "indexed table");

		Ok(Self {
			label,
			variant,
			rows: rows.into(),
		})
	}

	/// An index with no rows.
	pub fn empty(label: &'static str, variant: DataVariant) -> Self {
		Self {
			label,
			variant,
			rows: Arc::from(Vec::new()),
		}
	}

	pub fn label(&self) -> &'static str {
		self.label
	}

	pub fn variant(&self) -> DataVariant {
		self.variant
	}

	/// Row position of `id`, if present.
	pub fn position(&self, id: u32) -> Option<u32> {
		if id == 0 {
			return None;
		}
		self.rows.binary_search_by_key(&id, |r| r.id()).ok().map(|row| row as u32)
	}

	/// Record with `id`, or the not-found sentinel.
	pub fn lookup(&self, id: u32) -> &T {
		match self.position(id) {
			Some(row) => &self.rows[row as usize],
			None => T::not_found(),
		}
	}

	pub fn contains(&self, id: u32) -> bool {
		self.position(id).is_some()
	}

	pub fn get(&self, row: u32) -> Option<&T> {
		self.rows.get(row as usize)
	}

	pub fn rows(&self) -> &[T] {
		&self.rows
	}

	pub(crate) fn shared_rows(&self) -> Arc<[T]> {
		self.rows.clone()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, T> {
		self.rows.iter()
	}

	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// Largest id in the table, 0 when empty.
	pub fn max_id(&self) -> u32 {
		self.rows.last().map_or(0, |r| r.id())
	}
}

impl<'a, T: Record> IntoIterator for &'a Index<T> {
	type Item = &'a T;
	type IntoIter = std::slice::Iter<'a, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

#[cfg(test)]
mod tests;
