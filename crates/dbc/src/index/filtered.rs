use std::sync::Arc;

use super::Index;
use crate::records::Record;

/// Subset of an [`Index`] selected once at build time.
///
/// Shares the underlying rows; only the matching row positions are stored, in table order.
#[derive(Debug, Clone)]
pub struct FilteredIndex<T: Record> {
	rows: Arc<[T]>,
	selected: Vec<u32>,
}

impl<T: Record> FilteredIndex<T> {
	pub fn build(index: &Index<T>, predicate: impl Fn(&T) -> bool) -> Self {
		let selected = index
			.iter()
			.enumerate()
			.filter(|(_, r)| predicate(r))
			.map(|(row, _)| row as u32)
			.collect();
		Self {
			rows: index.shared_rows(),
			selected,
		}
	}

	/// Record with `id` if it passed the filter, otherwise the not-found sentinel.
	pub fn lookup(&self, id: u32) -> &T {
		if id == 0 {
			return T::not_found();
		}
		self.selected
			.binary_search_by_key(&id, |&row| self.rows[row as usize].id())
			.map_or(T::not_found(), |at| &self.rows[self.selected[at] as usize])
	}

	/// First retained record in ascending id order matching `predicate`.
	pub fn find_first(&self, predicate: impl Fn(&T) -> bool) -> &T {
		self.iter().find(|r| predicate(r)).unwrap_or(T::not_found())
	}

	pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
		self.selected.iter().map(|&row| &self.rows[row as usize])
	}

	pub fn len(&self) -> usize {
		self.selected.len()
	}

	pub fn is_empty(&self) -> bool {
		self.selected.is_empty()
	}
}
