//! Cross-record links resolved once after indexing.
//!
//! # Role
//!
//! Tables reference each other by id. The linker turns those ids into [`Handle`]s (plain
//! integers into a table or the custom arena) and stores them in a [`LinkGraph`] per
//! arena, so navigation never repeats the binary search and never needs pointers.
//!
//! # Invariants
//!
//! - Resolution is total: id 0 is [`Handle::Empty`], an unresolved id is
//!   [`Handle::NotFound`]. Neither is an error.
//! - An ability's effect list is ordered by the effects' 1-based position; gaps are
//!   [`Handle::Empty`].
//! - Triggers are resolved one level deep. Each trigger registers the effect's owning
//!   ability (which may itself be [`Handle::NotFound`]) as a driver of the triggered ability.

use rustc_hash::FxHashMap as HashMap;
use smallvec::SmallVec;

use crate::records::Record;

mod linker;

pub(crate) use linker::{link_arena, link_talents};

/// Resolved, non-owning reference to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
	/// Reference id was 0; resolves to the nil sentinel.
	Empty,
	/// Reference id did not resolve; resolves to the not-found sentinel.
	NotFound,
	/// Row of the generated table.
	Table(u32),
	/// Slot of the custom arena.
	Custom(u32),
}

impl Handle {
	pub fn is_resolved(self) -> bool {
		matches!(self, Self::Table(_) | Self::Custom(_))
	}
}

/// Links held by one ability.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpellLinks {
	/// Indexed by position - 1.
	pub effects: SmallVec<[Handle; 4]>,
	/// In table order.
	pub powers: SmallVec<[Handle; 2]>,
	/// Owning abilities of effects that trigger this ability.
	pub drivers: SmallVec<[Handle; 1]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectLinks {
	pub spell: Handle,
	pub trigger: Handle,
}

impl Default for EffectLinks {
	fn default() -> Self {
		Self {
			spell: Handle::NotFound,
			trigger: Handle::Empty,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TalentLinks {
	pub spell: Handle,
}

/// Links of every record in one arena, indexed by arena slot.
#[derive(Debug, Clone, Default)]
pub struct LinkGraph {
	pub(crate) spells: Vec<SpellLinks>,
	pub(crate) effects: Vec<EffectLinks>,
	pub(crate) talents: Vec<TalentLinks>,
	/// Drivers registered on abilities outside this arena, keyed by their table row.
	pub(crate) foreign_drivers: HashMap<u32, SmallVec<[Handle; 1]>>,
}

impl LinkGraph {
	pub fn spell(&self, slot: u32) -> Option<&SpellLinks> {
		self.spells.get(slot as usize)
	}

	pub fn effect(&self, slot: u32) -> Option<&EffectLinks> {
		self.effects.get(slot as usize)
	}

	pub fn talent(&self, slot: u32) -> Option<&TalentLinks> {
		self.talents.get(slot as usize)
	}

	/// Drivers this arena registered on a table ability at `row`.
	pub fn foreign_drivers(&self, row: u32) -> &[Handle] {
		self.foreign_drivers.get(&row).map_or(&[], |d| d.as_slice())
	}
}

/// Storage addressable by the linker: a generated table or the custom arena.
pub trait Arena<T: Record> {
	fn slots(&self) -> usize;

	fn at(&self, slot: u32) -> Option<&T>;

	/// Slot holding `id`.
	fn locate(&self, id: u32) -> Option<u32>;

	/// Wraps a slot of this arena.
	fn handle(&self, slot: u32) -> Handle;

	fn iter_slots(&self) -> impl Iterator<Item = (u32, &T)> {
		(0..self.slots() as u32).filter_map(move |slot| self.at(slot).map(|r| (slot, r)))
	}
}

impl<T: Record> Arena<T> for crate::index::Index<T> {
	fn slots(&self) -> usize {
		self.len()
	}

	fn at(&self, slot: u32) -> Option<&T> {
		self.get(slot)
	}

	fn locate(&self, id: u32) -> Option<u32> {
		self.position(id)
	}

	fn handle(&self, slot: u32) -> Handle {
		Handle::Table(slot)
	}
}
