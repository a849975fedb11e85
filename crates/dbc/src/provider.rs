//! Sources of generated tables.

use grimoire_primitives::DataVariant;

use crate::records::{EffectData, PowerData, Record, SpellData, TalentData};

/// Supplies the generated table of one record kind.
pub trait TableSource<T: Record> {
	/// Rows for `variant`, sorted by id, optionally terminated by an id-0 row. `None` when
	/// the variant has no table of this kind.
	fn provide(&self, variant: DataVariant) -> Option<Vec<T>>;
}

/// A source of every table kind.
pub trait TableProvider:
	TableSource<SpellData> + TableSource<EffectData> + TableSource<PowerData> + TableSource<TalentData>
{
}

impl<P> TableProvider for P where
	P: TableSource<SpellData> + TableSource<EffectData> + TableSource<PowerData> + TableSource<TalentData>
{
}

/// Tables of one variant held in memory.
#[derive(Debug, Clone, Default)]
pub struct VariantTables {
	pub spells: Vec<SpellData>,
	pub effects: Vec<EffectData>,
	pub powers: Vec<PowerData>,
	pub talents: Vec<TalentData>,
}

/// In-memory provider, mostly for tests and embedded datasets.
#[derive(Debug, Clone, Default)]
pub struct StaticTables {
	variants: [Option<VariantTables>; 2],
}

impl StaticTables {
	pub fn new(primary: VariantTables) -> Self {
		Self {
			variants: [Some(primary), None],
		}
	}

	pub fn with_alternate(mut self, alternate: VariantTables) -> Self {
		self.variants[DataVariant::Alternate.index()] = Some(alternate);
		self
	}

	fn tables(&self, variant: DataVariant) -> Option<&VariantTables> {
		self.variants[variant.index()].as_ref()
	}
}

impl TableSource<SpellData> for StaticTables {
	fn provide(&self, variant: DataVariant) -> Option<Vec<SpellData>> {
		self.tables(variant).map(|t| t.spells.clone())
	}
}

impl TableSource<EffectData> for StaticTables {
	fn provide(&self, variant: DataVariant) -> Option<Vec<EffectData>> {
		self.tables(variant).map(|t| t.effects.clone())
	}
}

impl TableSource<PowerData> for StaticTables {
	fn provide(&self, variant: DataVariant) -> Option<Vec<PowerData>> {
		self.tables(variant).map(|t| t.powers.clone())
	}
}

impl TableSource<TalentData> for StaticTables {
	fn provide(&self, variant: DataVariant) -> Option<Vec<TalentData>> {
		self.tables(variant).map(|t| t.talents.clone())
	}
}
