//! Frozen dataset and its construction.
//!
//! # Role
//!
//! [`DbcBuilder`] walks the lifecycle `load → register → finalize`: it indexes and links
//! the generated tables of each variant, collects hotfixes, overrides and custom records,
//! and produces an immutable [`GameData`]. [`Dbc`] is a cheap view binding a `GameData`
//! to one variant; [`lifecycle`] publishes a `GameData` process-wide.
//!
//! # Invariants
//!
//! - The primary variant is always present in a `GameData`; the alternate is optional and
//!   views requesting it fall back to primary when absent.
//! - `GameData` is never mutated after finalize. Readers share it through `Arc`.
//! - Record resolution order: patched overlay (overrides over hotfixes), then custom
//!   arena, then table, then the not-found sentinel.

use grimoire_primitives::{DataVariant, RecordKind};

use crate::config::DbcConfig;
use crate::custom::CustomData;
use crate::error::DbcError;
use crate::hotfix::HotfixRegistry;
use crate::index::{FilteredIndex, Index};
use crate::link::{Handle, LinkGraph, link_arena, link_talents};
use crate::overlay::Overlay;
use crate::overrides::OverrideRegistry;
use crate::provider::{TableProvider, TableSource};
use crate::records::{EffectData, PowerData, Record, SpellData, TalentData};

mod builder;
mod facade;
pub mod lifecycle;

pub use builder::DbcBuilder;
pub use facade::Dbc;

/// Indexed and linked generated tables of one variant.
#[derive(Debug, Clone)]
pub struct Tables {
	pub(crate) spells: Index<SpellData>,
	pub(crate) effects: Index<EffectData>,
	pub(crate) powers: Index<PowerData>,
	pub(crate) talents: Index<TalentData>,
	pub(crate) links: LinkGraph,
}

fn provide<T: Record>(source: &impl TableSource<T>, variant: DataVariant) -> Option<Vec<T>> {
	source.provide(variant)
}

impl Tables {
	/// Indexes and links the tables `provider` has for `variant`.
	///
	/// Returns `Ok(None)` when the provider has no table at all for the variant. The
	/// primary variant must provide every kind.
	pub(crate) fn load(provider: &impl TableProvider, variant: DataVariant) -> Result<Option<Self>, DbcError> {
		let spells = provide::<SpellData>(provider, variant);
		let effects = provide::<EffectData>(provider, variant);
		let powers = provide::<PowerData>(provider, variant);
		let talents = provide::<TalentData>(provider, variant);

		let present = [spells.is_some(), effects.is_some(), powers.is_some(), talents.is_some()];
		if present.iter().all(|p| !p) && variant == DataVariant::Alternate {
			return Ok(None);
		}
		for (kind, present) in RecordKind::ALL.into_iter().zip(present) {
			if present {
				continue;
			}
			if variant == DataVariant::Primary {
				return Err(DbcError::MissingTables { kind });
			}
			tracing::warn!(domain = "dbc", %variant, %kind, "table missing, using an empty table");
		}

		let spells = Index::build("spell", variant, spells.unwrap_or_default())?;
		let effects = Index::build("effect", variant, effects.unwrap_or_default())?;
		let powers = Index::build("power", variant, powers.unwrap_or_default())?;
		let talents = Index::build("talent", variant, talents.unwrap_or_default())?;

		let resolve = |id: u32| spells.position(id).map_or(Handle::NotFound, Handle::Table);
		let mut links = link_arena("table", variant, &spells, &effects, &powers, resolve);
		link_talents(&mut links, &talents, resolve);

		Ok(Some(Self {
			spells,
			effects,
			powers,
			talents,
			links,
		}))
	}

	pub fn spells(&self) -> &Index<SpellData> {
		&self.spells
	}

	pub fn effects(&self) -> &Index<EffectData> {
		&self.effects
	}

	pub fn powers(&self) -> &Index<PowerData> {
		&self.powers
	}

	pub fn talents(&self) -> &Index<TalentData> {
		&self.talents
	}

	pub fn links(&self) -> &LinkGraph {
		&self.links
	}

	pub fn max_id(&self, kind: RecordKind) -> u32 {
		match kind {
			RecordKind::Spell => self.spells.max_id(),
			RecordKind::Effect => self.effects.max_id(),
			RecordKind::Power => self.powers.max_id(),
			RecordKind::Talent => self.talents.max_id(),
		}
	}
}

/// Everything resolved for one variant.
#[derive(Debug, Clone)]
pub struct VariantData {
	pub(crate) variant: DataVariant,
	pub(crate) tables: Tables,
	pub(crate) custom: CustomData,
	pub(crate) custom_links: LinkGraph,
	/// Hotfixes then overrides.
	pub(crate) patched: Overlay,
	/// Overrides only.
	pub(crate) overridden: Overlay,
	pub(crate) named_spells: FilteredIndex<SpellData>,
	pub(crate) named_talents: FilteredIndex<TalentData>,
}

impl VariantData {
	pub fn variant(&self) -> DataVariant {
		self.variant
	}

	pub fn tables(&self) -> &Tables {
		&self.tables
	}

	pub fn custom(&self) -> &CustomData {
		&self.custom
	}

	pub fn custom_links(&self) -> &LinkGraph {
		&self.custom_links
	}

	pub fn patched(&self) -> &Overlay {
		&self.patched
	}

	pub fn overridden(&self) -> &Overlay {
		&self.overridden
	}
}

/// The immutable, fully resolved dataset.
#[derive(Debug, Clone)]
pub struct GameData {
	pub(crate) primary: VariantData,
	pub(crate) alternate: Option<VariantData>,
	pub(crate) hotfixes: HotfixRegistry,
	pub(crate) overrides: OverrideRegistry,
	pub(crate) config: DbcConfig,
}

impl GameData {
	/// Data of `variant`, falling back to primary when the alternate was not loaded.
	pub fn variant(&self, variant: DataVariant) -> &VariantData {
		match variant {
			DataVariant::Alternate => self.alternate.as_ref().unwrap_or(&self.primary),
			DataVariant::Primary => &self.primary,
		}
	}

	pub fn is_loaded(&self, variant: DataVariant) -> bool {
		match variant {
			DataVariant::Primary => true,
			DataVariant::Alternate => self.alternate.is_some(),
		}
	}

	/// Registered hotfixes with their per-variant outcome.
	pub fn hotfixes(&self) -> &HotfixRegistry {
		&self.hotfixes
	}

	pub fn overrides(&self) -> &OverrideRegistry {
		&self.overrides
	}

	pub fn config(&self) -> &DbcConfig {
		&self.config
	}
}
