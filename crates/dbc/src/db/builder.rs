use grimoire_primitives::{DataVariant, RecordKind};

use super::{GameData, Tables, VariantData};
use crate::config::DbcConfig;
use crate::custom::CustomData;
use crate::error::{CustomError, DbcError};
use crate::hotfix::{ApplySummary, HotfixRegistry};
use crate::index::FilteredIndex;
use crate::link::{Arena, Handle, link_arena};
use crate::overlay::{Overlay, Patcher, apply_overrides, raw};
use crate::overrides::OverrideRegistry;
use crate::provider::TableProvider;
use crate::records::{EffectData, PowerData, Record, SpellData};

/// Builds a [`GameData`] through `load → register → finalize`.
#[derive(Debug)]
pub struct DbcBuilder {
	config: DbcConfig,
	tables: [Option<Tables>; 2],
	custom: [CustomData; 2],
	patched: [Overlay; 2],
	hotfixes: HotfixRegistry,
	overrides: OverrideRegistry,
}

impl DbcBuilder {
	pub fn new(config: DbcConfig) -> Self {
		Self {
			config,
			tables: [None, None],
			custom: DataVariant::ALL.map(CustomData::new),
			patched: Default::default(),
			hotfixes: HotfixRegistry::new(),
			overrides: OverrideRegistry::new(),
		}
	}

	/// Indexes and links the primary tables, and the alternate ones when configured.
	///
	/// A malformed table aborts the load.
	pub fn load(&mut self, provider: &impl TableProvider) -> Result<(), DbcError> {
		self.tables[DataVariant::Primary.index()] = Tables::load(provider, DataVariant::Primary)?;
		if self.config.load_alternate {
			self.tables[DataVariant::Alternate.index()] = Tables::load(provider, DataVariant::Alternate)?;
		}
		for variant in DataVariant::ALL {
			if let Some(tables) = self.loaded(variant) {
				tracing::info!(
					domain = "dbc",
					%variant,
					spells = tables.spells.len(),
					effects = tables.effects.len(),
					powers = tables.powers.len(),
					talents = tables.talents.len(),
					"loaded tables"
				);
			}
		}
		Ok(())
	}

	pub fn config(&self) -> &DbcConfig {
		&self.config
	}

	pub fn is_loaded(&self, variant: DataVariant) -> bool {
		self.tables[variant.index()].is_some()
	}

	pub fn loaded(&self, variant: DataVariant) -> Option<&Tables> {
		self.tables[variant.index()].as_ref()
	}

	pub fn hotfixes(&self) -> &HotfixRegistry {
		&self.hotfixes
	}

	pub fn hotfixes_mut(&mut self) -> &mut HotfixRegistry {
		&mut self.hotfixes
	}

	pub fn overrides(&self) -> &OverrideRegistry {
		&self.overrides
	}

	pub fn overrides_mut(&mut self) -> &mut OverrideRegistry {
		&mut self.overrides
	}

	pub fn custom(&self, variant: DataVariant) -> &CustomData {
		&self.custom[variant.index()]
	}

	pub fn custom_mut(&mut self, variant: DataVariant) -> &mut CustomData {
		&mut self.custom[variant.index()]
	}

	/// Registers that `spell` is replaced by `replaced_by` in `variant`.
	///
	/// Neither id may be 0 and each ability takes one replacement.
	pub fn replace_id(&mut self, variant: DataVariant, spell: u32, replaced_by: u32) -> Result<(), CustomError> {
		self.custom[variant.index()].replace_id(spell, replaced_by)
	}

	/// First id of a run of `count` free ids above every id of `kind` in any loaded table
	/// and any custom arena. Fails when the run would pass `u32::MAX`.
	fn next_ids(&self, variant: DataVariant, kind: RecordKind, count: usize) -> Result<u32, CustomError> {
		let tables = self.tables.iter().flatten().map(|t| t.max_id(kind));
		let custom = self.custom.iter().map(|c| match kind {
			RecordKind::Spell => c.spells.max_id(),
			RecordKind::Effect => c.effects.max_id(),
			RecordKind::Power => c.powers.max_id(),
			RecordKind::Talent => 0,
		});
		let max = tables.chain(custom).max().unwrap_or(0);
		u32::try_from(count)
			.ok()
			.and_then(|count| max.checked_add(count))
			.map(|_| max.saturating_add(1))
			.ok_or(CustomError::IdsExhausted { kind, variant })
	}

	/// Deep-copies an ability with its effects and costs into the custom overlay.
	///
	/// The copy and each of its effects and costs get fresh ids. Triggered abilities are
	/// referenced, not copied. Returns the new ability id. Nothing is added when the id
	/// space of any of the three kinds is exhausted.
	pub fn clone_spell(&mut self, variant: DataVariant, id: u32) -> Result<u32, DbcError> {
		let source_missing = CustomError::CloneSource {
			kind: RecordKind::Spell,
			id,
			variant,
		};
		let Some(tables) = self.tables[variant.index()].as_ref() else {
			return Err(source_missing.into());
		};
		let custom = &self.custom[variant.index()];
		let Some(source) = raw::<SpellData>(tables, custom, id).cloned() else {
			return Err(source_missing.into());
		};

		let (effects, powers): (Vec<EffectData>, Vec<PowerData>) = if custom.find_spell(id).is_some() {
			(
				custom.effects.iter().filter(|e| e.spell_id == id).cloned().collect(),
				custom.powers.iter().filter(|p| p.spell_id == id).cloned().collect(),
			)
		} else {
			let links = tables.spells.position(id).and_then(|row| tables.links.spell(row));
			let table_rows = |handles: &[Handle]| -> Vec<u32> {
				handles
					.iter()
					.filter_map(|h| match h {
						Handle::Table(row) => Some(*row),
						_ => None,
					})
					.collect()
			};
			match links {
				Some(links) => (
					table_rows(&links.effects).into_iter().filter_map(|row| tables.effects.get(row).cloned()).collect(),
					table_rows(&links.powers).into_iter().filter_map(|row| tables.powers.get(row).cloned()).collect(),
				),
				None => (Vec::new(), Vec::new()),
			}
		};

		let spell_id = self.next_ids(variant, RecordKind::Spell, 1)?;
		let effect_base = self.next_ids(variant, RecordKind::Effect, effects.len())?;
		let power_base = self.next_ids(variant, RecordKind::Power, powers.len())?;
		let custom = &mut self.custom[variant.index()];

		let mut spell = source;
		spell.set_id(spell_id);
		custom.add_spell(spell)?;
		for (n, mut effect) in effects.into_iter().enumerate() {
			effect.set_id(effect_base + n as u32);
			effect.spell_id = spell_id;
			custom.add_effect(effect)?;
		}
		for (n, mut power) in powers.into_iter().enumerate() {
			power.set_id(power_base + n as u32);
			power.spell_id = spell_id;
			custom.add_power(power)?;
		}

		tracing::debug!(domain = "custom", %variant, source = id, clone = spell_id, "cloned spell");
		Ok(spell_id)
	}

	/// Applies pending hotfixes to every loaded variant.
	///
	/// Entries already applied are skipped, so calling this again never double-counts.
	/// In strict mode a blocked entry fails with [`DbcError::Verification`].
	pub fn apply_hotfixes(&mut self) -> Result<[ApplySummary; 2], DbcError> {
		let mut summaries = [ApplySummary::default(); 2];
		if !self.config.apply_hotfixes {
			return Ok(summaries);
		}
		let mode = self.config.apply_mode();
		for variant in DataVariant::ALL {
			let i = variant.index();
			let Some(tables) = self.tables[i].as_ref() else {
				continue;
			};
			let mut patcher = Patcher {
				tables,
				custom: &self.custom[i],
				overlay: &mut self.patched[i],
			};
			let summary = self.hotfixes.apply(variant, mode, &mut patcher);
			tracing::info!(
				domain = "hotfix",
				%variant,
				applied = summary.applied,
				skipped = summary.skipped,
				mismatched = summary.mismatched,
				blocked = summary.blocked,
				missing = summary.missing,
				"applied hotfixes"
			);
			summaries[i] = summary;
			if summary.blocked > 0 {
				return Err(DbcError::Verification {
					variant,
					blocked: summary.blocked,
				});
			}
		}
		Ok(summaries)
	}

	/// Applies hotfixes and overrides, links custom records and freezes the dataset.
	pub fn finalize(mut self) -> Result<GameData, DbcError> {
		self.apply_hotfixes()?;

		let mut resolved = [None, None];
		for variant in DataVariant::ALL {
			let i = variant.index();
			let Some(tables) = self.tables[i].take() else {
				if !self.custom[i].is_empty() {
					tracing::warn!(domain = "custom", %variant, "custom records for an unloaded variant are dropped");
				}
				continue;
			};
			let custom = std::mem::replace(&mut self.custom[i], CustomData::new(variant));
			resolved[i] = Some(Self::resolve_variant(variant, tables, custom, std::mem::take(&mut self.patched[i]), &self.overrides));
		}

		let [primary, alternate] = resolved;
		let Some(primary) = primary else {
			return Err(DbcError::MissingTables { kind: RecordKind::Spell });
		};

		Ok(GameData {
			primary,
			alternate,
			hotfixes: self.hotfixes,
			overrides: self.overrides,
			config: self.config,
		})
	}

	fn resolve_variant(
		variant: DataVariant,
		tables: Tables,
		custom: CustomData,
		mut patched: Overlay,
		overrides: &OverrideRegistry,
	) -> VariantData {
		let resolve = |id: u32| match custom.spells.locate(id) {
			Some(slot) => Handle::Custom(slot),
			None => tables.spells.position(id).map_or(Handle::NotFound, Handle::Table),
		};
		let custom_links = link_arena("custom", variant, &custom.spells, &custom.effects, &custom.powers, resolve);

		let mut overridden = Overlay::default();
		let applied = apply_overrides(
			overrides,
			variant,
			&mut Patcher {
				tables: &tables,
				custom: &custom,
				overlay: &mut patched,
			},
		);
		apply_overrides(
			overrides,
			variant,
			&mut Patcher {
				tables: &tables,
				custom: &custom,
				overlay: &mut overridden,
			},
		);

		let named_spells = FilteredIndex::build(&tables.spells, |s| !s.name.is_empty());
		let named_talents = FilteredIndex::build(&tables.talents, |t| !t.name.is_empty());

		tracing::info!(
			domain = "dbc",
			%variant,
			custom_spells = custom.spells.len(),
			custom_effects = custom.effects.len(),
			overrides = applied,
			patched = patched.len(),
			"finalized variant"
		);

		VariantData {
			variant,
			tables,
			custom,
			custom_links,
			patched,
			overridden,
			named_spells,
			named_talents,
		}
	}
}
