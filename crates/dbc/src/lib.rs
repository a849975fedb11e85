//! Indexed game-rule record tables.
//!
//! Generated tables of abilities, effects, costs and talents are indexed by id, linked
//! into a navigable graph of integer handles, and corrected at load time by hotfixes,
//! overrides and custom records without touching the tables themselves.
//!
//! # Lifecycle
//!
//! 1. [`DbcBuilder::load`] indexes and links the tables of each variant
//! 2. Hotfixes, overrides and custom records are registered on the builder
//! 3. [`DbcBuilder::finalize`] applies them and freezes a [`GameData`]
//! 4. [`Dbc`] views answer queries against one variant
//!
//! [`lifecycle::init`] runs the sequence and publishes the result process-wide.

/// Data layer configuration.
pub mod config;
/// Custom record overlay.
pub mod custom;
/// Frozen dataset, builder and facade.
pub mod db;
pub mod error;
/// Field-level hotfix registry.
pub mod hotfix;
/// Id-sorted table indexes.
pub mod index;
/// Cross-record link graph.
pub mod link;
pub mod overlay;
/// Direct field overrides.
pub mod overrides;
/// Table providers.
pub mod provider;
/// Record types and their patchable fields.
pub mod records;

pub use config::DbcConfig;
pub use custom::{CustomArena, CustomData};
pub use db::{Dbc, DbcBuilder, GameData, Tables, VariantData, lifecycle};
pub use error::{ConfigError, CustomError, DbcError, FieldError, HotfixError, OverrideError, TableError};
pub use hotfix::{
	ApplyMode, ApplySummary, HotfixFlags, HotfixHandle, HotfixOp, HotfixRegistry, HotfixReport, HotfixSpec,
	HotfixState, HotfixTarget,
};
pub use index::{FilteredIndex, Index};
pub use link::{Handle, LinkGraph};
pub use overrides::OverrideRegistry;
pub use provider::{StaticTables, TableProvider, TableSource, VariantTables};
pub use records::{EffectData, FieldDef, PowerData, Record, SpellData, TalentData};
