//! Process-wide dataset slot.
//!
//! # Role
//!
//! [`init`] runs `load → register → finalize` and publishes the resulting [`GameData`];
//! [`get`] hands out [`Dbc`] views of it; [`de_init`] releases it. Readers hold a pinned
//! `Arc`, so a concurrent `de_init` never invalidates a view already handed out.
//!
//! # Invariants
//!
//! - At most one dataset is published at a time. A second `init` without `de_init`
//!   fails with [`DbcError::AlreadyInitialized`] and leaves the published one untouched.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use grimoire_primitives::DataVariant;

use super::{Dbc, DbcBuilder, GameData};
use crate::config::DbcConfig;
use crate::error::DbcError;
use crate::provider::TableProvider;

static DATA: ArcSwapOption<GameData> = ArcSwapOption::const_empty();

/// Builds a dataset from `provider`, lets `register` add hotfixes, overrides and custom
/// records, then finalizes and publishes it.
pub fn init(
	provider: &impl TableProvider,
	config: &DbcConfig,
	register: impl FnOnce(&mut DbcBuilder) -> Result<(), DbcError>,
) -> Result<Arc<GameData>, DbcError> {
	if DATA.load().is_some() {
		return Err(DbcError::AlreadyInitialized);
	}

	let mut builder = DbcBuilder::new(config.clone());
	builder.load(provider)?;
	register(&mut builder)?;
	let data = Arc::new(builder.finalize()?);

	let cur = DATA.load_full();
	if cur.is_some() {
		return Err(DbcError::AlreadyInitialized);
	}
	let prev = DATA.compare_and_swap(&cur, Some(Arc::clone(&data)));
	if prev.is_some() {
		return Err(DbcError::AlreadyInitialized);
	}

	tracing::info!(
		domain = "dbc",
		alternate = data.is_loaded(DataVariant::Alternate),
		hotfixes = data.hotfixes().len(),
		overrides = data.overrides().len(),
		"data layer initialized"
	);
	Ok(data)
}

/// Releases the published dataset. Returns false when nothing was published.
pub fn de_init() -> bool {
	let released = DATA.swap(None).is_some();
	if released {
		tracing::info!(domain = "dbc", "data layer released");
	}
	released
}

pub fn current() -> Option<Arc<GameData>> {
	DATA.load_full()
}

pub fn is_initialized() -> bool {
	DATA.load().is_some()
}

/// View of the published dataset bound to `variant`.
pub fn get(variant: DataVariant) -> Result<Dbc, DbcError> {
	current().map(|data| Dbc::new(data, variant)).ok_or(DbcError::NotInitialized)
}
