use grimoire_primitives::{DataVariant, RecordKind};

/// A field name that cannot be read or patched on a record kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
	#[error("{kind} has no field named {field:?}")]
	Unknown { kind: RecordKind, field: String },
	/// Reference fields and ids are frozen into the link graph.
	#[error("{kind} field {field:?} is read-only")]
	ReadOnly { kind: RecordKind, field: String },
}

/// A generated table that violates the ordering contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
	#[error("{label} ({variant}): row {row} has id {id} after {prev}")]
	Unsorted {
		label: &'static str,
		variant: DataVariant,
		row: usize,
		id: u32,
		prev: u32,
	},
	#[error("{label} ({variant}): duplicate id {id} at row {row}")]
	Duplicate {
		label: &'static str,
		variant: DataVariant,
		row: usize,
		id: u32,
	},
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HotfixError {
	#[error(transparent)]
	Field(#[from] FieldError),
	#[error("hotfix {group}/{tag}: division by zero")]
	DivideByZero { group: String, tag: String },
	#[error("hotfix {group}/{tag}: modifier {modifier} is not finite")]
	NonFinite { group: String, tag: String, modifier: f64 },
	#[error("hotfix {group}/{tag}: target id 0 is reserved")]
	ReservedId { group: String, tag: String },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OverrideError {
	#[error(transparent)]
	Field(#[from] FieldError),
	#[error("override of {kind} {field:?}: id 0 is reserved")]
	ReservedId { kind: RecordKind, field: String },
	#[error("override of {kind} {id} {field:?}: value {value} is not finite")]
	NonFinite {
		kind: RecordKind,
		id: u32,
		field: String,
		value: f64,
	},
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CustomError {
	#[error("custom {kind}: id 0 is reserved")]
	ReservedId { kind: RecordKind },
	#[error("custom {kind} {id} ({variant}) is already registered")]
	Duplicate {
		kind: RecordKind,
		id: u32,
		variant: DataVariant,
	},
	#[error("cannot clone {kind} {id} ({variant}): no such record")]
	CloneSource {
		kind: RecordKind,
		id: u32,
		variant: DataVariant,
	},
	#[error("no free {kind} id left above the largest one ({variant})")]
	IdsExhausted { kind: RecordKind, variant: DataVariant },
	#[error("spell {spell} ({variant}) is already replaced by {replaced_by}")]
	Replaced {
		spell: u32,
		replaced_by: u32,
		variant: DataVariant,
	},
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("invalid data layer config: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Top-level error for building and publishing the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbcError {
	#[error(transparent)]
	Table(#[from] TableError),
	#[error(transparent)]
	Hotfix(#[from] HotfixError),
	#[error(transparent)]
	Override(#[from] OverrideError),
	#[error(transparent)]
	Custom(#[from] CustomError),
	#[error(transparent)]
	Config(#[from] ConfigError),
	#[error("{variant}: {blocked} hotfix entries blocked by verification mismatch")]
	Verification { variant: DataVariant, blocked: usize },
	#[error("primary {kind} table is missing")]
	MissingTables { kind: RecordKind },
	#[error("data layer is already initialized")]
	AlreadyInitialized,
	#[error("data layer is not initialized")]
	NotInitialized,
}
