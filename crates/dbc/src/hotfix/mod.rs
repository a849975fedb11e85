//! Field-level hotfix registry.
//!
//! # Role
//!
//! Hotfixes correct individual numeric fields of generated records without regenerating
//! the tables. Each entry names a target field, an arithmetic operation and an optional
//! verification value that detects drift in the underlying data. Entries are registered
//! up front, applied per variant in registration order, and kept for auditing.
//!
//! # Invariants
//!
//! - Invalid entries (unknown or read-only field, division by zero, non-finite modifier,
//!   id 0) are rejected at registration and never stored.
//! - An entry is applied at most once per variant; repeated [`HotfixRegistry::apply`]
//!   calls skip entries already applied.
//! - Entries targeting the same field apply in registration order, each seeing the
//!   previous result.

use std::fmt;

use grimoire_primitives::{DataVariant, RecordKind};

use crate::error::HotfixError;
use crate::records::validate_writable;

mod apply;
mod report;

pub use apply::{ApplyMode, ApplySummary, PatchTarget};
pub use report::{FieldChange, HotfixReport, ReportLine};

bitflags::bitflags! {
	/// Variant selection and visibility of a hotfix entry.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
	pub struct HotfixFlags: u8 {
		/// Applies to the primary variant.
		const PRIMARY = 1 << 0;
		/// Applies to the alternate variant.
		const ALTERNATE = 1 << 1;
		/// Omitted from reports; never blocked by strict verification.
		const QUIET = 1 << 2;
		/// Both variants.
		const DEFAULT = Self::PRIMARY.bits() | Self::ALTERNATE.bits();
	}
}

impl Default for HotfixFlags {
	fn default() -> Self {
		Self::DEFAULT
	}
}

impl HotfixFlags {
	pub fn applies_to(self, variant: DataVariant) -> bool {
		match variant {
			DataVariant::Primary => self.contains(Self::PRIMARY),
			DataVariant::Alternate => self.contains(Self::ALTERNATE),
		}
	}

	pub fn is_quiet(self) -> bool {
		self.contains(Self::QUIET)
	}
}

/// Arithmetic applied to the current field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotfixOp {
	Set,
	Add,
	Mul,
	Div,
}

impl HotfixOp {
	pub fn apply(self, current: f64, modifier: f64) -> f64 {
		match self {
			Self::Set => modifier,
			Self::Add => current + modifier,
			Self::Mul => current * modifier,
			Self::Div => current / modifier,
		}
	}
}

impl fmt::Display for HotfixOp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Set => "set",
			Self::Add => "add",
			Self::Mul => "mul",
			Self::Div => "div",
		})
	}
}

/// The record field an entry patches.
#[derive(Debug, Clone, PartialEq)]
pub struct HotfixTarget {
	pub kind: RecordKind,
	pub id: u32,
	pub field: String,
	pub op: HotfixOp,
	pub modifier: f64,
	/// Expected field value before this entry applies.
	pub verification: Option<f64>,
}

impl HotfixTarget {
	pub fn new(kind: RecordKind, id: u32, field: impl Into<String>, op: HotfixOp, modifier: f64) -> Self {
		Self {
			kind,
			id,
			field: field.into(),
			op,
			modifier,
			verification: None,
		}
	}

	pub fn spell(id: u32, field: impl Into<String>, op: HotfixOp, modifier: f64) -> Self {
		Self::new(RecordKind::Spell, id, field, op, modifier)
	}

	pub fn effect(id: u32, field: impl Into<String>, op: HotfixOp, modifier: f64) -> Self {
		Self::new(RecordKind::Effect, id, field, op, modifier)
	}

	pub fn power(id: u32, field: impl Into<String>, op: HotfixOp, modifier: f64) -> Self {
		Self::new(RecordKind::Power, id, field, op, modifier)
	}
}

/// Everything needed to register one entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotfixSpec {
	pub group: String,
	pub tag: String,
	pub note: String,
	pub flags: HotfixFlags,
	/// `None` registers a note-only entry.
	pub target: Option<HotfixTarget>,
}

impl HotfixSpec {
	pub fn new(group: impl Into<String>, tag: impl Into<String>, note: impl Into<String>, target: HotfixTarget) -> Self {
		Self {
			group: group.into(),
			tag: tag.into(),
			note: note.into(),
			flags: HotfixFlags::DEFAULT,
			target: Some(target),
		}
	}
}

/// Index of a registered entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HotfixHandle(u32);

impl HotfixHandle {
	pub fn index(self) -> usize {
		self.0 as usize
	}
}

/// Outcome of an entry for one variant.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum HotfixState {
	#[default]
	Registered,
	Applied {
		before: f64,
		after: f64,
		/// The verification value did not match `before`.
		mismatch: bool,
	},
	/// Strict verification refused the entry.
	Blocked { expected: f64, actual: f64 },
	/// The target record does not exist in the variant.
	Missing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HotfixEntry {
	spec: HotfixSpec,
	/// Target field canonicalized against the record's field table.
	field: Option<&'static str>,
	states: [HotfixState; 2],
}

impl HotfixEntry {
	pub fn spec(&self) -> &HotfixSpec {
		&self.spec
	}

	pub fn group(&self) -> &str {
		&self.spec.group
	}

	pub fn tag(&self) -> &str {
		&self.spec.tag
	}

	pub fn note(&self) -> &str {
		&self.spec.note
	}

	pub fn flags(&self) -> HotfixFlags {
		self.spec.flags
	}

	pub fn target(&self) -> Option<&HotfixTarget> {
		self.spec.target.as_ref()
	}

	pub fn is_note(&self) -> bool {
		self.spec.target.is_none()
	}

	pub fn state(&self, variant: DataVariant) -> HotfixState {
		self.states[variant.index()]
	}
}

/// Ordered collection of hotfix entries.
#[derive(Debug, Clone, Default)]
pub struct HotfixRegistry {
	entries: Vec<HotfixEntry>,
}

impl HotfixRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Validates and stores an entry.
	pub fn register(&mut self, spec: HotfixSpec) -> Result<HotfixHandle, HotfixError> {
		let field = match &spec.target {
			Some(target) => Some(Self::validate(&spec, target)?),
			None => None,
		};
		tracing::trace!(domain = "hotfix", group = %spec.group, tag = %spec.tag, "registered hotfix");
		Ok(self.push(HotfixEntry {
			spec,
			field,
			states: Default::default(),
		}))
	}

	/// Stores an entry that only documents a change.
	pub fn register_note(
		&mut self,
		group: impl Into<String>,
		tag: impl Into<String>,
		note: impl Into<String>,
		flags: HotfixFlags,
	) -> HotfixHandle {
		self.push(HotfixEntry {
			spec: HotfixSpec {
				group: group.into(),
				tag: tag.into(),
				note: note.into(),
				flags,
				target: None,
			},
			field: None,
			states: Default::default(),
		})
	}

	fn validate(spec: &HotfixSpec, target: &HotfixTarget) -> Result<&'static str, HotfixError> {
		let field = validate_writable(target.kind, &target.field)?;
		if target.id == 0 {
			return Err(HotfixError::ReservedId {
				group: spec.group.clone(),
				tag: spec.tag.clone(),
			});
		}
		if !target.modifier.is_finite() {
			return Err(HotfixError::NonFinite {
				group: spec.group.clone(),
				tag: spec.tag.clone(),
				modifier: target.modifier,
			});
		}
		if target.op == HotfixOp::Div && target.modifier == 0.0 {
			return Err(HotfixError::DivideByZero {
				group: spec.group.clone(),
				tag: spec.tag.clone(),
			});
		}
		Ok(field)
	}

	fn push(&mut self, entry: HotfixEntry) -> HotfixHandle {
		let handle = HotfixHandle(self.entries.len() as u32);
		self.entries.push(entry);
		handle
	}

	pub fn entries(&self) -> &[HotfixEntry] {
		&self.entries
	}

	pub fn entry(&self, handle: HotfixHandle) -> Option<&HotfixEntry> {
		self.entries.get(handle.index())
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
