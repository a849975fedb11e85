//! Fixed-shape record types and their field tables.
//!
//! # Role
//!
//! Each record kind implements [`Record`], which ties the type to its [`RecordKind`], its
//! two sentinel singletons and a static table of named numeric fields. Hotfixes and
//! overrides address fields through that table, so patching never needs per-kind code.
//!
//! # Invariants
//!
//! - `nil()` and `not_found()` are distinct statics of id 0; identity is by address.
//! - `id` and every reference field (ids of other records) are read-only in the field
//!   table. Patching them would desynchronize the frozen link graph.

use grimoire_primitives::RecordKind;

use crate::error::FieldError;

mod effect;
mod power;
mod spell;
mod talent;

pub use effect::EffectData;
pub use power::PowerData;
pub use spell::SpellData;
pub use talent::TalentData;

/// Named numeric accessor for one record field.
pub struct FieldDef<T> {
	pub name: &'static str,
	pub get: fn(&T) -> f64,
	/// `None` for read-only fields.
	pub set: Option<fn(&mut T, f64)>,
}

impl<T> FieldDef<T> {
	pub fn is_writable(&self) -> bool {
		self.set.is_some()
	}
}

impl<T> std::fmt::Debug for FieldDef<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FieldDef")
			.field("name", &self.name)
			.field("writable", &self.is_writable())
			.finish()
	}
}

/// Builds a [`FieldDef`] for a plain numeric field.
///
/// `rw` fields convert the patched `f64` back with `as`; `ro` fields have no setter.
macro_rules! field {
	(rw $rec:ty, $field:ident as $t:ty) => {
		$crate::records::FieldDef::<$rec> {
			name: stringify!($field),
			get: |r: &$rec| r.$field as f64,
			set: Some(|r: &mut $rec, v: f64| r.$field = v as $t),
		}
	};
	(ro $rec:ty, $field:ident) => {
		$crate::records::FieldDef::<$rec> {
			name: stringify!($field),
			get: |r: &$rec| r.$field as f64,
			set: None,
		}
	};
}
pub(crate) use field;

/// A row of a generated table.
pub trait Record: Clone + std::fmt::Debug + Send + Sync + 'static {
	const KIND: RecordKind;

	fn id(&self) -> u32;

	/// Reassigns the record id. Used when cloning into the custom overlay.
	fn set_id(&mut self, id: u32);

	/// Empty/default singleton.
	fn nil() -> &'static Self;

	/// Singleton returned when a lookup fails.
	fn not_found() -> &'static Self;

	fn fields() -> &'static [FieldDef<Self>];

	fn is_nil(&self) -> bool {
		std::ptr::eq(self, Self::nil())
	}

	fn is_not_found(&self) -> bool {
		std::ptr::eq(self, Self::not_found())
	}

	/// True unless this is the not-found sentinel. The nil sentinel counts as found.
	fn found(&self) -> bool {
		!self.is_not_found()
	}

	/// True for any real record (non-zero id).
	fn ok(&self) -> bool {
		self.id() != 0
	}

	fn field_def(name: &str) -> Result<&'static FieldDef<Self>, FieldError> {
		Self::fields()
			.iter()
			.find(|def| def.name == name)
			.ok_or_else(|| FieldError::Unknown {
				kind: Self::KIND,
				field: name.to_string(),
			})
	}

	/// Resolves a field that hotfixes and overrides may write.
	fn writable_field(name: &str) -> Result<&'static FieldDef<Self>, FieldError> {
		let def = Self::field_def(name)?;
		if !def.is_writable() {
			return Err(FieldError::ReadOnly {
				kind: Self::KIND,
				field: name.to_string(),
			});
		}
		Ok(def)
	}

	fn field(&self, name: &str) -> Result<f64, FieldError> {
		Self::field_def(name).map(|def| (def.get)(self))
	}

	fn set_field(&mut self, name: &str, value: f64) -> Result<(), FieldError> {
		let def = Self::writable_field(name)?;
		if let Some(set) = def.set {
			set(self, value);
		}
		Ok(())
	}
}

/// Checks a field name against the table of `kind` without a concrete type.
///
/// Returns the canonical static name on success.
pub fn validate_writable(kind: RecordKind, name: &str) -> Result<&'static str, FieldError> {
	match kind {
		RecordKind::Spell => SpellData::writable_field(name).map(|def| def.name),
		RecordKind::Effect => EffectData::writable_field(name).map(|def| def.name),
		RecordKind::Power => PowerData::writable_field(name).map(|def| def.name),
		RecordKind::Talent => TalentData::writable_field(name).map(|def| def.name),
	}
}

#[cfg(test)]
mod tests;
