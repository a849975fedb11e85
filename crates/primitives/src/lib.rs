//! Core vocabulary shared by the game-rule data layer: dataset variants, record kinds,
//! power types, school masks and packed flag words.

/// Packed attribute and class-family flag words.
pub mod flags;
/// Record kinds held by the data layer.
pub mod kind;
/// Resource (power) types referenced by cost records.
pub mod power;
/// Spell school bit masks.
pub mod school;
/// Dataset variant selection.
pub mod variant;

pub use flags::{AttributeSet, ClassFlags, FlagWordError, NUM_CLASS_FAMILY_FLAGS, NUM_SPELL_FLAGS, SpellAttribute};
pub use kind::RecordKind;
pub use power::PowerType;
pub use school::SchoolMask;
pub use variant::DataVariant;
