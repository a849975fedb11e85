//! Packed attribute and class-family flag words.
//!
//! # Role
//!
//! Generated ability records carry their boolean attributes as arrays of 32-bit words.
//! [`AttributeSet`] and [`ClassFlags`] wrap those arrays and expose typed accessors so
//! callers never index words or shift bits by hand.
//!
//! # Invariants
//!
//! - A [`SpellAttribute`] encodes its word in the high byte and its bit in the low byte
//!   (`word << 8 | bit`); the bit is always below 32.
//! - Accessors never panic on out-of-range words; unchecked reads yield `false`/`0`.

use std::fmt;

/// Number of attribute words carried by an ability.
pub const NUM_SPELL_FLAGS: usize = 12;

/// Number of class-family flag words carried by abilities and effects.
pub const NUM_CLASS_FAMILY_FLAGS: usize = 4;

/// Raised when a flag word index exceeds the packed array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("flag word {index} out of range (len {len})")]
pub struct FlagWordError {
	pub index: usize,
	pub len: usize,
}

/// A single ability attribute addressed by word and bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpellAttribute(u32);

impl SpellAttribute {
	/// Ability is passive.
	pub const PASSIVE: Self = Self::new(0, 6);
	/// Ability is hidden from the client spellbook.
	pub const HIDDEN: Self = Self::new(0, 7);
	/// Ability is channeled.
	pub const CHANNELED: Self = Self::new(1, 2);
	/// Ability cannot be reflected.
	pub const NO_REFLECT: Self = Self::new(1, 9);
	/// Periodic effects scale with haste.
	pub const DOT_HASTED: Self = Self::new(5, 13);
	/// Ability cannot crit.
	pub const CANNOT_CRIT: Self = Self::new(2, 29);

	/// Builds an attribute from a word index and a bit within that word.
	///
	/// Bits wrap into the low five bits; callers pass generator constants.
	pub const fn new(word: u32, bit: u32) -> Self {
		Self((word << 8) | (bit & 31))
	}

	/// Rebuilds an attribute from its packed `word << 8 | bit` value.
	pub const fn from_raw(raw: u32) -> Self {
		Self::new(raw >> 8, raw & 0xff)
	}

	pub const fn raw(self) -> u32 {
		self.0
	}

	pub const fn word(self) -> usize {
		(self.0 >> 8) as usize
	}

	pub const fn bit(self) -> u32 {
		self.0 & 0xff
	}

	const fn mask(self) -> u32 {
		1 << self.bit()
	}
}

impl fmt::Display for SpellAttribute {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "attr{}.{}", self.word(), self.bit())
	}
}

/// The twelve attribute words of an ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AttributeSet([u32; NUM_SPELL_FLAGS]);

impl AttributeSet {
	pub const EMPTY: Self = Self([0; NUM_SPELL_FLAGS]);

	pub const fn from_words(words: [u32; NUM_SPELL_FLAGS]) -> Self {
		Self(words)
	}

	/// Builds a set with every listed attribute raised.
	pub fn with(attrs: &[SpellAttribute]) -> Self {
		let mut set = Self::EMPTY;
		for &attr in attrs {
			set.set(attr, true);
		}
		set
	}

	pub fn has(&self, attr: SpellAttribute) -> bool {
		self.0.get(attr.word()).is_some_and(|w| w & attr.mask() != 0)
	}

	/// Raises or clears an attribute. Out-of-range words are ignored.
	pub fn set(&mut self, attr: SpellAttribute, on: bool) {
		if let Some(w) = self.0.get_mut(attr.word()) {
			if on {
				*w |= attr.mask();
			} else {
				*w &= !attr.mask();
			}
		}
	}

	pub fn word(&self, index: usize) -> Result<u32, FlagWordError> {
		self.0.get(index).copied().ok_or(FlagWordError {
			index,
			len: NUM_SPELL_FLAGS,
		})
	}

	pub fn set_word(&mut self, index: usize, value: u32) -> Result<(), FlagWordError> {
		let slot = self.0.get_mut(index).ok_or(FlagWordError {
			index,
			len: NUM_SPELL_FLAGS,
		})?;
		*slot = value;
		Ok(())
	}

	pub fn words(&self) -> &[u32; NUM_SPELL_FLAGS] {
		&self.0
	}

	/// Iterates every raised attribute in word, then bit order.
	pub fn iter(&self) -> impl Iterator<Item = SpellAttribute> + '_ {
		self.0.iter().enumerate().flat_map(|(word, &bits)| {
			(0..32u32)
				.filter(move |bit| bits & (1 << bit) != 0)
				.map(move |bit| SpellAttribute::new(word as u32, bit))
		})
	}
}

/// The class-family mask words used to match effects against abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ClassFlags([u32; NUM_CLASS_FAMILY_FLAGS]);

impl ClassFlags {
	pub const EMPTY: Self = Self([0; NUM_CLASS_FAMILY_FLAGS]);

	pub const fn from_words(words: [u32; NUM_CLASS_FAMILY_FLAGS]) -> Self {
		Self(words)
	}

	/// Tests a flat bit index (`word * 32 + bit`).
	pub fn has(&self, index: u32) -> bool {
		let word = (index / 32) as usize;
		self.0.get(word).is_some_and(|w| w & (1 << (index % 32)) != 0)
	}

	pub fn set(&mut self, index: u32, on: bool) {
		let word = (index / 32) as usize;
		if let Some(w) = self.0.get_mut(word) {
			let mask = 1 << (index % 32);
			if on {
				*w |= mask;
			} else {
				*w &= !mask;
			}
		}
	}

	/// True when any family bit is shared with `other`.
	pub fn intersects(&self, other: &ClassFlags) -> bool {
		self.0.iter().zip(other.0.iter()).any(|(a, b)| a & b != 0)
	}

	pub fn is_empty(&self) -> bool {
		self.0.iter().all(|&w| w == 0)
	}

	pub fn word(&self, index: usize) -> Result<u32, FlagWordError> {
		self.0.get(index).copied().ok_or(FlagWordError {
			index,
			len: NUM_CLASS_FAMILY_FLAGS,
		})
	}

	pub fn set_word(&mut self, index: usize, value: u32) -> Result<(), FlagWordError> {
		let slot = self.0.get_mut(index).ok_or(FlagWordError {
			index,
			len: NUM_CLASS_FAMILY_FLAGS,
		})?;
		*slot = value;
		Ok(())
	}

	pub fn words(&self) -> &[u32; NUM_CLASS_FAMILY_FLAGS] {
		&self.0
	}
}
