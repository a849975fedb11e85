bitflags::bitflags! {
	/// Spell school mask as stored by the generator.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct SchoolMask: u32 {
		/// Physical (melee and ranged weapon) damage.
		const PHYSICAL = 1 << 0;
		/// Holy magic.
		const HOLY = 1 << 1;
		/// Fire magic.
		const FIRE = 1 << 2;
		/// Nature magic.
		const NATURE = 1 << 3;
		/// Frost magic.
		const FROST = 1 << 4;
		/// Shadow magic.
		const SHADOW = 1 << 5;
		/// Arcane magic.
		const ARCANE = 1 << 6;

		/// Frost and fire combined.
		const FROSTFIRE = Self::FROST.bits() | Self::FIRE.bits();
		/// Shadow and fire combined.
		const SHADOWFLAME = Self::SHADOW.bits() | Self::FIRE.bits();
		/// Every school.
		const CHAOS = Self::PHYSICAL.bits()
			| Self::HOLY.bits()
			| Self::FIRE.bits()
			| Self::NATURE.bits()
			| Self::FROST.bits()
			| Self::SHADOW.bits()
			| Self::ARCANE.bits();
	}
}

impl SchoolMask {
	/// True when the mask carries more than one school bit.
	pub fn is_multi_school(self) -> bool {
		self.bits().count_ones() > 1
	}

	/// True when every school in `other` is also in `self`.
	pub fn includes(self, other: SchoolMask) -> bool {
		self.contains(other)
	}
}
