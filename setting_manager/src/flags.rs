//! Bitmask describing setting capabilities and apply side effects.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Setting flags.
///
/// Bits below 8 are outputs reported by a commit; bits 8..16 are input hints
/// for a pass; bits from 16 up describe provider capabilities. Bits this type
/// does not name are carried through untouched, since flags accumulate across
/// a group fan-out.
///
/// # Examples
///
/// ```
/// use setting_manager::SettingFlags;
/// let mut flags = SettingFlags::from_bits_retain(0x8000_0000);
/// flags |= SettingFlags::OUT_REBOOT_REQUIRED;
/// assert_eq!(flags.bits(), 0x8000_0001);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SettingFlags(u32);

impl SettingFlags {
    /// No flags set.
    pub const EMPTY: Self = Self(0);
    /// The change takes effect after a reboot.
    pub const OUT_REBOOT_REQUIRED: Self = Self(1 << 0);
    /// The requested value was already in effect.
    pub const OUT_ALREADY_SET: Self = Self(1 << 1);
    /// The stored value was changed outside the management channel.
    pub const OUT_CHANGED_OUT_OF_BAND: Self = Self(1 << 2);
    /// The current pass restores default values.
    pub const IN_RESET_TO_DEFAULT: Self = Self(1 << 8);
    /// The setting has no pre-boot user interface.
    pub const NO_PREBOOT_UI: Self = Self(1 << 16);
    /// The setting returns to its default when management is removed.
    pub const RESET_ON_UNENROLL: Self = Self(1 << 17);

    /// Wrap raw bits, keeping any the crate does not name.
    #[must_use]
    pub const fn from_bits_retain(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw bit value.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns `true` when every bit of `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` when any bit of `other` is set.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns `true` when no bit is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Set every bit of `other`.
    pub const fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

impl BitOr for SettingFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for SettingFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for SettingFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::LowerHex for SettingFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}
