//! Modifier mask algebra for interactive key binding.
//!
//! Each modifier contributes a fixed bit in the high byte of a 16-bit
//! keycode; a [`ModifierSet`] accumulates toggles into a single mask that
//! is later combined with a base key via [`KeyCode::compose`].

use std::fmt;
use std::str::FromStr;

use crate::error::KeyboardError;
use crate::keycode::KeyCode;

/// One togglable modifier flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Ctrl,
    Shift,
    Alt,
    Gui,
    /// Switch the Ctrl/Shift/Alt/Gui bits to the right-hand variants.
    Rhs,
    /// Mark the composed code as mod-tap: modifier when held, key when tapped.
    ModTap,
}

impl Modifier {
    pub const ALL: [Modifier; 6] = [
        Modifier::Ctrl,
        Modifier::Shift,
        Modifier::Alt,
        Modifier::Gui,
        Modifier::Rhs,
        Modifier::ModTap,
    ];

    /// The bit this modifier contributes to the composed keycode.
    pub const fn mask(self) -> u16 {
        match self {
            Modifier::Ctrl => 0x0100,
            Modifier::Shift => 0x0200,
            Modifier::Alt => 0x0400,
            Modifier::Gui => 0x0800,
            Modifier::Rhs => 0x1000,
            Modifier::ModTap => 0x2000,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Modifier::Ctrl => "CTRL",
            Modifier::Shift => "SHIFT",
            Modifier::Alt => "ALT",
            Modifier::Gui => "GUI",
            Modifier::Rhs => "RHS",
            Modifier::ModTap => "MTAP",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Modifier {
    type Err = KeyboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Modifier::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| KeyboardError::UnknownModifier(s.to_string()))
    }
}

/// A set of enabled modifiers, stored as the union of their masks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierSet {
    bits: u16,
}

impl ModifierSet {
    pub const fn new() -> Self {
        ModifierSet { bits: 0 }
    }

    /// Flip one modifier; returns its new state (true = now enabled).
    pub fn toggle(&mut self, m: Modifier) -> bool {
        self.bits ^= m.mask();
        self.is_enabled(m)
    }

    pub fn is_enabled(self, m: Modifier) -> bool {
        self.bits & m.mask() != 0
    }

    /// The combined mask of every enabled modifier.
    pub fn mask(self) -> u16 {
        self.bits
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }

    /// Advisory check that composing this mask onto `base` yields a code
    /// with a canonical name. RHS and MTAP only change other modifiers'
    /// meaning, so they are fine on their own only alongside a real
    /// modifier bit. A false result never blocks composition; the caller
    /// may still emit a hex literal.
    pub fn is_valid_for(self, base: KeyCode) -> bool {
        base.compose(self.bits).is_known()
    }
}

impl fmt::Display for ModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for m in Modifier::ALL {
            if self.is_enabled(m) {
                if !first {
                    f.write_str("+")?;
                }
                f.write_str(m.name())?;
                first = false;
            }
        }
        if first {
            f.write_str("-")?;
        }
        Ok(())
    }
}
