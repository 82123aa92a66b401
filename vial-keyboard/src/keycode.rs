//! Keycode codec: canonical QMK-style names ↔ 16-bit firmware keycodes.
//!
//! # Syntax
//!
//! ```text
//! KC_A          → KeyCode(0x0004)
//! kc_a          → KeyCode(0x0004)   (case-insensitive)
//! LSFT(KC_A)    → KeyCode(0x0204)   (modifier wrapper)
//! LCTL_T(KC_B)  → KeyCode(0x2105)   (mod-tap wrapper)
//! 0x0304        → KeyCode(0x0304)   (hex literal fallback)
//! ```
//!
//! `Display` is total over the full 16-bit space: a code with no canonical
//! name prints as a `0x` + 4-hex-digit literal, never truncated.

use std::fmt;
use std::str::FromStr;

use crate::error::KeyboardError;

/// A firmware keycode: base key in the low byte, modifier/mod-tap bits above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(pub u16);

impl KeyCode {
    /// KC_NO: no action
    pub const NO: KeyCode = KeyCode(0x0000);
    /// KC_TRNS: fall through to the layer below
    pub const TRNS: KeyCode = KeyCode(0x0001);

    /// Base key with all modifier/transform bits stripped
    pub fn base(self) -> KeyCode {
        KeyCode(self.0 & 0x00FF)
    }

    /// Modifier/transform bits with the base key stripped
    pub fn mod_bits(self) -> u16 {
        self.0 & 0xFF00
    }

    /// Apply a modifier mask by numeric addition.
    ///
    /// Firmware composite codes are defined as the sum of base code and
    /// modifier offset, not a bitwise OR; callers that care about the
    /// result staying nameable pre-validate with
    /// [`ModifierSet::is_valid_for`](crate::modifier::ModifierSet::is_valid_for).
    pub fn compose(self, mask: u16) -> KeyCode {
        KeyCode(self.0.wrapping_add(mask))
    }

    /// Whether this code has a canonical name (true) or only stringifies
    /// as a hex literal (false).
    pub fn is_known(self) -> bool {
        if self.mod_bits() == 0 {
            base_name(self.0).is_some()
        } else {
            wrapper_name(self.mod_bits()).is_some() && base_name(self.base().0).is_some()
        }
    }
}

impl From<u16> for KeyCode {
    fn from(raw: u16) -> Self {
        KeyCode(raw)
    }
}

impl From<KeyCode> for u16 {
    fn from(kc: KeyCode) -> Self {
        kc.0
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mods = self.mod_bits();
        if mods == 0 {
            return match base_name(self.0) {
                Some(name) => f.write_str(name),
                None => write!(f, "0x{:04x}", self.0),
            };
        }
        match (wrapper_name(mods), base_name(self.base().0)) {
            (Some(wrapper), Some(base)) => write!(f, "{wrapper}({base})"),
            _ => write!(f, "0x{:04x}", self.0),
        }
    }
}

impl FromStr for KeyCode {
    type Err = KeyboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        // Hex literal: "0x0304", "0X04"
        if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            return u16::from_str_radix(hex, 16)
                .map(KeyCode)
                .map_err(|_| KeyboardError::UnknownKeyIdentifier(s.to_string()));
        }

        // Wrapper syntax: "LSFT(KC_A)", "LCTL_T(KC_B)". Resolve the inner
        // base name first, then apply the outer modifier transform.
        if let Some((outer, rest)) = s.split_once('(') {
            let inner = rest
                .strip_suffix(')')
                .ok_or_else(|| KeyboardError::UnknownKeyIdentifier(s.to_string()))?;
            let mask = wrapper_mask(outer.trim())
                .ok_or_else(|| KeyboardError::UnknownKeyIdentifier(s.to_string()))?;
            let base = inner.trim().parse::<KeyCode>()?;
            return Ok(KeyCode(mask | base.0));
        }

        base_code(s)
            .map(KeyCode)
            .ok_or_else(|| KeyboardError::UnknownKeyIdentifier(s.to_string()))
    }
}

/// Substitute the current base key into a `(kc)` wrapper template.
///
/// Used when the binding target is itself a modifier-transform wrapper
/// whose argument is "whatever key is currently selected": the current
/// code is stripped to its low byte and stringified into the placeholder,
/// e.g. `"LCTL_T(kc)"` + `LSFT(KC_A)` → `"LCTL_T(KC_A)"`.
pub fn resolve_placeholder(template: &str, current: KeyCode) -> String {
    template.replace("(kc)", &format!("({})", current.base()))
}

/// Canonical names for the base keycode space (low byte).
///
/// USB HID Keyboard/Keypad usage IDs with QMK short names.
const BASE_CODES: &[(u16, &str)] = &[
    (0x00, "KC_NO"),
    (0x01, "KC_TRNS"),
    (0x04, "KC_A"),
    (0x05, "KC_B"),
    (0x06, "KC_C"),
    (0x07, "KC_D"),
    (0x08, "KC_E"),
    (0x09, "KC_F"),
    (0x0A, "KC_G"),
    (0x0B, "KC_H"),
    (0x0C, "KC_I"),
    (0x0D, "KC_J"),
    (0x0E, "KC_K"),
    (0x0F, "KC_L"),
    (0x10, "KC_M"),
    (0x11, "KC_N"),
    (0x12, "KC_O"),
    (0x13, "KC_P"),
    (0x14, "KC_Q"),
    (0x15, "KC_R"),
    (0x16, "KC_S"),
    (0x17, "KC_T"),
    (0x18, "KC_U"),
    (0x19, "KC_V"),
    (0x1A, "KC_W"),
    (0x1B, "KC_X"),
    (0x1C, "KC_Y"),
    (0x1D, "KC_Z"),
    (0x1E, "KC_1"),
    (0x1F, "KC_2"),
    (0x20, "KC_3"),
    (0x21, "KC_4"),
    (0x22, "KC_5"),
    (0x23, "KC_6"),
    (0x24, "KC_7"),
    (0x25, "KC_8"),
    (0x26, "KC_9"),
    (0x27, "KC_0"),
    (0x28, "KC_ENT"),
    (0x29, "KC_ESC"),
    (0x2A, "KC_BSPC"),
    (0x2B, "KC_TAB"),
    (0x2C, "KC_SPC"),
    (0x2D, "KC_MINS"),
    (0x2E, "KC_EQL"),
    (0x2F, "KC_LBRC"),
    (0x30, "KC_RBRC"),
    (0x31, "KC_BSLS"),
    (0x32, "KC_NUHS"),
    (0x33, "KC_SCLN"),
    (0x34, "KC_QUOT"),
    (0x35, "KC_GRV"),
    (0x36, "KC_COMM"),
    (0x37, "KC_DOT"),
    (0x38, "KC_SLSH"),
    (0x39, "KC_CAPS"),
    (0x3A, "KC_F1"),
    (0x3B, "KC_F2"),
    (0x3C, "KC_F3"),
    (0x3D, "KC_F4"),
    (0x3E, "KC_F5"),
    (0x3F, "KC_F6"),
    (0x40, "KC_F7"),
    (0x41, "KC_F8"),
    (0x42, "KC_F9"),
    (0x43, "KC_F10"),
    (0x44, "KC_F11"),
    (0x45, "KC_F12"),
    (0x46, "KC_PSCR"),
    (0x47, "KC_SCRL"),
    (0x48, "KC_PAUS"),
    (0x49, "KC_INS"),
    (0x4A, "KC_HOME"),
    (0x4B, "KC_PGUP"),
    (0x4C, "KC_DEL"),
    (0x4D, "KC_END"),
    (0x4E, "KC_PGDN"),
    (0x4F, "KC_RGHT"),
    (0x50, "KC_LEFT"),
    (0x51, "KC_DOWN"),
    (0x52, "KC_UP"),
    (0x53, "KC_NUM"),
    (0x54, "KC_PSLS"),
    (0x55, "KC_PAST"),
    (0x56, "KC_PMNS"),
    (0x57, "KC_PPLS"),
    (0x58, "KC_PENT"),
    (0x59, "KC_P1"),
    (0x5A, "KC_P2"),
    (0x5B, "KC_P3"),
    (0x5C, "KC_P4"),
    (0x5D, "KC_P5"),
    (0x5E, "KC_P6"),
    (0x5F, "KC_P7"),
    (0x60, "KC_P8"),
    (0x61, "KC_P9"),
    (0x62, "KC_P0"),
    (0x63, "KC_PDOT"),
    (0x64, "KC_NUBS"),
    (0x65, "KC_APP"),
    (0x67, "KC_PEQL"),
    (0x68, "KC_F13"),
    (0x69, "KC_F14"),
    (0x6A, "KC_F15"),
    (0x6B, "KC_F16"),
    (0x6C, "KC_F17"),
    (0x6D, "KC_F18"),
    (0x6E, "KC_F19"),
    (0x6F, "KC_F20"),
    (0x70, "KC_F21"),
    (0x71, "KC_F22"),
    (0x72, "KC_F23"),
    (0x73, "KC_F24"),
    (0xE0, "KC_LCTL"),
    (0xE1, "KC_LSFT"),
    (0xE2, "KC_LALT"),
    (0xE3, "KC_LGUI"),
    (0xE4, "KC_RCTL"),
    (0xE5, "KC_RSFT"),
    (0xE6, "KC_RALT"),
    (0xE7, "KC_RGUI"),
];

/// Modifier/mod-tap wrapper names keyed by the high-byte mask they apply.
///
/// The `_T` forms are mod-tap: modifier when held, wrapped key when tapped.
const WRAPPERS: &[(u16, &str)] = &[
    (0x0100, "LCTL"),
    (0x0200, "LSFT"),
    (0x0400, "LALT"),
    (0x0800, "LGUI"),
    (0x0300, "C_S"),
    (0x0500, "LCA"),
    (0x0600, "LSA"),
    (0x0700, "MEH"),
    (0x0A00, "SGUI"),
    (0x0D00, "LCAG"),
    (0x0F00, "HYPR"),
    (0x1100, "RCTL"),
    (0x1200, "RSFT"),
    (0x1400, "RALT"),
    (0x1800, "RGUI"),
    (0x1300, "RCS"),
    (0x1600, "RSA"),
    (0x2100, "LCTL_T"),
    (0x2200, "LSFT_T"),
    (0x2400, "LALT_T"),
    (0x2800, "LGUI_T"),
    (0x2300, "C_S_T"),
    (0x2500, "LCA_T"),
    (0x2600, "LSA_T"),
    (0x2700, "MEH_T"),
    (0x2A00, "SGUI_T"),
    (0x2D00, "LCAG_T"),
    (0x2F00, "ALL_T"),
    (0x3100, "RCTL_T"),
    (0x3200, "RSFT_T"),
    (0x3400, "RALT_T"),
    (0x3800, "RGUI_T"),
];

fn base_name(code: u16) -> Option<&'static str> {
    BASE_CODES
        .iter()
        .find(|&&(c, _)| c == code)
        .map(|&(_, name)| name)
}

fn base_code(name: &str) -> Option<u16> {
    BASE_CODES
        .iter()
        .find(|&&(_, n)| n.eq_ignore_ascii_case(name))
        .map(|&(c, _)| c)
}

fn wrapper_name(mask: u16) -> Option<&'static str> {
    WRAPPERS
        .iter()
        .find(|&&(m, _)| m == mask)
        .map(|&(_, name)| name)
}

fn wrapper_mask(name: &str) -> Option<u16> {
    WRAPPERS
        .iter()
        .find(|&&(_, n)| n.eq_ignore_ascii_case(name))
        .map(|&(m, _)| m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_names() {
        assert_eq!("KC_A".parse::<KeyCode>().unwrap(), KeyCode(0x04));
        assert_eq!("kc_a".parse::<KeyCode>().unwrap(), KeyCode(0x04));
        assert_eq!("KC_ESC".parse::<KeyCode>().unwrap(), KeyCode(0x29));
        assert_eq!("KC_F24".parse::<KeyCode>().unwrap(), KeyCode(0x73));
        assert_eq!("KC_RGUI".parse::<KeyCode>().unwrap(), KeyCode(0xE7));
        assert_eq!("KC_NO".parse::<KeyCode>().unwrap(), KeyCode::NO);
    }

    #[test]
    fn parse_hex_literals() {
        assert_eq!("0x0004".parse::<KeyCode>().unwrap(), KeyCode(0x04));
        assert_eq!("0x0304".parse::<KeyCode>().unwrap(), KeyCode(0x0304));
        assert_eq!("0X7c00".parse::<KeyCode>().unwrap(), KeyCode(0x7C00));
    }

    #[test]
    fn parse_wrappers() {
        assert_eq!("LSFT(KC_A)".parse::<KeyCode>().unwrap(), KeyCode(0x0204));
        assert_eq!("LCTL(KC_C)".parse::<KeyCode>().unwrap(), KeyCode(0x0106));
        assert_eq!("LCTL_T(KC_B)".parse::<KeyCode>().unwrap(), KeyCode(0x2105));
        assert_eq!("HYPR(KC_SPC)".parse::<KeyCode>().unwrap(), KeyCode(0x0F2C));
        // case-insensitive, tolerant of inner whitespace
        assert_eq!("lsft( kc_a )".parse::<KeyCode>().unwrap(), KeyCode(0x0204));
    }

    #[test]
    fn parse_rejects_unknown() {
        assert!(matches!(
            "KC_BOGUS".parse::<KeyCode>(),
            Err(KeyboardError::UnknownKeyIdentifier(_))
        ));
        assert!(matches!(
            "WAT(KC_A)".parse::<KeyCode>(),
            Err(KeyboardError::UnknownKeyIdentifier(_))
        ));
        assert!(matches!(
            "LSFT(KC_A".parse::<KeyCode>(),
            Err(KeyboardError::UnknownKeyIdentifier(_))
        ));
        assert!(matches!(
            "0xZZZZ".parse::<KeyCode>(),
            Err(KeyboardError::UnknownKeyIdentifier(_))
        ));
    }

    #[test]
    fn stringify_known_codes_round_trip() {
        for &(code, _) in BASE_CODES {
            let kc = KeyCode(code);
            assert_eq!(kc.to_string().parse::<KeyCode>().unwrap(), kc);
        }
        for &(mask, _) in WRAPPERS {
            let kc = KeyCode(mask | 0x04);
            assert!(kc.is_known());
            assert_eq!(kc.to_string().parse::<KeyCode>().unwrap(), kc);
        }
    }

    #[test]
    fn stringify_unknown_codes_hex_round_trip() {
        // Unknown base, unknown wrapper mask, unknown combination
        for raw in [0x0002u16, 0x00A0, 0x7C04, 0x0103, 0xFFFF] {
            let kc = KeyCode(raw);
            assert!(!kc.is_known());
            let s = kc.to_string();
            assert_eq!(s.len(), 6);
            assert!(s.starts_with("0x"));
            assert_eq!(s.parse::<KeyCode>().unwrap(), kc);
        }
    }

    #[test]
    fn compose_is_addition() {
        assert_eq!(KeyCode(0x04).compose(0x0300), KeyCode(0x0304));
        // Overlapping bit ranges are exercised deliberately: addition, not OR
        assert_eq!(KeyCode(0x0304).compose(0x0100), KeyCode(0x0404));
        // Never panics, even on overflow
        assert_eq!(KeyCode(0xFFFF).compose(0x0100), KeyCode(0x00FF));
    }

    #[test]
    fn compose_associates_with_mask_union() {
        // compose(compose(base, m1) - base algebra) vs compose(base, m1|m2)
        // for disjoint masks addition and OR agree
        let base = KeyCode(0x04);
        let m1 = 0x0200;
        let m2 = 0x0100;
        assert_eq!(base.compose(m1).compose(m2), base.compose(m1 | m2));
    }

    #[test]
    fn placeholder_substitution() {
        let cur = "LSFT(KC_A)".parse::<KeyCode>().unwrap();
        assert_eq!(resolve_placeholder("LCTL_T(kc)", cur), "LCTL_T(KC_A)");
        // Mask-stripped: only the low byte of the current code is used
        assert_eq!(resolve_placeholder("MEH(kc)", KeyCode(0x2105)), "MEH(KC_B)");
        // Unknown low byte degrades to a hex literal inside the wrapper
        assert_eq!(
            resolve_placeholder("LGUI_T(kc)", KeyCode(0x00A0)),
            "LGUI_T(0x00a0)"
        );
    }

    #[test]
    fn base_and_mod_bits_split() {
        let kc = KeyCode(0x2105);
        assert_eq!(kc.base(), KeyCode(0x05));
        assert_eq!(kc.mod_bits(), 0x2100);
    }
}
