//! Interactive binding session: capture a physical tap and resolve it,
//! or a clicked picker entry, into the selected target slot.
//!
//! The session owns a [`ModifierSet`] plus the currently selected target
//! field. While type-to-bind is armed and a target is selected, one full
//! press/release cycle of a key commits that key's name into the target.
//! The press and the release must be the same key; a release of some
//! other key means presses overlapped (a hold, not a tap) and aborts the
//! capture without a commit.

use tracing::debug;

use crate::error::KeyboardError;
use crate::keycode::{resolve_placeholder, KeyCode};
use crate::modifier::{Modifier, ModifierSet};

/// How a clicked picker entry combines with the session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindKind {
    /// The entry's code is taken verbatim.
    Plain,
    /// The session's modifier mask is composed onto the entry's code.
    Masked,
    /// The entry is a `(kc)` wrapper template; the target's current value
    /// supplies the base key.
    KeyMod,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TapState {
    Idle,
    AwaitingRelease(String),
}

/// Two-phase tap capture plus modifier-mask bookkeeping for one binding
/// dialog.
#[derive(Debug, Clone)]
pub struct TapBindingSession {
    modifiers: ModifierSet,
    target: Option<String>,
    typebind: bool,
    state: TapState,
}

impl Default for TapBindingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TapBindingSession {
    pub fn new() -> Self {
        TapBindingSession {
            modifiers: ModifierSet::new(),
            target: None,
            typebind: true,
            state: TapState::Idle,
        }
    }

    /// Toggle a modifier by name; returns its new state.
    pub fn toggle_modifier(&mut self, name: &str) -> Result<bool, KeyboardError> {
        let m: Modifier = name.parse()?;
        let enabled = self.modifiers.toggle(m);
        debug!(modifier = %m, enabled, mask = self.modifiers.mask());
        Ok(enabled)
    }

    pub fn mask(&self) -> u16 {
        self.modifiers.mask()
    }

    /// Whether the current mask composes with `base` into a nameable code.
    /// Advisory only.
    pub fn mask_is_valid(&self, base: KeyCode) -> bool {
        self.modifiers.is_valid_for(base)
    }

    pub fn select_target(&mut self, field: impl Into<String>) {
        self.target = Some(field.into());
        self.state = TapState::Idle;
    }

    pub fn clear_target(&mut self) {
        self.target = None;
        self.state = TapState::Idle;
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn set_typebind(&mut self, enabled: bool) {
        self.typebind = enabled;
        if !enabled {
            self.state = TapState::Idle;
        }
    }

    /// Type-to-bind is armed and a target is selected.
    pub fn is_active(&self) -> bool {
        self.typebind && self.target.is_some()
    }

    /// Feed a key press. Returns true when the event was consumed by the
    /// capture (the caller should suppress its normal handling).
    pub fn key_down(&mut self, key: &str) -> bool {
        if !self.is_active() {
            return false;
        }
        if self.state == TapState::Idle {
            self.state = TapState::AwaitingRelease(key.to_string());
        }
        true
    }

    /// Feed a key release. Returns the committed key name when this
    /// release completes the tap of the previously pressed key; the
    /// target selection is cleared on commit. Any key-up returns the
    /// machine to idle, so a mismatched release (overlapping presses)
    /// aborts the capture without a commit.
    pub fn key_up(&mut self, key: &str) -> Option<String> {
        if !self.is_active() {
            return None;
        }
        match std::mem::replace(&mut self.state, TapState::Idle) {
            TapState::AwaitingRelease(pressed) if pressed == key => {
                debug!(key, target = ?self.target, "tap committed");
                self.target = None;
                Some(pressed)
            }
            TapState::AwaitingRelease(_) | TapState::Idle => None,
        }
    }

    /// Resolve a clicked picker entry into the value to store, or None
    /// when no target is selected or the entry cannot be resolved. A
    /// successful `KeyMod` resolution clears the target like a tap
    /// commit does; `Plain` and `Masked` leave it selected for the next
    /// click.
    pub fn resolve_click(&mut self, kind: BindKind, key: &str, current: &str) -> Option<String> {
        self.target.as_ref()?;
        match kind {
            BindKind::Plain => Some(key.to_string()),
            BindKind::Masked => {
                let mask = self.modifiers.mask();
                if mask == 0 {
                    return Some(key.to_string());
                }
                match key.parse::<KeyCode>() {
                    Ok(kc) => Some(kc.compose(mask).to_string()),
                    // Not a keycode at all (a macro name, say); the mask
                    // cannot apply, keep the entry untouched.
                    Err(_) => Some(key.to_string()),
                }
            }
            BindKind::KeyMod => {
                let cur = current.parse::<KeyCode>().ok()?;
                let resolved = resolve_placeholder(key, cur);
                self.target = None;
                Some(resolved)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armed() -> TapBindingSession {
        let mut s = TapBindingSession::new();
        s.select_target("tap");
        s
    }

    #[test]
    fn inactive_session_passes_events_through() {
        let mut s = TapBindingSession::new();
        assert!(!s.key_down("KC_A"));
        assert_eq!(s.key_up("KC_A"), None);

        let mut s = armed();
        s.set_typebind(false);
        assert!(!s.key_down("KC_A"));
    }

    #[test]
    fn full_tap_commits_and_clears_target() {
        let mut s = armed();
        assert!(s.is_active());
        assert!(s.key_down("KC_Q"));
        assert_eq!(s.key_up("KC_Q"), Some("KC_Q".to_string()));
        assert_eq!(s.target(), None);
        assert!(!s.is_active());
    }

    #[test]
    fn mismatched_release_aborts_the_tap() {
        let mut s = armed();
        assert!(s.key_down("KC_Q"));
        // A different key came up: presses overlapped, not a tap
        assert_eq!(s.key_up("KC_LSFT"), None);
        // Machine is back in idle; the release of the original key is
        // no longer a pending tap either
        assert_eq!(s.key_up("KC_Q"), None);
        assert_eq!(s.target(), Some("tap"));
    }

    #[test]
    fn second_press_before_release_does_not_replace_pending_key() {
        let mut s = armed();
        assert!(s.key_down("KC_Q"));
        assert!(s.key_down("KC_W"));
        assert_eq!(s.key_up("KC_Q"), Some("KC_Q".to_string()));
    }

    #[test]
    fn release_without_press_commits_nothing() {
        let mut s = armed();
        assert_eq!(s.key_up("KC_Q"), None);
        assert_eq!(s.target(), Some("tap"));
    }

    #[test]
    fn retargeting_resets_pending_tap() {
        let mut s = armed();
        assert!(s.key_down("KC_Q"));
        s.select_target("hold");
        assert_eq!(s.key_up("KC_Q"), None);
        assert_eq!(s.target(), Some("hold"));
    }

    #[test]
    fn toggle_modifier_by_name() {
        let mut s = TapBindingSession::new();
        assert!(s.toggle_modifier("ctrl").unwrap());
        assert!(s.toggle_modifier("SHIFT").unwrap());
        assert_eq!(s.mask(), 0x0300);
        assert!(!s.toggle_modifier("ctrl").unwrap());
        assert_eq!(s.mask(), 0x0200);
        assert!(matches!(
            s.toggle_modifier("SUPERDUPER"),
            Err(KeyboardError::UnknownModifier(_))
        ));
    }

    #[test]
    fn click_without_target_resolves_nothing() {
        let mut s = TapBindingSession::new();
        assert_eq!(s.resolve_click(BindKind::Plain, "KC_A", ""), None);
    }

    #[test]
    fn plain_click_passes_through() {
        let mut s = armed();
        assert_eq!(
            s.resolve_click(BindKind::Plain, "KC_A", "KC_NO"),
            Some("KC_A".to_string())
        );
        // target stays selected for the next click
        assert_eq!(s.target(), Some("tap"));
    }

    #[test]
    fn masked_click_composes_current_mask() {
        let mut s = armed();
        s.toggle_modifier("ctrl").unwrap();
        s.toggle_modifier("shift").unwrap();
        assert_eq!(
            s.resolve_click(BindKind::Masked, "KC_A", "KC_NO"),
            Some("C_S(KC_A)".to_string())
        );

        // Nameless result falls back to a hex literal
        let mut s = armed();
        s.toggle_modifier("rhs").unwrap();
        assert_eq!(
            s.resolve_click(BindKind::Masked, "KC_A", "KC_NO"),
            Some("0x1004".to_string())
        );
    }

    #[test]
    fn masked_click_with_empty_mask_or_odd_entry() {
        let mut s = armed();
        assert_eq!(
            s.resolve_click(BindKind::Masked, "KC_A", "KC_NO"),
            Some("KC_A".to_string())
        );
        s.toggle_modifier("alt").unwrap();
        assert_eq!(
            s.resolve_click(BindKind::Masked, "MACRO_3", "KC_NO"),
            Some("MACRO_3".to_string())
        );
    }

    #[test]
    fn keymod_click_wraps_current_value() {
        let mut s = armed();
        assert_eq!(
            s.resolve_click(BindKind::KeyMod, "LCTL_T(kc)", "LSFT(KC_A)"),
            Some("LCTL_T(KC_A)".to_string())
        );
        // commits like a tap: target cleared
        assert_eq!(s.target(), None);
    }

    #[test]
    fn keymod_click_with_unparseable_current_value() {
        let mut s = armed();
        assert_eq!(s.resolve_click(BindKind::KeyMod, "LCTL_T(kc)", "MACRO_3"), None);
        assert_eq!(s.target(), Some("tap"));
    }
}
