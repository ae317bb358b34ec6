//! Customizable keybindings for editor actions.
//!
//! Key-down events reach the core as a [`KeyCode`]; the bindings decide which
//! [`KeyAction`] (if any) the key triggers.

use serde::{Deserialize, Serialize};

/// Keys the editor can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Delete,
    Backspace,
    Escape,
    Enter,
    Space,
    Tab,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    /// A printable key, compared case-insensitively.
    Char(char),
}

impl KeyCode {
    fn matches(&self, other: &KeyCode) -> bool {
        match (self, other) {
            (KeyCode::Char(a), KeyCode::Char(b)) => a.eq_ignore_ascii_case(b),
            _ => self == other,
        }
    }
}

/// Action a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    DeleteSelected,
    NextShape,
    PreviousShape,
    CancelPolygon,
    FinishPolygon,
}

impl KeyAction {
    pub fn name(&self) -> &'static str {
        match self {
            KeyAction::DeleteSelected => "Delete selected",
            KeyAction::NextShape => "Next shape",
            KeyAction::PreviousShape => "Previous shape",
            KeyAction::CancelPolygon => "Cancel polygon",
            KeyAction::FinishPolygon => "Finish polygon",
        }
    }

    pub fn all() -> &'static [KeyAction] {
        &[
            KeyAction::DeleteSelected,
            KeyAction::NextShape,
            KeyAction::PreviousShape,
            KeyAction::CancelPolygon,
            KeyAction::FinishPolygon,
        ]
    }
}

/// One key per action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub delete: KeyCode,
    pub next: KeyCode,
    pub previous: KeyCode,
    pub cancel_polygon: KeyCode,
    pub finish_polygon: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            delete: KeyCode::Delete,
            next: KeyCode::ArrowRight,
            previous: KeyCode::ArrowLeft,
            cancel_polygon: KeyCode::Escape,
            finish_polygon: KeyCode::Enter,
        }
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Action triggered by `key`, if bound.
    pub fn action_for_key(&self, key: KeyCode) -> Option<KeyAction> {
        KeyAction::all()
            .iter()
            .copied()
            .find(|action| self.key_for(*action).matches(&key))
    }

    pub fn key_for(&self, action: KeyAction) -> KeyCode {
        match action {
            KeyAction::DeleteSelected => self.delete,
            KeyAction::NextShape => self.next,
            KeyAction::PreviousShape => self.previous,
            KeyAction::CancelPolygon => self.cancel_polygon,
            KeyAction::FinishPolygon => self.finish_polygon,
        }
    }

    /// Rebind `action`. An action already bound to `key` takes over the key
    /// `action` used before, so no two actions share a key.
    pub fn set_key(&mut self, action: KeyAction, key: KeyCode) {
        let previous = self.key_for(action);
        if let Some(other) = self.action_for_key(key).filter(|a| *a != action) {
            *self.slot(other) = previous;
        }
        *self.slot(action) = key;
    }

    fn slot(&mut self, action: KeyAction) -> &mut KeyCode {
        match action {
            KeyAction::DeleteSelected => &mut self.delete,
            KeyAction::NextShape => &mut self.next,
            KeyAction::PreviousShape => &mut self.previous,
            KeyAction::CancelPolygon => &mut self.cancel_polygon,
            KeyAction::FinishPolygon => &mut self.finish_polygon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let kb = KeyBindings::new();
        assert_eq!(kb.action_for_key(KeyCode::Delete), Some(KeyAction::DeleteSelected));
        assert_eq!(kb.action_for_key(KeyCode::Escape), Some(KeyAction::CancelPolygon));
        assert_eq!(kb.action_for_key(KeyCode::ArrowRight), Some(KeyAction::NextShape));
        assert_eq!(kb.action_for_key(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_char_keys_ignore_case() {
        let mut kb = KeyBindings::new();
        kb.set_key(KeyAction::NextShape, KeyCode::Char('n'));
        assert_eq!(kb.action_for_key(KeyCode::Char('N')), Some(KeyAction::NextShape));
        assert_eq!(kb.action_for_key(KeyCode::ArrowRight), None);
    }

    #[test]
    fn test_rebinding_swaps_conflicts() {
        let mut kb = KeyBindings::new();
        kb.set_key(KeyAction::DeleteSelected, KeyCode::Escape);
        assert_eq!(kb.delete, KeyCode::Escape);
        assert_eq!(kb.cancel_polygon, KeyCode::Delete);
    }

    #[test]
    fn test_serde_roundtrip() {
        let kb = KeyBindings {
            next: KeyCode::Char('n'),
            ..KeyBindings::default()
        };
        let json = serde_json::to_string(&kb).unwrap();
        let back: KeyBindings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kb);
    }
}
