//! Key binding configuration.
//!
//! Key bindings map key names (e.g. `"j"`, `"gg"`, `"Ctrl+c"`, `"Enter"`) to
//! [`Action`] values. The default bindings follow vim conventions, with
//! `Ctrl` combos for search and the clipboard.
//!
//! TOML files still use string action identifiers (e.g. `"cursor_down"`);
//! these are resolved to [`Action`] via [`ActionRegistry::find_by_id`] at load time.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionRegistry};
use crate::error::{CoreError, CoreResult};

/// Raw TOML representation — deserialized first, then resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawKeymap {
    #[serde(default)]
    bindings: HashMap<String, String>,
}

/// Complete set of key bindings.
///
/// Stores bindings as a `HashMap<String, Action>` for O(1) lookup.
/// The default instance provides vim-style navigation.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<String, Action>,
    /// Reverse map: Action → list of key strings (for the help overlay).
    reverse: HashMap<Action, Vec<String>>,
}

impl Default for Keymap {
    fn default() -> Self {
        let mut bindings = HashMap::new();

        // Navigation
        bindings.insert("j".to_string(), Action::CursorDown);
        bindings.insert("k".to_string(), Action::CursorUp);
        bindings.insert("h".to_string(), Action::GoParent);
        bindings.insert("l".to_string(), Action::Open);
        bindings.insert("Enter".to_string(), Action::Open);
        bindings.insert("gg".to_string(), Action::CursorTop);
        bindings.insert("G".to_string(), Action::CursorBottom);
        bindings.insert("r".to_string(), Action::Refresh);

        // Search
        bindings.insert("/".to_string(), Action::Search);
        bindings.insert("Ctrl+f".to_string(), Action::Search);

        // File operations
        bindings.insert("Ctrl+c".to_string(), Action::Copy);
        bindings.insert("Ctrl+v".to_string(), Action::Paste);
        bindings.insert("dd".to_string(), Action::Delete);
        bindings.insert("R".to_string(), Action::Rename);
        bindings.insert("n".to_string(), Action::NewFile);
        bindings.insert("N".to_string(), Action::NewDir);

        // Misc
        bindings.insert("q".to_string(), Action::Quit);
        bindings.insert("?".to_string(), Action::Help);

        let reverse = build_reverse(&bindings);
        Self { bindings, reverse }
    }
}

/// How a key string in the keymap is triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCombo {
    /// A single key press (`"j"`, `"Enter"`).
    Single,
    /// The same character pressed twice in quick succession (`"dd"`).
    DoubleTap(char),
    /// A key pressed while a modifier is held (`"Ctrl+c"`).
    Modifier,
}

impl KeyCombo {
    /// Classifies a key string.
    pub fn classify(key: &str) -> Self {
        if key.starts_with("Ctrl+") || key.starts_with("Alt+") {
            return Self::Modifier;
        }
        let mut chars = key.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(a), Some(b), None) if a == b => Self::DoubleTap(a),
            _ => Self::Single,
        }
    }
}

/// Builds the reverse mapping from Action → Vec<key string>.
fn build_reverse(bindings: &HashMap<String, Action>) -> HashMap<Action, Vec<String>> {
    let mut reverse: HashMap<Action, Vec<String>> = HashMap::new();
    for (key, action) in bindings {
        reverse.entry(*action).or_default().push(key.clone());
    }
    // Sort keys for deterministic display
    for keys in reverse.values_mut() {
        keys.sort();
    }
    reverse
}

impl Keymap {
    /// Loads key bindings from a TOML file at `path`.
    ///
    /// String action identifiers are resolved via `ActionRegistry`.
    /// Unknown action strings are silently ignored.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::from_io(e, path))?;
        let raw: RawKeymap =
            toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))?;
        Ok(Self::from_raw(raw))
    }

    /// Converts a raw (string-based) keymap into a resolved one.
    fn from_raw(raw: RawKeymap) -> Self {
        let registry = ActionRegistry::new();
        let bindings: HashMap<String, Action> = raw
            .bindings
            .into_iter()
            .filter_map(|(key, action_id)| match registry.find_by_id(&action_id) {
                Some(action) => Some((key, action)),
                None => {
                    tracing::warn!(%key, action = %action_id, "unknown action in keymap");
                    None
                }
            })
            .collect();
        let reverse = build_reverse(&bindings);
        Self { bindings, reverse }
    }

    /// Returns the action mapped to `key`, or `None` if unbound.
    pub fn action_for_key(&self, key: &str) -> Option<Action> {
        self.bindings.get(key).copied()
    }

    /// Returns the key(s) bound to a given action (for the help overlay).
    pub fn keys_for_action(&self, action: Action) -> Option<&[String]> {
        self.reverse.get(&action).map(|v| v.as_slice())
    }

    /// `true` if pressing `c` twice is bound, so a first press must arm rather than fire.
    pub fn is_double_tap_prefix(&self, c: char) -> bool {
        self.bindings
            .keys()
            .any(|k| KeyCombo::classify(k) == KeyCombo::DoubleTap(c))
    }

    /// Returns all bindings (for iteration / display).
    pub fn bindings(&self) -> &HashMap<String, Action> {
        &self.bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_keymap_has_navigation_keys() {
        let keymap = Keymap::default();

        assert_eq!(keymap.action_for_key("j"), Some(Action::CursorDown));
        assert_eq!(keymap.action_for_key("k"), Some(Action::CursorUp));
        assert_eq!(keymap.action_for_key("h"), Some(Action::GoParent));
        assert_eq!(keymap.action_for_key("l"), Some(Action::Open));
        assert_eq!(keymap.action_for_key("Enter"), Some(Action::Open));
        assert_eq!(keymap.action_for_key("gg"), Some(Action::CursorTop));
        assert_eq!(keymap.action_for_key("G"), Some(Action::CursorBottom));
    }

    #[test]
    fn default_keymap_has_modifier_combos() {
        let keymap = Keymap::default();

        assert_eq!(keymap.action_for_key("Ctrl+f"), Some(Action::Search));
        assert_eq!(keymap.action_for_key("Ctrl+c"), Some(Action::Copy));
        assert_eq!(keymap.action_for_key("Ctrl+v"), Some(Action::Paste));
    }

    #[test]
    fn default_keymap_has_misc_keys() {
        let keymap = Keymap::default();

        assert_eq!(keymap.action_for_key("/"), Some(Action::Search));
        assert_eq!(keymap.action_for_key("dd"), Some(Action::Delete));
        assert_eq!(keymap.action_for_key("r"), Some(Action::Refresh));
        assert_eq!(keymap.action_for_key("q"), Some(Action::Quit));
        assert_eq!(keymap.action_for_key("?"), Some(Action::Help));
    }

    #[test]
    fn default_keymap_has_rename_and_create() {
        let keymap = Keymap::default();

        assert_eq!(keymap.action_for_key("R"), Some(Action::Rename));
        assert_eq!(keymap.action_for_key("n"), Some(Action::NewFile));
        assert_eq!(keymap.action_for_key("N"), Some(Action::NewDir));
        // lowercase r stays refresh
        assert_eq!(keymap.action_for_key("r"), Some(Action::Refresh));
    }

    #[test]
    fn single_tap_of_combo_key_is_unbound() {
        let keymap = Keymap::default();
        assert_eq!(keymap.action_for_key("g"), None);
        assert_eq!(keymap.action_for_key("d"), None);
    }

    #[test]
    fn action_for_unknown_key_returns_none() {
        let keymap = Keymap::default();
        assert_eq!(keymap.action_for_key("z"), None);
        assert_eq!(keymap.action_for_key(""), None);
        assert_eq!(keymap.action_for_key("Ctrl+x"), None);
    }

    #[test]
    fn classify_key_strings() {
        assert_eq!(KeyCombo::classify("j"), KeyCombo::Single);
        assert_eq!(KeyCombo::classify("Enter"), KeyCombo::Single);
        assert_eq!(KeyCombo::classify("gg"), KeyCombo::DoubleTap('g'));
        assert_eq!(KeyCombo::classify("dd"), KeyCombo::DoubleTap('d'));
        assert_eq!(KeyCombo::classify("ab"), KeyCombo::Single);
        assert_eq!(KeyCombo::classify("Ctrl+c"), KeyCombo::Modifier);
    }

    #[test]
    fn double_tap_prefixes() {
        let keymap = Keymap::default();
        assert!(keymap.is_double_tap_prefix('g'));
        assert!(keymap.is_double_tap_prefix('d'));
        assert!(!keymap.is_double_tap_prefix('j'));
    }

    #[test]
    fn load_custom_keymap() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("keymap.toml");
        fs::write(
            &path,
            r#"
[bindings]
j = "cursor_up"
k = "cursor_down"
x = "quit"
xx = "delete"
"Ctrl+y" = "copy"
"#,
        )
        .unwrap();

        let keymap = Keymap::load(&path).unwrap();

        assert_eq!(keymap.action_for_key("j"), Some(Action::CursorUp));
        assert_eq!(keymap.action_for_key("k"), Some(Action::CursorDown));
        assert_eq!(keymap.action_for_key("x"), Some(Action::Quit));
        assert_eq!(keymap.action_for_key("Ctrl+y"), Some(Action::Copy));
        assert!(keymap.is_double_tap_prefix('x'));
        // no merging with defaults
        assert_eq!(keymap.action_for_key("h"), None);
        assert!(!keymap.is_double_tap_prefix('d'));
    }

    #[test]
    fn load_custom_keymap_ignores_unknown_actions() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("keymap.toml");
        fs::write(
            &path,
            r#"
[bindings]
j = "cursor_down"
x = "nonexistent_action"
"#,
        )
        .unwrap();

        let keymap = Keymap::load(&path).unwrap();
        assert_eq!(keymap.action_for_key("j"), Some(Action::CursorDown));
        assert_eq!(keymap.action_for_key("x"), None);
    }

    #[test]
    fn load_empty_keymap_has_no_bindings() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("keymap.toml");
        fs::write(&path, "").unwrap();

        let keymap = Keymap::load(&path).unwrap();
        assert!(keymap.bindings().is_empty());
    }

    #[test]
    fn load_nonexistent_returns_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = Keymap::load(&tmp.path().join("nope.toml"));
        assert!(matches!(result.unwrap_err(), CoreError::NotFound(_)));
    }

    #[test]
    fn load_invalid_toml_returns_config_parse() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("keymap.toml");
        fs::write(&path, "invalid[[[toml").unwrap();

        let result = Keymap::load(&path);
        assert!(matches!(result.unwrap_err(), CoreError::ConfigParse(_)));
    }

    #[test]
    fn keys_for_action_returns_sorted_keys() {
        let keymap = Keymap::default();
        let keys = keymap.keys_for_action(Action::Open).unwrap();
        assert_eq!(keys, ["Enter".to_string(), "l".to_string()]);
    }

    #[test]
    fn keys_for_action_unbound_returns_none() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("keymap.toml");
        fs::write(&path, "[bindings]\nq = \"quit\"\n").unwrap();

        let keymap = Keymap::load(&path).unwrap();
        assert!(keymap.keys_for_action(Action::Help).is_none());
    }
}
