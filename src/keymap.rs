//! Key name tables
//!
//! Maps voice-command key names, symbols and modifier aliases onto the
//! names the dotool backend understands.

use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Prefixes marking names that are passed to the backend untouched
/// (`x:` for XKB keysyms, `k:` for raw keycodes).
pub const VERBATIM_PREFIXES: [&str; 2] = ["x:", "k:"];

/// Input prefix for keypad keys, rewritten to [`KEYPAD_OUTPUT_PREFIX`].
pub const KEYPAD_INPUT_PREFIX: &str = "keypad_";

/// Backend prefix for keypad keys.
pub const KEYPAD_OUTPUT_PREFIX: &str = "kp";

/// Modifier alias -> canonical modifier
const MODIFIER_ALIASES: &[(&str, &str)] = &[
    ("ctrl", "ctrl"),
    ("control", "ctrl"),
    ("shift", "shift"),
    ("alt", "alt"),
    ("option", "alt"),
    ("altgr", "altgr"),
    ("super", "super"),
    ("cmd", "super"),
    ("win", "super"),
    ("meta", "super"),
];

/// Symbol text -> canonical key name
const SYMBOL_ALIASES: &[(&str, &str)] = &[
    (",", "comma"),
    (".", "dot"),
    ("/", "slash"),
    (";", "semicolon"),
    ("'", "apostrophe"),
    ("`", "grave"),
    ("-", "minus"),
    ("=", "equal"),
    ("[", "leftbrace"),
    ("]", "rightbrace"),
    ("\\", "backslash"),
];

/// Lowercase input name -> backend name
const KEY_NAMES: &[(&str, &str)] = &[
    // Editing
    ("escape", "esc"),
    ("esc", "esc"),
    ("return", "enter"),
    ("enter", "enter"),
    ("tab", "tab"),
    ("space", "space"),
    ("backspace", "backspace"),
    ("bksp", "backspace"),
    ("delete", "delete"),
    ("del", "delete"),
    ("insert", "insert"),
    ("ins", "insert"),
    // Navigation
    ("up", "up"),
    ("down", "down"),
    ("left", "left"),
    ("right", "right"),
    ("home", "home"),
    ("end", "end"),
    ("pageup", "pageup"),
    ("pgup", "pageup"),
    ("pagedown", "pagedown"),
    ("pgdown", "pagedown"),
    // Locks and system
    ("capslock", "capslock"),
    ("caps", "capslock"),
    ("numlock", "numlock"),
    ("num_lock", "numlock"),
    ("scrolllock", "scrolllock"),
    ("scroll_lock", "scrolllock"),
    ("printscr", "sysrq"),
    ("printscreen", "sysrq"),
    ("print", "sysrq"),
    ("pause", "pause"),
    ("menu", "compose"),
    // Named punctuation
    ("comma", "comma"),
    ("period", "dot"),
    ("dot", "dot"),
    ("slash", "slash"),
    ("semicolon", "semicolon"),
    ("apostrophe", "apostrophe"),
    ("quote", "apostrophe"),
    ("backtick", "grave"),
    ("grave", "grave"),
    ("minus", "minus"),
    ("dash", "minus"),
    ("equal", "equal"),
    ("equals", "equal"),
    ("bracketleft", "leftbrace"),
    ("lbracket", "leftbrace"),
    ("bracketright", "rightbrace"),
    ("rbracket", "rightbrace"),
    ("backslash", "backslash"),
    // Media
    ("volup", "volumeup"),
    ("voldown", "volumedown"),
    ("mute", "mute"),
    ("play", "playpause"),
    ("play_pause", "playpause"),
    ("next", "nextsong"),
    ("prev", "previoussong"),
    ("brightness_up", "brightnessup"),
    ("brightness_down", "brightnessdown"),
];

lazy_static! {
    static ref BUILTIN: Arc<KeyTables> = Arc::new(KeyTables::from_pairs(
        MODIFIER_ALIASES,
        SYMBOL_ALIASES,
        KEY_NAMES,
    ));
}

/// Read-only lookup tables used by the translator
#[derive(Debug, Clone, Default)]
pub struct KeyTables {
    modifier_aliases: HashMap<String, String>,
    symbol_aliases: HashMap<String, String>,
    key_names: HashMap<String, String>,
    /// Every backend name appearing as a value in `key_names`
    known_names: HashSet<String>,
}

impl KeyTables {
    /// Build tables from owned maps
    pub fn new(
        modifier_aliases: HashMap<String, String>,
        symbol_aliases: HashMap<String, String>,
        key_names: HashMap<String, String>,
    ) -> Self {
        let known_names = key_names.values().cloned().collect();
        Self {
            modifier_aliases,
            symbol_aliases,
            key_names,
            known_names,
        }
    }

    /// Build tables from static pairs
    pub fn from_pairs(
        modifiers: &[(&str, &str)],
        symbols: &[(&str, &str)],
        keys: &[(&str, &str)],
    ) -> Self {
        fn to_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
            pairs
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect()
        }
        Self::new(to_map(modifiers), to_map(symbols), to_map(keys))
    }

    /// The production tables, built once per process
    pub fn builtin() -> Arc<KeyTables> {
        Arc::clone(&BUILTIN)
    }

    /// Copy of these tables with extra remap entries layered on top.
    ///
    /// Override keys are lowercased the same way translator input is, so
    /// `"Escape"` and `"escape"` address the same entry.
    pub fn with_key_overrides<'a, I>(&self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut key_names = self.key_names.clone();
        for (from, to) in overrides {
            let from = if has_verbatim_prefix(from) {
                from.clone()
            } else {
                from.to_lowercase()
            };
            key_names.insert(from, to.clone());
        }
        Self::new(
            self.modifier_aliases.clone(),
            self.symbol_aliases.clone(),
            key_names,
        )
    }

    /// Canonical modifier for an alias, if it is one
    pub fn modifier(&self, alias: &str) -> Option<&str> {
        self.modifier_aliases.get(alias).map(String::as_str)
    }

    /// Canonical key name for a symbol
    pub fn symbol(&self, text: &str) -> Option<&str> {
        self.symbol_aliases.get(text).map(String::as_str)
    }

    /// Backend name for a normalized key name
    pub fn remap(&self, name: &str) -> Option<&str> {
        self.key_names.get(name).map(String::as_str)
    }

    /// Whether `name` is one of the backend names the remap table produces
    pub fn is_known_name(&self, name: &str) -> bool {
        self.known_names.contains(name)
    }

    pub fn known_names(&self) -> impl Iterator<Item = &str> {
        self.known_names.iter().map(String::as_str)
    }
}

/// Does the name start with `x:` or `k:`?
pub fn has_verbatim_prefix(name: &str) -> bool {
    VERBATIM_PREFIXES.iter().any(|p| name.starts_with(p))
}
