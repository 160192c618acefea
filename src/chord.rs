//! Chord parsing and action emission
//!
//! A chord is one whitespace-delimited token of a key spec, such as
//! `ctrl-shift-a`, `esc:3` or `ctrl:down`. Parsing turns it into a
//! [`ParsedChord`], which then emits dotool [`Action`]s.

use crate::keymap::{has_verbatim_prefix, KeyTables, KEYPAD_INPUT_PREFIX, KEYPAD_OUTPUT_PREFIX};
use std::fmt;
use tracing::warn;

/// Largest `:N` repeat count honoured; bigger counts are clamped to this.
pub const MAX_REPEAT: u32 = 100;

/// Modifier added when a bare uppercase letter is pressed
const SHIFT: &str = "shift";

/// How a chord is pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordAction {
    /// Press and release, `repeat` times (1..=[`MAX_REPEAT`])
    PressOnce { repeat: u32 },
    /// Press and hold (`:down`)
    PressDown,
    /// Release (`:up`)
    PressUp,
}

impl Default for ChordAction {
    fn default() -> Self {
        ChordAction::PressOnce { repeat: 1 }
    }
}

/// Backend action verbs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Key,
    KeyDown,
    KeyUp,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Key => "key",
            Verb::KeyDown => "keydown",
            Verb::KeyUp => "keyup",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "key" => Some(Verb::Key),
            "keydown" => Some(Verb::KeyDown),
            "keyup" => Some(Verb::KeyUp),
            _ => None,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line for the dotool backend, e.g. `key ctrl+a` or `keyup shift`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Action {
    pub verb: Verb,
    pub operand: String,
}

impl Action {
    pub fn new(verb: Verb, operand: impl Into<String>) -> Self {
        Self {
            verb,
            operand: operand.into(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.verb, self.operand)
    }
}

/// A normalized chord, ready to emit actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedChord {
    /// Canonical modifiers in the order they were written
    pub modifiers: Vec<String>,
    /// Backend key name; empty for modifier-only chords
    pub key: String,
    pub action: ChordAction,
}

impl ParsedChord {
    /// Parse one chord token. Returns `None` if it is blank.
    pub fn parse(chord: &str, tables: &KeyTables) -> Option<Self> {
        let chord = chord.trim();
        if chord.is_empty() {
            return None;
        }

        let (body, action) = parse_suffix(chord);
        let (modifiers, key) = split_modifiers(body, tables);
        let (modifiers, key) = infer_shift(modifiers, key);
        let key = normalize_key_name(&key, tables);

        Some(Self {
            modifiers,
            key,
            action,
        })
    }

    /// `ctrl+shift+a` style chord string
    pub fn chord_string(&self) -> String {
        let mut parts: Vec<&str> = self.modifiers.iter().map(String::as_str).collect();
        if !self.key.is_empty() {
            parts.push(&self.key);
        }
        parts.join("+")
    }

    /// Backend actions for this chord
    pub fn actions(&self) -> Vec<Action> {
        if self.key.is_empty() {
            return self.modifier_actions();
        }

        let chord = self.chord_string();
        match self.action {
            ChordAction::PressDown => vec![Action::new(Verb::KeyDown, chord)],
            ChordAction::PressUp => vec![Action::new(Verb::KeyUp, chord)],
            ChordAction::PressOnce { repeat } => {
                let count = repeat.clamp(1, MAX_REPEAT) as usize;
                vec![Action::new(Verb::Key, chord); count]
            }
        }
    }

    // Modifiers are pressed in written order and released in reverse.
    fn modifier_actions(&self) -> Vec<Action> {
        let down = self
            .modifiers
            .iter()
            .map(|m| Action::new(Verb::KeyDown, m.as_str()));
        let up = self
            .modifiers
            .iter()
            .rev()
            .map(|m| Action::new(Verb::KeyUp, m.as_str()));

        match self.action {
            ChordAction::PressDown => down.collect(),
            ChordAction::PressUp => up.collect(),
            ChordAction::PressOnce { .. } => down.chain(up).collect(),
        }
    }
}

/// Split off a `:down`, `:up` or `:N` suffix.
///
/// An unrecognized suffix leaves the whole token, colon included, as the
/// body. Repeat counts above [`MAX_REPEAT`] are clamped.
pub fn parse_suffix(chord: &str) -> (&str, ChordAction) {
    let Some((body, suffix)) = chord.rsplit_once(':') else {
        return (chord, ChordAction::default());
    };

    if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) {
        // All digits, so parsing can only fail on overflow
        let requested = suffix.parse::<u32>().unwrap_or(u32::MAX);
        if requested > MAX_REPEAT {
            warn!(
                "⚠️ Repeat count {} in {:?} clamped to {}",
                suffix, chord, MAX_REPEAT
            );
        }
        let repeat = requested.clamp(1, MAX_REPEAT);
        return (body, ChordAction::PressOnce { repeat });
    }

    match suffix {
        "down" => (body, ChordAction::PressDown),
        "up" => (body, ChordAction::PressUp),
        _ => (chord, ChordAction::default()),
    }
}

/// Split `ctrl-shift-a` into modifiers and key.
///
/// Modifier recognition stops at the first part that is not a modifier
/// alias; everything after it is rejoined with `-` as the key.
pub fn split_modifiers(body: &str, tables: &KeyTables) -> (Vec<String>, String) {
    let mut modifiers = Vec::new();
    let mut key_parts: Vec<&str> = Vec::new();

    for part in body.split('-') {
        if key_parts.is_empty() {
            if let Some(modifier) = tables.modifier(part) {
                modifiers.push(modifier.to_string());
                continue;
            }
        }
        key_parts.push(part);
    }

    (modifiers, key_parts.join("-"))
}

/// A bare uppercase letter implies shift.
pub fn infer_shift(mut modifiers: Vec<String>, key: String) -> (Vec<String>, String) {
    let mut chars = key.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return (modifiers, key);
    };
    if !(c.is_alphabetic() && c.is_uppercase()) {
        return (modifiers, key);
    }

    if !modifiers.iter().any(|m| m == SHIFT) {
        modifiers.push(SHIFT.to_string());
    }
    (modifiers, c.to_lowercase().collect())
}

/// Map a key name onto its backend name.
pub fn normalize_key_name(key: &str, tables: &KeyTables) -> String {
    if key.is_empty() {
        return String::new();
    }
    if let Some(name) = tables.symbol(key) {
        return name.to_string();
    }
    if let Some(rest) = key.strip_prefix(KEYPAD_INPUT_PREFIX) {
        return format!("{}{}", KEYPAD_OUTPUT_PREFIX, rest);
    }

    let key = if has_verbatim_prefix(key) {
        key.to_string()
    } else {
        key.to_lowercase()
    };
    match tables.remap(&key) {
        Some(name) => name.to_string(),
        None => key,
    }
}

/// Render actions as backend lines, for comparing against expected text
#[cfg(test)]
pub(crate) fn rendered(actions: &[Action]) -> Vec<String> {
    actions.iter().map(ToString::to_string).collect()
}
