//! Key spec translator
//!
//! Turns a voice-command key spec like `"ctrl:down ctrl-a ctrl:up"` into the
//! ordered list of dotool actions that performs it. Translation never fails:
//! malformed chords just produce fewer (or no) actions.

use crate::chord::{Action, ParsedChord};
use crate::config::Config;
use crate::keymap::{has_verbatim_prefix, KeyTables, KEYPAD_OUTPUT_PREFIX};
use crate::registry::UnknownKeyRegistry;
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, warn};

/// Sample specs rendered by [`Translator::debug_translate`]
pub const DEFAULT_DEBUG_SAMPLES: [&str; 4] = ["ctrl-, ctrl-f", "super-1", "esc:2", "ctrl:down"];

lazy_static! {
    static ref PLAUSIBLE_KEY: Regex =
        Regex::new(r"^[a-z0-9]$|^f\d+$|^kp\d+$").expect("static regex is valid");
}

/// Sink for unknown key names
pub type UnknownKeyCallback<'a> = &'a (dyn Fn(&str) + 'a);

/// Callback that reports unknown keys through `tracing`
pub fn warn_unknown_key(key: &str) {
    warn!("⚠️ Unknown key name for dotool: '{}'", key);
}

/// Translates key specs using a set of key tables
#[derive(Debug)]
pub struct Translator {
    tables: Arc<KeyTables>,
    unknown_keys: UnknownKeyRegistry,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(KeyTables::builtin())
    }
}

impl Translator {
    pub fn new(tables: Arc<KeyTables>) -> Self {
        Self {
            tables,
            unknown_keys: UnknownKeyRegistry::new(),
        }
    }

    /// Builtin tables with the configured key overrides layered on top
    pub fn from_config(config: &Config) -> Self {
        if config.key_overrides.is_empty() {
            return Self::default();
        }
        let tables = KeyTables::builtin().with_key_overrides(&config.key_overrides);
        Self::new(Arc::new(tables))
    }

    pub fn tables(&self) -> &KeyTables {
        &self.tables
    }

    /// Keys already reported as unknown by this translator
    pub fn unknown_keys(&self) -> &UnknownKeyRegistry {
        &self.unknown_keys
    }

    /// Translate a whole key spec.
    ///
    /// `on_unknown` is called at most once per distinct unrecognized key name
    /// over the lifetime of this translator.
    pub fn translate(&self, spec: &str, on_unknown: Option<UnknownKeyCallback<'_>>) -> Vec<Action> {
        spec.split_ascii_whitespace()
            .flat_map(|chord| self.translate_chord(chord, on_unknown))
            .collect()
    }

    /// Translate a single chord token
    pub fn translate_chord(
        &self,
        chord: &str,
        on_unknown: Option<UnknownKeyCallback<'_>>,
    ) -> Vec<Action> {
        let Some(parsed) = ParsedChord::parse(chord, &self.tables) else {
            return Vec::new();
        };
        if let Some(callback) = on_unknown {
            self.report_unknown(&parsed.key, callback);
        }

        let actions = parsed.actions();
        debug!("Chord {:?} -> {} action(s)", chord, actions.len());
        actions
    }

    /// Cheap check that a normalized key name is something dotool accepts
    pub fn is_probably_valid(&self, key: &str) -> bool {
        has_verbatim_prefix(key)
            || key.starts_with(KEYPAD_OUTPUT_PREFIX)
            || PLAUSIBLE_KEY.is_match(key)
            || self.tables.is_known_name(key)
    }

    fn report_unknown(&self, key: &str, callback: UnknownKeyCallback<'_>) {
        if key.is_empty() || self.is_probably_valid(key) {
            return;
        }
        if self.unknown_keys.insert(key) {
            callback(key);
        }
    }

    /// Human-readable translations, one `<spec> -> [actions]` line per sample
    pub fn debug_translate(&self, samples: Option<&[&str]>) -> Vec<String> {
        let samples = samples.unwrap_or(&DEFAULT_DEBUG_SAMPLES);
        samples
            .iter()
            .map(|spec| {
                let lines: Vec<String> = self
                    .translate(spec, None)
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                format!("{} -> {:?}", spec, lines)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::{rendered, MAX_REPEAT};
    use std::sync::Mutex;

    fn reported(translator: &Translator, spec: &str) -> Vec<String> {
        let seen = Mutex::new(Vec::new());
        let callback = |key: &str| seen.lock().unwrap().push(key.to_string());
        translator.translate(spec, Some(&callback));
        seen.into_inner().unwrap()
    }

    #[test]
    fn test_translate_basic_chords() {
        let translator = Translator::default();
        assert_eq!(rendered(&translator.translate("ctrl-a", None)), ["key ctrl+a"]);
        assert_eq!(
            rendered(&translator.translate("ctrl:down ctrl-a ctrl:up", None)),
            ["keydown ctrl", "key ctrl+a", "keyup ctrl"]
        );
        assert_eq!(rendered(&translator.translate("super-1", None)), ["key super+1"]);
        assert_eq!(rendered(&translator.translate("A", None)), ["key shift+a"]);
    }

    #[test]
    fn test_translate_repeat_suffix() {
        let translator = Translator::default();
        assert_eq!(
            rendered(&translator.translate("esc:3", None)),
            ["key esc", "key esc", "key esc"]
        );
    }

    #[test]
    fn test_oversized_repeat_is_capped() {
        let translator = Translator::default();
        for spec in ["esc:99999999999", "esc:4294967295"] {
            let actions = rendered(&translator.translate(spec, None));
            assert_eq!(actions.len(), MAX_REPEAT as usize, "{}", spec);
            assert!(actions.iter().all(|a| a == "key esc"));
        }
        // Later chords still translate
        assert_eq!(
            translator.translate("a:5000 b", None).len(),
            MAX_REPEAT as usize + 1
        );
    }

    #[test]
    fn test_translate_empty() {
        let translator = Translator::default();
        assert!(translator.translate("", None).is_empty());
        assert!(translator.translate("   ", None).is_empty());
        assert!(translator.translate("\t\n", None).is_empty());
    }

    #[test]
    fn test_probably_valid() {
        let translator = Translator::default();
        for key in ["a", "7", "f1", "f12", "kp5", "kpenter", "x:Hyper_L", "k:30", "esc"] {
            assert!(translator.is_probably_valid(key), "{}", key);
        }
        for key in ["blorp", "ab", "F1", "fx"] {
            assert!(!translator.is_probably_valid(key), "{}", key);
        }
    }

    #[test]
    fn test_unknown_key_reported_once() {
        let translator = Translator::default();
        assert_eq!(reported(&translator, "blorp ctrl-blorp"), ["blorp"]);
        assert!(reported(&translator, "blorp").is_empty());
        assert!(translator.unknown_keys().contains("blorp"));

        translator.unknown_keys().reset();
        assert_eq!(reported(&translator, "blorp"), ["blorp"]);
    }

    #[test]
    fn test_no_report_without_callback() {
        let translator = Translator::default();
        translator.translate("blorp", None);
        assert!(translator.unknown_keys().is_empty());
    }

    #[test]
    fn test_from_config_overrides() {
        let mut config = Config::default();
        config
            .key_overrides
            .insert("Launch".to_string(), "x:XF86LaunchA".to_string());
        let translator = Translator::from_config(&config);
        assert_eq!(rendered(&translator.translate("ctrl-launch", None)), ["key ctrl+x:XF86LaunchA"]);
        // Builtin entries survive
        assert_eq!(rendered(&translator.translate("escape", None)), ["key esc"]);
    }

    #[test]
    fn test_debug_translate_defaults() {
        let translator = Translator::default();
        let lines = translator.debug_translate(None);
        assert_eq!(lines.len(), DEFAULT_DEBUG_SAMPLES.len());
        assert_eq!(
            lines[0],
            r#"ctrl-, ctrl-f -> ["key ctrl+comma", "key ctrl+f"]"#
        );
        assert_eq!(lines[3], r#"ctrl:down -> ["keydown ctrl"]"#);
    }

    #[test]
    fn test_debug_translate_custom_samples() {
        let translator = Translator::default();
        let lines = translator.debug_translate(Some(&["", "esc:2"][..]));
        assert_eq!(lines, [r#" -> []"#, r#"esc:2 -> ["key esc", "key esc"]"#]);
    }
}
