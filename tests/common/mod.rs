pub mod mock_sink;

use keyforward::{KeyTables, Translator};
use std::sync::{Arc, Mutex};

/// Small table set so tests do not depend on the production keymap
pub fn minimal_tables() -> Arc<KeyTables> {
    Arc::new(KeyTables::from_pairs(
        &[("ctrl", "ctrl"), ("shift", "shift"), ("cmd", "super")],
        &[(",", "comma")],
        &[("escape", "esc"), ("return", "enter")],
    ))
}

pub fn minimal_translator() -> Translator {
    Translator::new(minimal_tables())
}

/// Translate `spec` and collect the unknown keys reported along the way
pub fn translate_reporting(translator: &Translator, spec: &str) -> (Vec<String>, Vec<String>) {
    let reported = Mutex::new(Vec::new());
    let on_unknown = |key: &str| reported.lock().unwrap().push(key.to_string());
    let actions = translator
        .translate(spec, Some(&on_unknown))
        .iter()
        .map(ToString::to_string)
        .collect();
    (actions, reported.into_inner().unwrap())
}
