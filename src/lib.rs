//! Keyforward Library
//!
//! Translates voice-command key specs (`ctrl-shift-a`, `esc:3`, `ctrl:down`)
//! into dotool actions and delivers them to the dotool client.

pub mod chord;
pub mod config;
pub mod error;
pub mod forwarder;
pub mod keymap;
pub mod registry;
pub mod sender;
pub mod translator;
pub mod wire;

pub use chord::{Action, ChordAction, ParsedChord, Verb};
pub use config::Config;
pub use error::{ForwardError, ForwardResult};
pub use forwarder::{ForwardOutcome, KeyForwarder};
pub use keymap::KeyTables;
pub use registry::UnknownKeyRegistry;
pub use sender::{ActionSink, DotoolSender};
pub use translator::{Translator, DEFAULT_DEBUG_SAMPLES};
pub use wire::{actions_to_input, parse_action_line, parse_input};
