//! Key forwarding
//!
//! Front door used by the voice layer: takes a key spec, translates it and
//! pushes the resulting actions to a sink.

use crate::config::Config;
use crate::error::ForwardResult;
use crate::sender::ActionSink;
use crate::translator::{warn_unknown_key, Translator};
use tracing::debug;

/// What happened to a forwarded spec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardOutcome {
    /// Forwarding is off; the caller should press the keys itself
    PassThrough,
    /// The spec produced no actions
    Empty,
    /// This many actions were handed to the sink
    Sent(usize),
}

/// Translates key specs and sends them to a backend
#[derive(Debug)]
pub struct KeyForwarder<S: ActionSink> {
    translator: Translator,
    sink: S,
    enabled: bool,
    log_unknown_keys: bool,
}

impl<S: ActionSink> KeyForwarder<S> {
    pub fn new(translator: Translator, sink: S) -> Self {
        Self {
            translator,
            sink,
            enabled: true,
            log_unknown_keys: true,
        }
    }

    pub fn from_config(config: &Config, sink: S) -> Self {
        Self {
            translator: Translator::from_config(config),
            sink,
            enabled: config.enabled,
            log_unknown_keys: config.log_unknown_keys,
        }
    }

    pub fn forward(&mut self, spec: &str) -> ForwardResult<ForwardOutcome> {
        if !self.enabled {
            return Ok(ForwardOutcome::PassThrough);
        }
        debug!("dotool key: {:?}", spec);

        let on_unknown: Option<&dyn Fn(&str)> = if self.log_unknown_keys {
            Some(&warn_unknown_key)
        } else {
            None
        };
        let actions = self.translator.translate(spec, on_unknown);
        if actions.is_empty() {
            return Ok(ForwardOutcome::Empty);
        }

        self.sink.send_actions(&actions)?;
        Ok(ForwardOutcome::Sent(actions.len()))
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
