//! dotool line format
//!
//! One action per line, `verb operand`, newline-terminated.

use crate::chord::{Action, Verb};
use crate::error::{ForwardError, ForwardResult};

/// Encode actions as backend input, one newline-terminated line each
pub fn actions_to_input(actions: &[Action]) -> String {
    actions
        .iter()
        .map(|action| format!("{}\n", action))
        .collect()
}

/// Decode a single action line
pub fn parse_action_line(line: &str) -> ForwardResult<Action> {
    let line = line.trim();
    let (verb, operand) = match line.split_once(char::is_whitespace) {
        Some((verb, operand)) => (verb, operand.trim()),
        None => (line, ""),
    };

    let verb = Verb::parse(verb)
        .ok_or_else(|| ForwardError::Wire(format!("unknown verb in {:?}", line)))?;
    if operand.is_empty() {
        return Err(ForwardError::Wire(format!("missing operand in {:?}", line)));
    }

    Ok(Action::new(verb, operand))
}

/// Decode a multi-line buffer, skipping blank lines
pub fn parse_input(input: &str) -> ForwardResult<Vec<Action>> {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_action_line)
        .collect()
}
