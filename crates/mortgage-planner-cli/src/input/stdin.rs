use serde_json::Value;
use std::io::{self, Read};

/// Calculator input piped on stdin, or `None` when stdin is a terminal or
/// blank so the command falls back to its flags.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut piped = String::new();
    io::stdin()
        .read_to_string(&mut piped)
        .map_err(|e| format!("Cannot read planner input from stdin: {e}"))?;

    if piped.trim().is_empty() {
        tracing::debug!("stdin is blank, using command flags");
        return Ok(None);
    }

    let value = serde_json::from_str(piped.trim())
        .map_err(|e| format!("Piped planner input is not valid JSON: {e}"))?;
    tracing::debug!(bytes = piped.len(), "planner input read from stdin");
    Ok(Some(value))
}
