use serde_json::Value;
use std::io::{self, Write};

/// Write a calculator envelope to stdout as indented JSON.
pub fn print_json(value: &Value) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = serde_json::to_writer_pretty(&mut out, value)
        .map_err(io::Error::from)
        .and_then(|()| writeln!(out));
    if let Err(e) = written {
        tracing::error!(error = %e, "could not write planner output");
    }
}
