use serde_json::Value;
use std::io::{self, Read};

/// Read piped JSON parameters from stdin.
///
/// Returns `None` when stdin is an interactive terminal or the pipe is
/// empty, so callers can fall back to `--input`.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut raw = String::new();
    io::stdin().read_to_string(&mut raw)?;

    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    Ok(Some(serde_json::from_str(raw)?))
}
