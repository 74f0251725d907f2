pub mod config;
pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Resolve a typed input from `--input`, then piped stdin.
///
/// Returns `None` when neither is present so the caller can fall back to
/// its individual flags.
pub fn read_input<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_json(path)?));
    }
    match stdin::read_stdin()? {
        Some(data) => serde_json::from_value(data)
            .map(Some)
            .map_err(|e| format!("Piped JSON does not match this calculator's input: {e}").into()),
        None => Ok(None),
    }
}
