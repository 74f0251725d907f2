use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a calculator input file (`MortgageInput`, `ComparisonInput`, ...).
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let (canonical, contents) = read_to_string(path)?;
    let value: T = serde_json::from_str(&contents)
        .map_err(|e| {
            format!(
                "'{}' is not a valid planner input: {}",
                canonical.display(),
                e
            )
        })?;
    Ok(value)
}

/// Read an input or config file as text, with its resolved path for messages.
pub fn read_to_string(path: &str) -> Result<(PathBuf, String), Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Cannot read planner file '{}': {}", canonical.display(), e))?;
    Ok((canonical, contents))
}

fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("Planner file not found: {}", canonical.display()).into());
    }
    if !canonical.is_file() {
        return Err(format!("Planner input must be a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}
