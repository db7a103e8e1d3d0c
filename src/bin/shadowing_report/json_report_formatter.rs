use std::fs;
use std::path::Path;

use serde::Serialize;

/// Writes `value` as pretty JSON with a trailing newline. The parent
/// directory must already exist.
pub fn write_report<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    let mut rendered = to_pretty_string(value)?;
    rendered.push('\n');
    fs::write(path, rendered)
        .map_err(|err| format!("Failed to write report file '{}': {err}", path.display()))
}

pub fn to_pretty_string<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|err| format!("Failed to serialize JSON: {err}"))
}
