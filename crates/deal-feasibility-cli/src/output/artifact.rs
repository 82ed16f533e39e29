use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Persist `data` as pretty JSON wrapped with a UTC save timestamp.
pub fn write_artifact<T: Serialize>(path: &str, data: &T) -> Result<(), Box<dyn std::error::Error>> {
    let target = Path::new(path);
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let document = json!({
        "saved_at": Utc::now().to_rfc3339(),
        "data": data,
    });
    fs::write(target, serde_json::to_string_pretty(&document)?)
        .map_err(|e| format!("Failed to write '{}': {}", target.display(), e))?;
    debug!(path, "artifact written");
    Ok(())
}
