//! Save and load world snapshots as JSON

use std::path::Path;
use tracing::info;

use crate::core::error::Result;
use crate::world::state::WorldState;

pub fn to_json(state: &WorldState) -> Result<String> {
    Ok(serde_json::to_string(state)?)
}

pub fn from_json(json: &str) -> Result<WorldState> {
    Ok(serde_json::from_str(json)?)
}

/// Write a snapshot, replacing any previous save
pub fn save_to_file(state: &WorldState, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, to_json(state)?)?;
    info!(path = %path.display(), tick = state.tick, "Saved world");
    Ok(())
}

/// Load a snapshot. `Ok(None)` means there is no save and a fresh world
/// should be generated.
pub fn load_from_file(path: &Path) -> Result<Option<WorldState>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    let state = from_json(&content)?;
    info!(path = %path.display(), tick = state.tick, "Loaded world");
    Ok(Some(state))
}
