//! The persistence adapter: one JSON snapshot, written on every mutating
//! edit and read once at startup.
//!
//! On the web the snapshot lives in `localStorage` under a single key; on
//! desktop it is a JSON file in the per-user data directory. Either way the
//! serialized form is identical, and failures are non-fatal: callers log and
//! keep editing in memory.

use thiserror::Error;

use super::store::PlannerState;

/// Single key (web) / file stem (desktop) for the snapshot.
pub const STORAGE_KEY: &str = "design-map-state-v1";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("local storage unavailable: {0}")]
    Unavailable(String),
    #[error("snapshot serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
    #[cfg(not(target_arch = "wasm32"))]
    #[error("snapshot io failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes the full snapshot. Last write wins; no conflict detection.
pub fn save(state: &PlannerState) -> Result<(), StorageError> {
    let json = serde_json::to_string(state)?;
    write_raw(&json)
}

/// Reads the snapshot back, if one exists. A corrupt or structurally
/// unexpected snapshot loads as `None` so startup can reseed instead of
/// failing.
pub fn load() -> Result<Option<PlannerState>, StorageError> {
    let Some(raw) = read_raw()? else {
        return Ok(None);
    };
    match serde_json::from_str::<PlannerState>(&raw) {
        Ok(state) => Ok(Some(state)),
        Err(err) => {
            log::warn!("discarding unreadable snapshot: {err}");
            Ok(None)
        }
    }
}

/// Removes the snapshot ("clear all").
pub fn wipe() -> Result<(), StorageError> {
    remove_raw()
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .ok_or_else(|| StorageError::Unavailable("window missing".into()))?
        .local_storage()
        .map_err(|_| StorageError::Unavailable("localStorage blocked".into()))?
        .ok_or_else(|| StorageError::Unavailable("localStorage missing".into()))
}

#[cfg(target_arch = "wasm32")]
fn write_raw(json: &str) -> Result<(), StorageError> {
    local_storage()?
        .set_item(STORAGE_KEY, json)
        .map_err(|_| StorageError::Unavailable("write rejected (quota?)".into()))
}

#[cfg(target_arch = "wasm32")]
fn read_raw() -> Result<Option<String>, StorageError> {
    local_storage()?
        .get_item(STORAGE_KEY)
        .map_err(|_| StorageError::Unavailable("read rejected".into()))
}

#[cfg(target_arch = "wasm32")]
fn remove_raw() -> Result<(), StorageError> {
    local_storage()?
        .remove_item(STORAGE_KEY)
        .map_err(|_| StorageError::Unavailable("remove rejected".into()))
}

#[cfg(not(target_arch = "wasm32"))]
fn snapshot_path() -> Result<std::path::PathBuf, StorageError> {
    let dirs = directories::ProjectDirs::from("com", "DesignMap", "DesignMap")
        .ok_or_else(|| StorageError::Unavailable("no project data directory".into()))?;
    Ok(dirs.data_dir().join(format!("{STORAGE_KEY}.json")))
}

#[cfg(not(target_arch = "wasm32"))]
fn write_raw(json: &str) -> Result<(), StorageError> {
    let path = snapshot_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn read_raw() -> Result<Option<String>, StorageError> {
    let path = snapshot_path()?;
    if !path.exists() {
        return Ok(None);
    }
    Ok(Some(std::fs::read_to_string(path)?))
}

#[cfg(not(target_arch = "wasm32"))]
fn remove_raw() -> Result<(), StorageError> {
    let path = snapshot_path()?;
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}
