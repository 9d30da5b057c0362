use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde_json::Error as SerdeError;
use tracing::warn;

use crate::domain::app_state::PersistedState;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "EliteMovers";
const APP_NAME: &str = "MoveOps";

fn data_file() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join("state.json"))
}

pub fn load_persisted_state() -> Option<PersistedState> {
    load_persisted_state_from(&data_file()?)
}

pub fn load_persisted_state_from(path: &Path) -> Option<PersistedState> {
    let data = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&data) {
        Ok(state) => Some(state),
        Err(err) => {
            warn!(path = %path.display(), %err, "ignoring unreadable state snapshot");
            None
        }
    }
}

pub fn save_persisted_state(state: &PersistedState) -> Result<(), PersistSaveError> {
    let path = data_file().ok_or(PersistSaveError::StorageUnavailable)?;
    save_persisted_state_to(&path, state)
}

pub fn save_persisted_state_to(
    path: &Path,
    state: &PersistedState,
) -> Result<(), PersistSaveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json)?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum PersistSaveError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::app_state::AppState;

    #[test]
    fn snapshot_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let state = AppState::seeded().to_persisted();
        save_persisted_state_to(&path, &state).unwrap();

        let restored = load_persisted_state_from(&path).unwrap();
        assert_eq!(restored.employees, state.employees);
        assert_eq!(restored.crews, state.crews);
        assert_eq!(restored.settings, state.settings);
    }

    #[test]
    fn missing_or_garbled_snapshots_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        assert!(load_persisted_state_from(&path).is_none());

        fs::write(&path, "not json").unwrap();
        assert!(load_persisted_state_from(&path).is_none());
    }
}
