//! Snapshot persistence.
//!
//! The state is saved as a JSON [`Snapshot`]. Bracket `rounds` are stored as
//! an index-keyed object (`{"0": [...], "1": [...]}`) so the file can be
//! loaded into stores that do not keep arrays of arrays; [`hydrate`] turns
//! them back into an ordered array.
//!
//! Match links are stored in this crate's own shape (`homeSource: {type, id}`
//! and `next: {matchId, side}`), not as flat `homeSourceId`/`nextMatchId`
//! fields, so snapshots written by other front ends do not load.

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tourney::TournamentState;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// A `rounds` object key that is not a round index
    #[error("Bad round key '{0}' in stored bracket")]
    RoundKey(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Saved state with its save time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub saved_at: DateTime<Utc>,
    pub state: TournamentState,
}

impl Snapshot {
    pub fn new(state: TournamentState) -> Self {
        Self {
            saved_at: Utc::now(),
            state,
        }
    }
}

/// Every bracket object under `brackets` in a serialized state.
fn brackets_mut(state: &mut Value) -> impl Iterator<Item = &mut Map<String, Value>> {
    state
        .get_mut("brackets")
        .and_then(Value::as_object_mut)
        .into_iter()
        .flat_map(|formats| formats.values_mut())
        .filter_map(Value::as_object_mut)
}

/// Replace each bracket's `rounds` array with an index-keyed object.
pub fn dehydrate(state: &mut Value) {
    for bracket in brackets_mut(state) {
        let Some(Value::Array(rounds)) = bracket.remove("rounds") else {
            continue;
        };
        let keyed: Map<String, Value> = rounds
            .into_iter()
            .enumerate()
            .map(|(idx, round)| (idx.to_string(), round))
            .collect();
        bracket.insert("rounds".to_string(), Value::Object(keyed));
    }
}

/// Turn index-keyed `rounds` objects back into arrays ordered by index.
///
/// Arrays are left as they are. A `null` `brackets` entry becomes an empty
/// object.
///
/// # Errors
///
/// Returns [`StoreError::RoundKey`] for a key that is not a number.
pub fn hydrate(state: &mut Value) -> StoreResult<()> {
    if let Some(brackets) = state.get_mut("brackets")
        && brackets.is_null()
    {
        *brackets = Value::Object(Map::new());
    }

    for bracket in brackets_mut(state) {
        let Some(Value::Object(keyed)) = bracket.remove("rounds") else {
            continue;
        };
        let mut rounds = keyed
            .into_iter()
            .map(|(key, round)| {
                key.parse::<usize>()
                    .map(|idx| (idx, round))
                    .map_err(|_| StoreError::RoundKey(key))
            })
            .collect::<StoreResult<Vec<_>>>()?;
        rounds.sort_by_key(|(idx, _)| *idx);
        bracket.insert(
            "rounds".to_string(),
            Value::Array(rounds.into_iter().map(|(_, round)| round).collect()),
        );
    }
    Ok(())
}

/// Load the snapshot at `path`.
///
/// A missing file yields the sample state.
///
/// # Errors
///
/// Returns error if the file cannot be read or does not hold a snapshot
pub fn load(path: &Path) -> StoreResult<TournamentState> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("No snapshot at {}, starting from sample roster", path.display());
            return Ok(TournamentState::sample());
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let mut snapshot: Value = serde_json::from_str(&text)?;
    if let Some(state) = snapshot.get_mut("state") {
        hydrate(state)?;
    }
    let snapshot: Snapshot = serde_json::from_value(snapshot)?;
    debug!(
        "Loaded snapshot saved at {} from {}",
        snapshot.saved_at,
        path.display()
    );
    Ok(snapshot.state)
}

/// Save `state` to `path`, replacing any previous snapshot.
///
/// The file is written next to the target and renamed over it, so a failed
/// write leaves the previous snapshot in place.
///
/// # Errors
///
/// Returns error if the file cannot be written
pub fn save(path: &Path, state: &TournamentState) -> StoreResult<Snapshot> {
    let snapshot = Snapshot::new(state.clone());
    let mut value = serde_json::to_value(&snapshot)?;
    if let Some(state) = value.get_mut("state") {
        dehydrate(state);
    }

    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, serde_json::to_string_pretty(&value)?).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)?;

    debug!("Saved snapshot to {}", path.display());
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_dehydrate_keys_rounds() {
        let mut state = json!({
            "brackets": { "1v1": { "rounds": [["a"], ["b"]] }, "2v2": null }
        });
        dehydrate(&mut state);
        assert_eq!(
            state["brackets"]["1v1"]["rounds"],
            json!({ "0": ["a"], "1": ["b"] })
        );
        assert!(state["brackets"]["2v2"].is_null());
    }

    #[test]
    fn test_hydrate_sorts_numerically() {
        let mut keyed = Map::new();
        for idx in [10, 2, 0, 1] {
            keyed.insert(idx.to_string(), json!([idx]));
        }
        let mut state = json!({ "brackets": { "1v1": { "rounds": keyed } } });
        hydrate(&mut state).unwrap();
        assert_eq!(
            state["brackets"]["1v1"]["rounds"],
            json!([[0], [1], [2], [10]])
        );
    }

    #[test]
    fn test_hydrate_leaves_arrays() {
        let mut state = json!({ "brackets": { "1v1": { "rounds": [[1]] } } });
        hydrate(&mut state).unwrap();
        assert_eq!(state["brackets"]["1v1"]["rounds"], json!([[1]]));
    }

    #[test]
    fn test_hydrate_null_brackets() {
        let mut state = json!({
            "players": [],
            "teams": [],
            "brackets": null,
            "activeFormat": "1v1"
        });
        hydrate(&mut state).unwrap();
        let state: TournamentState = serde_json::from_value(state).unwrap();
        assert!(state.bracket().is_none());
    }

    #[test]
    fn test_hydrate_bad_key() {
        let mut state = json!({ "brackets": { "1v1": { "rounds": { "first": [] } } } });
        let err = hydrate(&mut state).unwrap_err();
        assert!(matches!(err, StoreError::RoundKey(ref key) if key == "first"));
    }

    #[test]
    fn test_missing_file_gives_sample() {
        let dir = TempDir::new().unwrap();
        let state = load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(state, TournamentState::sample());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cup.json");
        let state = TournamentState::sample().generate_bracket().unwrap();

        save(&path, &state).unwrap();
        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw["savedAt"].is_string());
        assert!(raw["state"]["brackets"]["1v1"]["rounds"]["0"].is_array());

        assert_eq!(load(&path).unwrap(), state);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_load_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(load(&path), Err(StoreError::Json(_))));
    }
}
