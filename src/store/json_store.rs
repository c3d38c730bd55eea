use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

use crate::model::TrackerState;
use crate::store::schema::SaveFile;

pub const DEFAULT_SAVE_FILE: &str = "goal.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a valid save file: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot encode goals: {0}")]
    Encode(String),
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Reads and writes the tracker state as a single JSON file.
pub struct GoalStore {
    path: PathBuf,
}

impl GoalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved state. A missing file is not an error: the default
    /// state with its placeholder goal is returned instead. Bytes that are not
    /// UTF-8 JSON in the expected shape are reported as `Malformed`.
    pub fn load(&self) -> Result<TrackerState, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("{} not found, starting with defaults", self.path.display());
                return Ok(TrackerState::default());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        let file: SaveFile =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        let state = file.into_state();
        log::info!(
            "Loaded {} goal(s) from {}",
            state.goals().len(),
            self.path.display()
        );
        Ok(state)
    }

    /// Replace the save file with `state`, going through a temp file and a
    /// rename so a crash mid-write never leaves a truncated file behind.
    pub fn save(&self, state: &TrackerState) -> Result<(), StoreError> {
        let file = SaveFile::from_state(state);
        if !file.is_encodable() {
            return Err(StoreError::Encode(
                "target and current must be finite numbers".to_string(),
            ));
        }
        let json = encode_pretty(&file)?;

        let tmp_path = self.sibling("tmp");
        let write_tmp = || -> std::io::Result<()> {
            let mut out = fs::File::create(&tmp_path)?;
            out.write_all(&json)?;
            out.sync_all()
        };
        if let Err(e) = write_tmp() {
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::io(&tmp_path, e));
        }
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::io(&self.path, e));
        }
        log::info!(
            "Saved {} goal(s) to {}",
            state.goals().len(),
            self.path.display()
        );
        Ok(())
    }

    /// Move an unreadable save file out of the way so the next save cannot
    /// overwrite it. Earlier backups are never replaced: the first free name of
    /// `<file>.bak`, `<file>.bak.1`, `<file>.bak.2`, ... is used. Returns where
    /// the file went.
    pub fn quarantine(&self) -> Result<PathBuf, StoreError> {
        let bak_path = self.free_backup_path();
        fs::rename(&self.path, &bak_path).map_err(|e| StoreError::io(&self.path, e))?;
        log::warn!(
            "Moved unreadable {} to {}",
            self.path.display(),
            bak_path.display()
        );
        Ok(bak_path)
    }

    fn free_backup_path(&self) -> PathBuf {
        let first = self.sibling("bak");
        if !first.exists() {
            return first;
        }
        (1u32..)
            .map(|n| self.sibling(&format!("bak.{n}")))
            .find(|path| !path.exists())
            .unwrap_or(first)
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".");
        name.push(suffix);
        PathBuf::from(name)
    }
}

fn encode_pretty<T: Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| StoreError::Encode(e.to_string()))?;
    Ok(buf)
}
