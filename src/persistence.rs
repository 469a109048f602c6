// File: src/persistence.rs
use crate::error::{PantryError, Result};
use crate::learning::LearningTable;
use bincode::Options;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

pub const STATE_VERSION: u32 = 1;

/// The on-disk shape of the learning state, shared by both encodings.
#[derive(Clone, Serialize, Deserialize)]
struct SerializableState {
    version: u32,
    learning: LearningTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateFormat {
    Binary,
    Json,
}

impl StateFormat {
    /// `.json` files are written as pretty JSON, everything else as bincode.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => StateFormat::Json,
            _ => StateFormat::Binary,
        }
    }
}

pub fn save_to_disk(table: &LearningTable, path: &Path) -> Result<()> {
    write_state(table, path, StateFormat::for_path(path))
}

pub fn load_from_disk(path: &Path) -> Result<LearningTable> {
    read_state(path, StateFormat::for_path(path))
}

/// Writes a JSON copy regardless of the file extension.
pub fn export_json(table: &LearningTable, path: &Path) -> Result<()> {
    write_state(table, path, StateFormat::Json)
}

pub fn import_json(path: &Path) -> Result<LearningTable> {
    read_state(path, StateFormat::Json)
}

fn write_state(table: &LearningTable, path: &Path, format: StateFormat) -> Result<()> {
    let parent_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let state = SerializableState {
        version: STATE_VERSION,
        learning: table.clone(),
    };

    let mut temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file_mut());
        match format {
            StateFormat::Binary => bincode::serialize_into(&mut writer, &state)?,
            StateFormat::Json => serde_json::to_writer_pretty(&mut writer, &state)?,
        }
        writer.flush()?;
    }

    temp_file.persist(path).map_err(|e| e.error)?;
    info!(path = %path.display(), items = table.len(), ?format, "saved learning state");
    Ok(())
}

fn read_state(path: &Path, format: StateFormat) -> Result<LearningTable> {
    let file = File::open(path)?;
    // Length prefixes are bounded by the file size, so a damaged prefix fails
    // instead of allocating.
    let limit = file.metadata()?.len();
    let reader = BufReader::new(file);
    let state: SerializableState = match format {
        StateFormat::Binary => bincode::options()
            .with_fixint_encoding()
            .allow_trailing_bytes()
            .with_limit(limit)
            .deserialize_from(reader)?,
        StateFormat::Json => serde_json::from_reader(reader)?,
    };

    if state.version != STATE_VERSION {
        return Err(PantryError::UnsupportedVersion {
            found: state.version,
            expected: STATE_VERSION,
        });
    }

    info!(path = %path.display(), items = state.learning.len(), ?format, "loaded learning state");
    Ok(state.learning)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> LearningTable {
        let mut table = LearningTable::new();
        table.record("tomato", "fresh_vegetables");
        table.record("tomato", "fresh_vegetables");
        table.record("tomato", "canned");
        table.record("kombucha", "fizzy stuff");
        table
    }

    #[test]
    fn test_binary_round_trip_keeps_counts() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("learning.bin");
        save_to_disk(&sample(), &path).unwrap();
        assert_eq!(load_from_disk(&path).unwrap(), sample());
    }

    #[test]
    fn test_json_extension_writes_readable_mapping() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("learning.json");
        save_to_disk(&sample(), &path).unwrap();

        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["version"], 1);
        assert_eq!(raw["learning"]["entries"]["tomato"]["fresh_vegetables"], 2);
        assert_eq!(load_from_disk(&path).unwrap(), sample());
    }

    #[test]
    fn test_rejects_unknown_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("future.json");
        fs::write(&path, r#"{"version": 99, "learning": {"entries": {}}}"#).unwrap();
        match import_json(&path) {
            Err(PantryError::UnsupportedVersion { found: 99, expected: 1 }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_and_corrupt_files_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(load_from_disk(&dir.path().join("absent.bin")), Err(PantryError::Io(_))));

        let corrupt = dir.path().join("corrupt.bin");
        fs::write(&corrupt, [0xff, 0xff, 0xff]).unwrap();
        assert!(load_from_disk(&corrupt).is_err());
    }

    #[test]
    fn test_oversized_length_prefix_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("learning.bin");
        let mut bytes = STATE_VERSION.to_le_bytes().to_vec();
        bytes.extend_from_slice(&1u64.to_le_bytes());
        bytes.extend_from_slice(&u64::MAX.to_le_bytes());
        fs::write(&path, bytes).unwrap();
        assert!(matches!(load_from_disk(&path), Err(PantryError::Binary(_))));
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(StateFormat::for_path(Path::new("a/b.JSON")), StateFormat::Json);
        assert_eq!(StateFormat::for_path(Path::new("learning.bin")), StateFormat::Binary);
        assert_eq!(StateFormat::for_path(Path::new("learning")), StateFormat::Binary);
    }
}
