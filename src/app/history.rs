// SPDX-License-Identifier: MPL-2.0
//! Bounded, persisted history of the most recent generations.
//!
//! The history is stored in CBOR next to the other application data, as a
//! list of records with camelCase keys (`id`, `imageUrl`, `prompt`, `style`,
//! `createdAt`). A file that cannot be decoded is ignored with a warning in
//! the log; the session then starts with an empty history.

use super::paths;
use crate::domain::generation::{GenerationId, GenerationRecord, StyleTag};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

/// Maximum number of records kept.
pub const HISTORY_LIMIT: usize = 5;

/// History file name within the app data directory.
pub const HISTORY_FILE: &str = "generations.cbor";

/// Persisted form of a [`GenerationRecord`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct StoredGeneration {
    id: String,
    image_url: String,
    prompt: String,
    style: String,
    created_at: String,
}

impl From<&GenerationRecord> for StoredGeneration {
    fn from(record: &GenerationRecord) -> Self {
        Self {
            id: record.id().as_str().to_owned(),
            image_url: record.image_url().to_owned(),
            prompt: record.prompt().to_owned(),
            style: record.style().as_str().to_owned(),
            created_at: record.created_at().to_owned(),
        }
    }
}

impl From<StoredGeneration> for GenerationRecord {
    fn from(stored: StoredGeneration) -> Self {
        GenerationRecord::new(
            GenerationId::new(stored.id),
            stored.image_url,
            stored.prompt,
            StyleTag::new(stored.style),
            stored.created_at,
        )
    }
}

/// Inputs republished when a history entry is restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoredInputs {
    pub prompt: String,
    pub style: StyleTag,
    pub image_url: String,
}

/// Newest-first list of at most [`HISTORY_LIMIT`] records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    records: Vec<GenerationRecord>,
}

impl History {
    /// Adds `record` as the newest entry, evicting the oldest beyond the limit.
    pub fn prepend(&mut self, record: GenerationRecord) {
        self.records.insert(0, record);
        self.records.truncate(HISTORY_LIMIT);
    }

    /// Records, newest first.
    #[must_use]
    pub fn entries(&self) -> &[GenerationRecord] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, id: &GenerationId) -> Option<&GenerationRecord> {
        self.records.iter().find(|record| record.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the inputs stored with `id`, without changing the history.
    #[must_use]
    pub fn restore(&self, id: &GenerationId) -> Option<RestoredInputs> {
        self.get(id).map(|record| RestoredInputs {
            prompt: record.prompt().to_owned(),
            style: record.style().clone(),
            image_url: record.image_url().to_owned(),
        })
    }

    /// Loads the history from `base_dir`, or from the resolved data
    /// directory when `None`.
    ///
    /// Never fails: a missing file gives an empty history, an unreadable
    /// one is logged and also gives an empty history.
    pub fn load_from(base_dir: Option<PathBuf>) -> Self {
        let Some(path) = Self::history_file_path_with_override(base_dir) else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        let file = match fs::File::open(&path) {
            Ok(file) => file,
            Err(err) => {
                log::warn!("Could not open {}: {err}", path.display());
                return Self::default();
            }
        };

        match ciborium::from_reader::<Vec<StoredGeneration>, _>(BufReader::new(file)) {
            Ok(stored) => {
                let mut records: Vec<GenerationRecord> =
                    stored.into_iter().map(GenerationRecord::from).collect();
                records.truncate(HISTORY_LIMIT);
                Self { records }
            }
            Err(err) => {
                log::warn!("Discarding unreadable history {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Saves the history to `base_dir` (or the resolved data directory),
    /// creating it if needed.
    pub fn save_to(&self, base_dir: Option<PathBuf>) -> Result<()> {
        let path = Self::history_file_path_with_override(base_dir)
            .ok_or_else(|| Error::Io("no data directory available".to_string()))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let stored: Vec<StoredGeneration> =
            self.records.iter().map(StoredGeneration::from).collect();
        let writer = BufWriter::new(fs::File::create(&path)?);
        ciborium::into_writer(&stored, writer).map_err(|e| Error::Encode(e.to_string()))
    }

    fn history_file_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
        paths::get_app_data_dir_with_override(base_dir).map(|mut path| {
            path.push(HISTORY_FILE);
            path
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generation::Style;
    use tempfile::tempdir;

    fn record(n: usize) -> GenerationRecord {
        GenerationRecord::new(
            GenerationId::new(format!("gen_{n}")),
            format!("data:image/jpeg;base64,{n}"),
            format!("prompt {n}"),
            Style::ALL[n % Style::ALL.len()].into(),
            format!("2026-10-14T09:00:0{}.000Z", n % 10),
        )
    }

    #[test]
    fn prepend_puts_newest_first() {
        let mut history = History::default();
        history.prepend(record(1));
        history.prepend(record(2));
        assert_eq!(history.entries()[0].id().as_str(), "gen_2");
        assert_eq!(history.entries()[1].id().as_str(), "gen_1");
    }

    #[test]
    fn history_is_bounded_to_five() {
        let mut history = History::default();
        for n in 1..=6 {
            history.prepend(record(n));
        }
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history.entries()[0].id().as_str(), "gen_6");
        assert!(history.get(&GenerationId::new("gen_1")).is_none());
    }

    #[test]
    fn restore_returns_stored_inputs_without_mutation() {
        let mut history = History::default();
        history.prepend(record(3));
        let before = history.clone();

        let restored = history
            .restore(&GenerationId::new("gen_3"))
            .expect("entry exists");
        assert_eq!(restored.prompt, "prompt 3");
        assert_eq!(restored.style, StyleTag::from(Style::ALL[3]));
        assert_eq!(restored.image_url, "data:image/jpeg;base64,3");
        assert_eq!(history, before);
    }

    #[test]
    fn restore_unknown_id_is_none() {
        assert!(History::default().restore(&GenerationId::new("nope")).is_none());
    }

    #[test]
    fn save_and_load_round_trip() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base = temp_dir.path().join("nested");
        let mut history = History::default();
        for n in 0..3 {
            history.prepend(record(n));
        }

        history.save_to(Some(base.clone())).expect("save");
        let loaded = History::load_from(Some(base));
        assert_eq!(loaded, history);
    }

    #[test]
    fn unknown_style_tags_round_trip() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut history = History::default();
        history.prepend(GenerationRecord::new(
            GenerationId::new("gen_x"),
            "data:image/jpeg;base64,AA",
            "p",
            StyleTag::new("cyberpunk"),
            "2026-10-14T09:00:00.000Z",
        ));

        history
            .save_to(Some(temp_dir.path().to_path_buf()))
            .expect("save");
        let loaded = History::load_from(Some(temp_dir.path().to_path_buf()));
        assert_eq!(loaded.entries()[0].style().as_str(), "cyberpunk");
    }

    #[test]
    fn missing_file_gives_empty_history() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        assert!(History::load_from(Some(temp_dir.path().to_path_buf())).is_empty());
    }

    #[test]
    fn corrupt_file_gives_empty_history() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(HISTORY_FILE), b"\xff\x00garbage").expect("write");
        assert!(History::load_from(Some(temp_dir.path().to_path_buf())).is_empty());
    }

    #[test]
    fn oversized_file_is_truncated_on_load() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let stored: Vec<StoredGeneration> = (0..8).map(|n| StoredGeneration::from(&record(n))).collect();
        let file = fs::File::create(temp_dir.path().join(HISTORY_FILE)).expect("create");
        ciborium::into_writer(&stored, file).expect("encode");

        let loaded = History::load_from(Some(temp_dir.path().to_path_buf()));
        assert_eq!(loaded.len(), HISTORY_LIMIT);
        assert_eq!(loaded.entries()[0].id().as_str(), "gen_0");
    }

    #[test]
    fn persisted_keys_are_camel_case() {
        let mut bytes = Vec::new();
        ciborium::into_writer(&StoredGeneration::from(&record(1)), &mut bytes).expect("encode");
        let value: ciborium::Value = ciborium::from_reader(bytes.as_slice()).expect("decode");
        let keys: Vec<String> = value
            .as_map()
            .expect("map")
            .iter()
            .filter_map(|(k, _)| k.as_text().map(str::to_owned))
            .collect();
        assert_eq!(keys, ["id", "imageUrl", "prompt", "style", "createdAt"]);
    }
}
