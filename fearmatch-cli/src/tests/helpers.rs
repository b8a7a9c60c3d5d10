//! Test helpers for staging catalog, profile and preference files.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Three well-formed activities plus one record without an id.
pub(super) const CATALOG_JSON: &str = r#"[
  {
    "id": "swim",
    "title": "Open Water Swim",
    "description": "Guided swim across the reservoir",
    "fearCategories": ["water"],
    "difficulty": "challenging",
    "cost": "low",
    "timeCommitment": "half_day",
    "environment": "outdoor",
    "locations": [{ "id": "lake", "name": "Lake Shore" }]
  },
  {
    "id": "climb",
    "title": "Indoor Climbing Taster",
    "fearCategories": ["heights"],
    "difficultyLevel": "easy",
    "costRange": "medium",
    "timeCommitment": "1-3_hours",
    "environment": "indoor",
    "locations": ["gym"]
  },
  {
    "id": "talk",
    "title": "Five Minute Talk",
    "fears": ["public_speaking", "social"],
    "difficulty": "moderate",
    "cost": "free",
    "timeCommitment": "under_1_hour",
    "environment": "indoor"
  },
  { "title": "Record without an id" }
]"#;

pub(super) const PROFILE_JSON: &str = r#"{ "keyFears": ["water"] }"#;

pub(super) const PREFERENCES_JSON: &str = r#"{
  "preferredDifficulty": "challenging",
  "maxCostRange": "low",
  "timeCommitment": "half_day",
  "environment": "outdoor"
}"#;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path, contents).expect("write fixture file");
}

/// Temporary directory holding the CLI input files.
#[derive(Debug)]
pub(super) struct Inputs {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Inputs {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn write(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.path(name);
        write_utf8(&path, contents.as_bytes());
        path
    }

    pub(super) fn catalog(&self) -> Utf8PathBuf {
        self.write("catalog.json", CATALOG_JSON)
    }
}
