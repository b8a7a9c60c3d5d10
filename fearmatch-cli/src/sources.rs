//! File-backed collaborators for profile and preference records.

use camino::{Utf8Path, Utf8PathBuf};
use fearmatch_core::{
    LoadError, PreferenceRecord, PreferenceSource, ProfileRecord, ProfileSource, UserId,
};
use fearmatch_fs::read_utf8_file;
use serde::de::DeserializeOwned;

/// Reads a [`ProfileRecord`] from an optional JSON file.
///
/// Without a path the user simply has no profile.
#[derive(Debug, Clone, Default)]
pub(crate) struct FileProfileSource {
    path: Option<Utf8PathBuf>,
}

impl FileProfileSource {
    pub(crate) const fn new(path: Option<Utf8PathBuf>) -> Self {
        Self { path }
    }
}

impl ProfileSource for FileProfileSource {
    fn fetch_profile(&self, user: &UserId) -> Result<Option<ProfileRecord>, LoadError> {
        self.path
            .as_deref()
            .map(|path| load_record(path, "profile", user))
            .transpose()
    }
}

/// Reads a [`PreferenceRecord`] from an optional JSON file.
#[derive(Debug, Clone, Default)]
pub(crate) struct FilePreferenceSource {
    path: Option<Utf8PathBuf>,
}

impl FilePreferenceSource {
    pub(crate) const fn new(path: Option<Utf8PathBuf>) -> Self {
        Self { path }
    }
}

impl PreferenceSource for FilePreferenceSource {
    fn fetch_preferences(&self, user: &UserId) -> Result<Option<PreferenceRecord>, LoadError> {
        self.path
            .as_deref()
            .map(|path| load_record(path, "preferences", user))
            .transpose()
    }
}

fn load_record<T: DeserializeOwned>(
    path: &Utf8Path,
    what: &'static str,
    user: &UserId,
) -> Result<T, LoadError> {
    let unavailable = |reason: String| LoadError::Unavailable {
        what,
        user: user.clone(),
        reason,
    };
    let contents = read_utf8_file(path).map_err(|err| unavailable(format!("{path}: {err}")))?;
    serde_json::from_str(&contents).map_err(|err| unavailable(format!("{path}: {err}")))
}
