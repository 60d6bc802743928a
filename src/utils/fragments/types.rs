use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// one pending change read from the fragment directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// file path relative to the project root
    pub path: PathBuf,
    /// file name without directory or extension
    pub name: String,
    /// raw file text
    pub contents: String,
}

impl Fragment {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        let path = path.into();
        let name = Self::name_from_path(&path);
        Self {
            path,
            name,
            contents: contents.into(),
        }
    }

    /// `changelogs/unreleased/JIRA-1.md` -> `JIRA-1`
    pub fn name_from_path(path: &Path) -> String {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}
