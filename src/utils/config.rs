use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "changefold.toml";
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// substitute `{version}` in a commit message or tag template
pub fn render_template(template: &str, version: &str) -> String {
    template.replace(VERSION_PLACEHOLDER, version)
}

fn default_files_path() -> PathBuf {
    PathBuf::from("changelogs/unreleased/")
}

fn default_commit_message() -> String {
    format!("Finalize version {}", VERSION_PLACEHOLDER)
}

fn default_tag_name() -> String {
    VERSION_PLACEHOLDER.to_string()
}

/// main configuration for changefold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangefoldConfig {
    /// directory holding unreleased fragments, relative to the project root
    #[serde(default = "default_files_path")]
    pub files_path: PathBuf,

    /// changelog document to update (required)
    #[serde(default)]
    pub changelog_file: Option<PathBuf>,

    /// commit and tag the release after merging
    #[serde(default)]
    pub finalize: bool,

    /// commit message used in finalize mode, `{version}` is substituted
    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    /// tag created in finalize mode, `{version}` is substituted
    #[serde(default = "default_tag_name")]
    pub tag_name: String,
}

impl Default for ChangefoldConfig {
    fn default() -> Self {
        Self {
            files_path: default_files_path(),
            changelog_file: None,
            finalize: false,
            commit_message: default_commit_message(),
            tag_name: default_tag_name(),
        }
    }
}

impl ChangefoldConfig {
    /// load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| Error::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: ChangefoldConfig =
            toml::from_str(&contents).map_err(|e| Error::TomlParseError {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(config)
    }

    /// find and load configuration file in the project root
    ///
    /// returns default config if no file is found, but a file that exists
    /// and cannot be parsed is an error
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Self> {
        match Self::find_config_file(&root) {
            Some(config_path) => Self::load_from_file(config_path),
            None => Ok(Self::default()),
        }
    }

    /// looks for `changefold.toml` in the project root
    pub fn find_config_file<P: AsRef<Path>>(root: P) -> Option<PathBuf> {
        let config_path = root.as_ref().join(CONFIG_FILE_NAME);

        if config_path.is_file() {
            Some(config_path)
        } else {
            None
        }
    }

    /// changelog path, or a configuration error when it was never set
    pub fn changelog_file(&self) -> Result<&Path> {
        self.changelog_file
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| Error::ConfigMissing {
                key: "changelog_file".to_string(),
            })
    }
}
