use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitRepository {
    pub root_path: PathBuf,
    pub is_bare: bool,
    pub git_dir: PathBuf,
}

impl GitRepository {
    pub fn new(root_path: PathBuf, is_bare: bool, git_dir: PathBuf) -> Self {
        Self {
            root_path,
            is_bare,
            git_dir,
        }
    }
}
