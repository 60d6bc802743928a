use super::types::GitRepository;
use crate::error::{Error, Result};
use std::path::Path;

pub struct GitOps;

impl GitOps {
    // discovery starts from the parent when given a file
    fn discovery_path(path: &Path) -> Result<&Path> {
        if path.is_file() {
            path.parent().ok_or_else(|| Error::RepositoryNotFound {
                path: path.to_path_buf(),
            })
        } else {
            Ok(path)
        }
    }

    /// get detailed repository information
    pub fn get_repository_info<P: AsRef<Path>>(path: P) -> Result<GitRepository> {
        let path = path.as_ref();
        let check_path = Self::discovery_path(path)?;

        let repo = gix::discover(check_path)?;

        let is_bare = repo.is_bare();
        let git_dir = repo.git_dir().to_path_buf();

        let root_path = if let Some(work_dir) = repo.work_dir() {
            work_dir.to_path_buf()
        } else {
            git_dir.clone()
        };

        Ok(GitRepository::new(root_path, is_bare, git_dir))
    }
}
