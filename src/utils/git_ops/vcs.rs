use super::repository::GitOps;
use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// the version control operations the release workflow needs
pub trait VersionControl {
    /// delete a tracked file and stage the deletion
    fn remove(&self, path: &Path) -> Result<()>;

    /// stage a file for the next commit
    fn stage(&self, path: &Path) -> Result<()>;

    fn commit(&self, message: &str) -> Result<()>;

    fn tag(&self, name: &str) -> Result<()>;
}

/// runs the `git` executable from the project root
pub struct GitCli {
    root: PathBuf,
}

impl GitCli {
    /// use `root` without checking it is a repository
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// verify that `root` is inside a git work tree before anything is changed
    pub fn discover(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let repository =
            GitOps::get_repository_info(&root).map_err(|_| Error::RepositoryNotFound {
                path: root.clone(),
            })?;

        if repository.is_bare {
            return Err(Error::RepositoryNotFound { path: root });
        }

        debug!(work_dir = %repository.root_path.display(), "using git repository");
        Ok(Self { root })
    }

    fn run(&self, args: &[&OsStr]) -> Result<()> {
        let command = std::iter::once(String::from("git"))
            .chain(args.iter().map(|arg| arg.to_string_lossy().to_string()))
            .collect::<Vec<_>>()
            .join(" ");
        debug!(%command, "running");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(Error::IoError)?;

        if !output.status.success() {
            return Err(Error::CommandFailed {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        Ok(())
    }
}

impl VersionControl for GitCli {
    fn remove(&self, path: &Path) -> Result<()> {
        self.run(&[
            OsStr::new("rm"),
            OsStr::new("--quiet"),
            OsStr::new("--"),
            path.as_os_str(),
        ])
    }

    fn stage(&self, path: &Path) -> Result<()> {
        self.run(&[OsStr::new("add"), OsStr::new("--"), path.as_os_str()])
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.run(&[
            OsStr::new("commit"),
            OsStr::new("--quiet"),
            OsStr::new("-m"),
            OsStr::new(message),
        ])
    }

    fn tag(&self, name: &str) -> Result<()> {
        self.run(&[OsStr::new("tag"), OsStr::new(name)])
    }
}
