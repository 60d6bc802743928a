// version control double that records calls

use crate::error::{Error, Result};
use crate::utils::git_ops::VersionControl;
use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VcsCall {
    Remove(PathBuf),
    Stage(PathBuf),
    Commit(String),
    Tag(String),
}

/// records every call, failing the ones it was told to fail
#[derive(Debug, Default)]
pub struct RecordingVcs {
    calls: RefCell<Vec<VcsCall>>,
    failing_paths: HashSet<PathBuf>,
    fail_commit: bool,
    fail_tag: bool,
}

impl RecordingVcs {
    pub fn new() -> Self {
        Self::default()
    }

    /// make `remove` or `stage` fail for this path
    pub fn fail_on_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.failing_paths.insert(path.into());
        self
    }

    pub fn fail_commit(mut self) -> Self {
        self.fail_commit = true;
        self
    }

    pub fn fail_tag(mut self) -> Self {
        self.fail_tag = true;
        self
    }

    pub fn calls(&self) -> Vec<VcsCall> {
        self.calls.borrow().clone()
    }

    fn simulated_failure(operation: &str) -> Error {
        Error::IoError(std::io::Error::other(format!(
            "simulated {} failure",
            operation
        )))
    }

    fn check_path(&self, operation: &str, path: &Path) -> Result<()> {
        if self.failing_paths.contains(path) {
            Err(Self::simulated_failure(operation))
        } else {
            Ok(())
        }
    }
}

impl VersionControl for RecordingVcs {
    fn remove(&self, path: &Path) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(VcsCall::Remove(path.to_path_buf()));
        self.check_path("remove", path)
    }

    fn stage(&self, path: &Path) -> Result<()> {
        self.calls.borrow_mut().push(VcsCall::Stage(path.to_path_buf()));
        self.check_path("stage", path)
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(VcsCall::Commit(message.to_string()));
        if self.fail_commit {
            return Err(Self::simulated_failure("commit"));
        }
        Ok(())
    }

    fn tag(&self, name: &str) -> Result<()> {
        self.calls.borrow_mut().push(VcsCall::Tag(name.to_string()));
        if self.fail_tag {
            return Err(Self::simulated_failure("tag"));
        }
        Ok(())
    }
}
