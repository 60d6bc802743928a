// in-memory fragment and changelog stores

use crate::error::{Error, Result};
use crate::utils::changelog::ChangelogStore;
use crate::utils::fragments::{Fragment, FragmentSource};
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

/// fragments held in memory, `None` models a missing directory
#[derive(Debug, Clone)]
pub struct MemoryFragments {
    location: PathBuf,
    fragments: Option<Vec<Fragment>>,
}

impl MemoryFragments {
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
            fragments: Some(Vec::new()),
        }
    }

    pub fn missing(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
            fragments: None,
        }
    }

    /// add a fragment file named `file_name` inside the location
    pub fn fragment(mut self, file_name: &str, contents: &str) -> Self {
        let path = self.location.join(file_name);
        self.fragments
            .get_or_insert_with(Vec::new)
            .push(Fragment::new(path, contents));
        self
    }
}

impl FragmentSource for MemoryFragments {
    fn location(&self) -> &Path {
        &self.location
    }

    fn read_fragments(&self) -> Result<Vec<Fragment>> {
        self.fragments
            .clone()
            .ok_or_else(|| Error::FragmentDirNotFound {
                path: self.location.clone(),
            })
    }
}

/// changelog held in memory, counting reads and writes
#[derive(Debug, Default)]
pub struct MemoryChangelog {
    path: PathBuf,
    contents: RefCell<String>,
    loads: Cell<usize>,
    saves: Cell<usize>,
    fail_load: bool,
    fail_save: bool,
}

impl MemoryChangelog {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: RefCell::new(contents.into()),
            ..Self::default()
        }
    }

    pub fn fail_load(mut self) -> Self {
        self.fail_load = true;
        self
    }

    pub fn fail_save(mut self) -> Self {
        self.fail_save = true;
        self
    }

    pub fn contents(&self) -> String {
        self.contents.borrow().clone()
    }

    pub fn loads(&self) -> usize {
        self.loads.get()
    }

    pub fn saves(&self) -> usize {
        self.saves.get()
    }
}

impl ChangelogStore for MemoryChangelog {
    fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<String> {
        self.loads.set(self.loads.get() + 1);
        if self.fail_load {
            return Err(Error::FileReadError {
                path: self.path.clone(),
                source: std::io::Error::other("simulated read failure"),
            });
        }
        Ok(self.contents())
    }

    fn save(&self, contents: &str) -> Result<()> {
        if self.fail_save {
            return Err(Error::ChangelogWriteError {
                path: self.path.clone(),
                source: std::io::Error::other("simulated write failure"),
            });
        }
        self.saves.set(self.saves.get() + 1);
        *self.contents.borrow_mut() = contents.to_string();
        Ok(())
    }
}
