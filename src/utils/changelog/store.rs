// changelog persistence

use crate::error::{Error, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};
use tracing::debug;

/// storage for the changelog document
pub trait ChangelogStore {
    /// changelog path relative to the project root
    fn path(&self) -> &Path;

    /// current document, empty when it does not exist yet
    fn load(&self) -> Result<String>;

    /// replace the whole document
    fn save(&self, contents: &str) -> Result<()>;
}

/// changelog stored at `root/file`
pub struct FsChangelogStore {
    root: PathBuf,
    file: PathBuf,
}

impl FsChangelogStore {
    pub fn new(root: impl Into<PathBuf>, file: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            file: file.into(),
        }
    }

    pub fn full_path(&self) -> PathBuf {
        self.root.join(&self.file)
    }

    /// a new changelog is created 0o666 minus the umask, like a plain write
    #[cfg(unix)]
    fn temp_file(parent: &Path, creating: bool) -> std::io::Result<NamedTempFile> {
        use std::os::unix::fs::PermissionsExt;

        let mut builder = Builder::new();
        if creating {
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        builder.tempfile_in(parent)
    }

    #[cfg(not(unix))]
    fn temp_file(parent: &Path, _creating: bool) -> std::io::Result<NamedTempFile> {
        Builder::new().tempfile_in(parent)
    }

    /// write through a temporary sibling and rename it over the target
    fn write_atomic(target: &Path, contents: &str) -> std::io::Result<()> {
        let parent = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let existing = fs::metadata(target).ok();
        let mut temp = Self::temp_file(parent, existing.is_none())?;
        temp.write_all(contents.as_bytes())?;
        temp.as_file().sync_all()?;

        // keep the mode of the file being replaced
        if let Some(metadata) = existing {
            fs::set_permissions(temp.path(), metadata.permissions())?;
        }

        temp.persist(target).map_err(|e| e.error)?;
        Ok(())
    }
}

impl ChangelogStore for FsChangelogStore {
    fn path(&self) -> &Path {
        &self.file
    }

    fn load(&self) -> Result<String> {
        let path = self.full_path();
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(changelog = %path.display(), "changelog does not exist yet");
                Ok(String::new())
            }
            Err(e) => Err(Error::FileReadError { path, source: e }),
        }
    }

    fn save(&self, contents: &str) -> Result<()> {
        let path = self.full_path();
        Self::write_atomic(&path, contents)
            .map_err(|e| Error::ChangelogWriteError { path, source: e })
    }
}
