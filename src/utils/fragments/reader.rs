use super::types::Fragment;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// where fragments come from
pub trait FragmentSource {
    /// directory reported in messages
    fn location(&self) -> &Path;

    /// fails with `FragmentDirNotFound` when the directory is absent,
    /// an existing but empty directory yields an empty list
    fn read_fragments(&self) -> Result<Vec<Fragment>>;
}

/// fragments stored as files below `root/files_path`
pub struct FsFragmentSource {
    root: PathBuf,
    files_path: PathBuf,
}

impl FsFragmentSource {
    pub fn new(root: impl Into<PathBuf>, files_path: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files_path: files_path.into(),
        }
    }

    fn directory(&self) -> PathBuf {
        self.root.join(&self.files_path)
    }

    fn is_hidden(path: &Path) -> bool {
        path.file_name()
            .map(|name| name.to_string_lossy().starts_with('.'))
            .unwrap_or(false)
    }

    /// collect file paths relative to `base`
    fn scan_directory_recursive(
        base: &Path,
        directory: &Path,
        files: &mut Vec<PathBuf>,
    ) -> Result<()> {
        let entries = fs::read_dir(directory).map_err(|e| Error::FileReadError {
            path: directory.to_path_buf(),
            source: e,
        })?;

        for entry in entries {
            let entry = entry?;
            let path = entry.path();

            if Self::is_hidden(&path) {
                continue;
            }

            // file_type does not follow symlinks, linked directories are never walked
            let file_type = entry.file_type()?;
            let is_fragment =
                file_type.is_file() || (file_type.is_symlink() && path.is_file());

            if is_fragment {
                if let Ok(relative) = path.strip_prefix(base) {
                    files.push(relative.to_path_buf());
                }
            } else if file_type.is_dir() {
                Self::scan_directory_recursive(base, &path, files)?;
            } else if file_type.is_symlink() {
                debug!(path = %path.display(), "skipping symlinked directory");
            }
        }

        Ok(())
    }
}

impl FragmentSource for FsFragmentSource {
    fn location(&self) -> &Path {
        &self.files_path
    }

    fn read_fragments(&self) -> Result<Vec<Fragment>> {
        let directory = self.directory();
        if !directory.is_dir() {
            return Err(Error::FragmentDirNotFound {
                path: self.files_path.clone(),
            });
        }

        let mut files = Vec::new();
        Self::scan_directory_recursive(&directory, &directory, &mut files)?;
        files.sort();

        let mut fragments = Vec::with_capacity(files.len());
        for relative in files {
            let full_path = directory.join(&relative);
            let contents = fs::read_to_string(&full_path).map_err(|e| Error::FileReadError {
                path: full_path.clone(),
                source: e,
            })?;

            debug!(fragment = %relative.display(), "read fragment");
            fragments.push(Fragment::new(self.files_path.join(relative), contents));
        }

        Ok(fragments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn unreleased(temp_dir: &TempDir) -> PathBuf {
        let dir = temp_dir.path().join("changelogs/unreleased");
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_directory_is_precondition_error() {
        let temp_dir = TempDir::new().unwrap();
        let source = FsFragmentSource::new(temp_dir.path(), "changelogs/unreleased/");

        let result = source.read_fragments();
        assert!(matches!(result, Err(Error::FragmentDirNotFound { .. })));
    }

    #[test]
    fn test_empty_directory_yields_nothing() {
        let temp_dir = TempDir::new().unwrap();
        unreleased(&temp_dir);
        let source = FsFragmentSource::new(temp_dir.path(), "changelogs/unreleased/");

        assert!(source.read_fragments().unwrap().is_empty());
    }

    #[test]
    fn test_reads_fragments_sorted_by_path() {
        let temp_dir = TempDir::new().unwrap();
        let dir = unreleased(&temp_dir);
        fs::write(dir.join("JIRA-2.md"), "Added feature\n").unwrap();
        fs::write(dir.join("JIRA-1.md"), "Fixed bug\n").unwrap();

        let source = FsFragmentSource::new(temp_dir.path(), "changelogs/unreleased/");
        let fragments = source.read_fragments().unwrap();

        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].name, "JIRA-1");
        assert_eq!(fragments[0].contents, "Fixed bug\n");
        assert_eq!(
            fragments[0].path,
            PathBuf::from("changelogs/unreleased/JIRA-1.md")
        );
        assert_eq!(fragments[1].name, "JIRA-2");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_is_not_walked() {
        let temp_dir = TempDir::new().unwrap();
        let dir = unreleased(&temp_dir);
        fs::write(dir.join("JIRA-1.md"), "Fixed bug").unwrap();
        std::os::unix::fs::symlink(&dir, dir.join("loop")).unwrap();

        let source = FsFragmentSource::new(temp_dir.path(), "changelogs/unreleased");
        let fragments = source.read_fragments().unwrap();

        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].name, "JIRA-1");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_is_a_fragment() {
        let temp_dir = TempDir::new().unwrap();
        let dir = unreleased(&temp_dir);
        let outside = temp_dir.path().join("JIRA-5.txt");
        fs::write(&outside, "Linked entry").unwrap();
        std::os::unix::fs::symlink(&outside, dir.join("JIRA-5.md")).unwrap();

        let source = FsFragmentSource::new(temp_dir.path(), "changelogs/unreleased");
        let fragments = source.read_fragments().unwrap();

        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].name, "JIRA-5");
        assert_eq!(fragments[0].contents, "Linked entry");
    }

    #[test]
    fn test_invalid_utf8_fragment_is_read_error() {
        let temp_dir = TempDir::new().unwrap();
        let dir = unreleased(&temp_dir);
        fs::write(dir.join("JIRA-1.md"), "Fixed bug").unwrap();
        fs::write(dir.join("JIRA-9.md"), [0x66, 0x6f, 0xff, 0xfe, 0x6f]).unwrap();

        let source = FsFragmentSource::new(temp_dir.path(), "changelogs/unreleased");
        match source.read_fragments() {
            Err(Error::FileReadError { path, .. }) => {
                assert!(path.ends_with("JIRA-9.md"));
            }
            other => panic!("expected FileReadError, got {:?}", other),
        }
    }

    #[test]
    fn test_recurses_and_skips_hidden_entries() {
        let temp_dir = TempDir::new().unwrap();
        let dir = unreleased(&temp_dir);
        fs::write(dir.join(".gitkeep"), "").unwrap();
        fs::create_dir(dir.join(".cache")).unwrap();
        fs::write(dir.join(".cache/ignored.md"), "ignored").unwrap();
        fs::create_dir(dir.join("api")).unwrap();
        fs::write(dir.join("api/JIRA-7.md"), "New endpoint").unwrap();

        let source = FsFragmentSource::new(temp_dir.path(), "changelogs/unreleased");
        let fragments = source.read_fragments().unwrap();

        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].name, "JIRA-7");
        assert_eq!(
            fragments[0].path,
            PathBuf::from("changelogs/unreleased/api/JIRA-7.md")
        );
    }
}
