use crate::error::{Error, Result};
use std::path::Path;
use std::process::Command;

/// Test git repository driven through the git command line
pub struct TestGitRepo {
    repo_path: std::path::PathBuf,
}

impl TestGitRepo {
    /// Initialize a new git repository at the given path
    pub fn init<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Self {
            repo_path: path.as_ref().to_path_buf(),
        };

        repo.git(&["init", "--quiet"])?;
        repo.git(&["config", "user.name", "Test User"])?;
        repo.git(&["config", "user.email", "test@example.com"])?;
        // Disable signing for tests
        repo.git(&["config", "commit.gpgsign", "false"])?;
        repo.git(&["config", "tag.gpgsign", "false"])?;

        Ok(repo)
    }

    /// Run git in the repository and return its stdout
    pub fn git(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .output()
            .map_err(Error::IoError)?;

        if !output.status.success() {
            return Err(Error::CommandFailed {
                command: format!("git {}", args.join(" ")),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Write a file relative to the repository root, creating parents
    pub fn write_file(&self, file_path: &str, content: &str) -> Result<()> {
        let full_path = self.repo_path.join(file_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(full_path, content)?;
        Ok(())
    }

    /// Add all files and create a commit
    pub fn add_all_and_commit(&self, message: &str) -> Result<()> {
        self.git(&["add", "."])?;
        self.git(&["commit", "--quiet", "-m", message])?;
        Ok(())
    }

    /// Get the repository path
    pub fn path(&self) -> &Path {
        &self.repo_path
    }

    /// Paths staged for the next commit
    pub fn staged_files(&self) -> Result<Vec<String>> {
        Ok(Self::lines(&self.git(&["diff", "--cached", "--name-only"])?))
    }

    /// Paths tracked in the index
    pub fn tracked_files(&self) -> Result<Vec<String>> {
        Ok(Self::lines(&self.git(&["ls-files"])?))
    }

    pub fn tags(&self) -> Result<Vec<String>> {
        Ok(Self::lines(&self.git(&["tag", "--list"])?))
    }

    /// Subject of the HEAD commit
    pub fn head_subject(&self) -> Result<String> {
        Ok(self.git(&["log", "-1", "--format=%s"])?.trim().to_string())
    }

    fn lines(output: &str) -> Vec<String> {
        output
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect()
    }
}
