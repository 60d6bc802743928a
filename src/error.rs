use std::fmt;
use std::path::PathBuf;
use std::process::ExitStatus;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    RepositoryNotFound {
        path: PathBuf,
    },
    FileReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    TomlParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    ConfigMissing {
        key: String,
    },
    FragmentDirNotFound {
        path: PathBuf,
    },
    ChangelogWriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
    GitDiscoverError(Box<gix::discover::Error>),
    IoError(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::RepositoryNotFound { path } => {
                write!(f, "git repository not found in path: {}", path.display())
            }
            Error::FileReadError { path, source } => {
                write!(f, "failed to read file: {} ({})", path.display(), source)
            }
            Error::TomlParseError { path, source } => {
                write!(
                    f,
                    "failed to parse toml file: {} ({})",
                    path.display(),
                    source
                )
            }
            Error::ConfigMissing { key } => {
                write!(f, "required configuration setting is missing: {}", key)
            }
            Error::FragmentDirNotFound { path } => {
                write!(f, "fragment directory does not exist: {}", path.display())
            }
            Error::ChangelogWriteError { path, source } => {
                write!(
                    f,
                    "failed to write changelog: {} ({})",
                    path.display(),
                    source
                )
            }
            Error::CommandFailed {
                command,
                status,
                stderr,
            } => {
                let stderr = stderr.trim();
                if stderr.is_empty() {
                    write!(f, "`{}` failed ({})", command, status)
                } else {
                    write!(f, "`{}` failed ({}): {}", command, status, stderr)
                }
            }
            Error::GitDiscoverError(err) => {
                write!(f, "git discover error: {}", err)
            }
            Error::IoError(err) => {
                write!(f, "io error: {}", err)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FileReadError { source, .. } => Some(source),
            Error::TomlParseError { source, .. } => Some(source),
            Error::ChangelogWriteError { source, .. } => Some(source),
            Error::GitDiscoverError(err) => Some(err.as_ref()),
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<gix::discover::Error> for Error {
    fn from(err: gix::discover::Error) -> Self {
        Error::GitDiscoverError(Box::new(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}
