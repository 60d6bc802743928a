pub mod error;
pub mod utils;

pub use error::*;
pub use utils::changelog::{
    ChangelogStore, FsChangelogStore, RELEASE_MARKER, find_latest_release, format_entries, merge,
    release_header,
};
pub use utils::cleanup::{CleanupStep, CleanupWarning, FinalizeRequest, cleanup};
pub use utils::config::ChangefoldConfig;
pub use utils::fragments::{Fragment, FragmentSource, FsFragmentSource};
pub use utils::generator::{ChangelogGenerator, Outcome, Preview, ReleaseRequest, Report};
pub use utils::git_ops::{GitCli, GitOps, GitRepository, VersionControl};
