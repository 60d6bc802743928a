pub mod repository;
pub mod types;
pub mod vcs;

pub use repository::GitOps;
pub use types::GitRepository;
pub use vcs::{GitCli, VersionControl};
