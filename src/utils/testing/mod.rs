// testing utilities: version control and storage doubles, scratch git repositories

pub mod git_utils;
pub mod memory_store;
pub mod recording_vcs;

pub use git_utils::TestGitRepo;
pub use memory_store::{MemoryChangelog, MemoryFragments};
pub use recording_vcs::{RecordingVcs, VcsCall};
