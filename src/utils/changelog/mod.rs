// changelog assembly

pub mod format;
pub mod merge;
pub mod store;

pub use format::format_entries;
pub use merge::{RELEASE_MARKER, find_latest_release, merge, release_header};
pub use store::{ChangelogStore, FsChangelogStore};
