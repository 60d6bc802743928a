// unreleased fragment discovery

pub mod reader;
pub mod types;

pub use reader::{FragmentSource, FsFragmentSource};
pub use types::Fragment;
