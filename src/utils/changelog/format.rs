// entry list formatting

use crate::utils::fragments::Fragment;

/// bullet prefix of a single entry line
pub const ENTRY_PREFIX: &str = " * ";

/// render one ` * <name> <contents>` line per fragment, in the given order
pub fn format_entries(fragments: &[Fragment]) -> String {
    let mut list = String::new();
    for fragment in fragments {
        list.push_str(ENTRY_PREFIX);
        list.push_str(&fragment.name);
        list.push(' ');
        list.push_str(fragment.contents.trim());
        list.push('\n');
    }
    list
}
