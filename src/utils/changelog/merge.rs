// release header insertion

/// marks the start of a release block, both when writing and when searching
pub const RELEASE_MARKER: &str = "## >> ";

/// `\n## >> {version} ({date})\n{entry_block}`
pub fn release_header(version: &str, date: &str, entry_block: &str) -> String {
    format!("\n{}{} ({})\n{}", RELEASE_MARKER, version, date, entry_block)
}

/// byte offset of the most recent release block, if any
pub fn find_latest_release(existing: &str) -> Option<usize> {
    existing.find(RELEASE_MARKER)
}

/// insert a new release block into `existing`
///
/// the block goes right before the latest release so any preamble stays on
/// top, it is appended when there is no release yet, and it becomes the whole
/// document when `existing` is empty. existing bytes are never dropped.
pub fn merge(existing: &str, version: &str, date: &str, entry_block: &str) -> String {
    let header = release_header(version, date, entry_block);

    if existing.is_empty() {
        return header;
    }

    let mut merged = String::with_capacity(existing.len() + header.len());
    match find_latest_release(existing) {
        Some(position) => {
            merged.push_str(&existing[..position]);
            merged.push_str(&header);
            merged.push_str(&existing[position..]);
        }
        None => {
            merged.push_str(existing);
            merged.push_str(&header);
        }
    }
    merged
}
