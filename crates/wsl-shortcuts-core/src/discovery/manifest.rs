//! Parsing of desktop manifest text returned by the subsystem.

/// Value of the first line starting with `key` (for example `Name=`).
///
/// Localized keys such as `Name[de]=` do not match. Returns `None` when the
/// key is missing or its value is blank.
pub fn extract_display_name(text: &str, key: &str) -> Option<String> {
    text.lines()
        .map(|line| line.trim_start_matches('\u{feff}'))
        .find_map(|line| line.strip_prefix(key))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// Parse `path<TAB>name` lines emitted by a batched scan.
///
/// Lines without a tab or with a blank name are dropped.
pub fn parse_batched_listing(text: &str) -> Vec<(String, String)> {
    text.lines()
        .filter_map(|line| {
            let (path, name) = line.split_once('\t')?;
            let path = path.trim();
            let name = name.trim();
            if path.is_empty() || name.is_empty() {
                None
            } else {
                Some((path.to_string(), name.to_string()))
            }
        })
        .collect()
}
