/// Split free-text comma-separated tag input into the tag list sent to the
/// API. Segments are trimmed, empty segments dropped, order preserved.
/// Duplicates are kept; the API is the authority on tag identity.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
