/// Case-insensitive equality used by every name and title lookup.
///
/// Compares per-character lowercase expansions, so non-ASCII letters match
/// across case without allocating.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    if a.len() == b.len() && a.eq_ignore_ascii_case(b) {
        return true;
    }
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
