pub const PACKAGE_EXTENSION: &str = "pak";

/// Characters kept in destination file names, besides ASCII letters and digits.
const SAFE_PUNCTUATION: &[char] = &['-', '.', '(', ')', '+', '@', ' '];

pub fn is_fs_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || SAFE_PUNCTUATION.contains(&c)
}

/// Reduces a mod name to characters that are safe in a file name.
///
/// Spaces become underscores; anything else outside the safe set is dropped.
/// Unlike the rest of the punctuation, `_` from the input is kept even though
/// it is not in the safe set: dropping it would turn `a_b` (the result of
/// sanitizing `a b`) into `ab`, and sanitizing twice must change nothing.
pub fn sanitize(raw_name: &str) -> String {
    raw_name
        .chars()
        .filter(|&c| c == '_' || is_fs_safe(c))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}

/// `<sanitized>.pak`
pub fn destination_file_name(sanitized_name: &str) -> String {
    format!("{}.{}", sanitized_name, PACKAGE_EXTENSION)
}
