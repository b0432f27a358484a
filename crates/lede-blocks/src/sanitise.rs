//! Configuration-id sanitisation.

/// Normalises `id` into a valid block configuration id.
///
/// Lowercases the input, collapses every run of characters outside
/// `[a-z0-9.]` (underscores included, so `"x!_y"` and `"x_y"` both come out
/// with a single separator) to one underscore, then strips any
/// non-alphanumeric characters from both ends.
///
/// ```
/// use lede_blocks::sanitise_id;
///
/// assert_eq!(sanitise_id("My Theme!_Block"), "my_theme_block");
/// assert_eq!(sanitise_id("base_search.page"), "base_search.page");
/// ```
pub fn sanitise_id(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    let mut in_run = false;
    for c in id.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }

    let start = out
        .find(|c: char| c.is_ascii_alphanumeric())
        .unwrap_or(out.len());
    let end = out
        .rfind(|c: char| c.is_ascii_alphanumeric())
        .map_or(0, |i| i + 1);
    if start >= end {
        return String::new();
    }
    out[start..end].to_string()
}
