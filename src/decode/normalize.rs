//! String sequence normalization

/// Trims leading and trailing whitespace from every element.
///
/// Order and element count are preserved; elements that are all whitespace
/// become empty strings rather than being dropped.
pub fn trim_strings(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| {
            let trimmed = s.trim();
            if trimmed.len() == s.len() {
                s
            } else {
                trimmed.to_string()
            }
        })
        .collect()
}
