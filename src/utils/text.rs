/// Characters dropped from the end of every extracted candidate
pub const TRAILING_PUNCTUATION: &[char] = &['。', '．', '、', ','];

/// Normalize line breaks and tabs to `\n` so line-anchored patterns behave
/// the same for text pasted from any mail client.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace(['\r', '\t'], "\n")
}

/// Join the non-blank parts with newlines and normalize the result
pub fn combine_texts(parts: &[&str]) -> String {
    let kept: Vec<&str> = parts
        .iter()
        .copied()
        .filter(|part| !part.trim().is_empty())
        .collect();
    normalize_newlines(&kept.join("\n"))
}

/// Strip trailing Japanese punctuation and surrounding whitespace
pub fn strip_trailing_punctuation(value: &str) -> &str {
    value.trim().trim_end_matches(TRAILING_PUNCTUATION).trim_end()
}

/// Truncate to at most `max` characters without splitting a code point
pub fn truncate_chars(value: &str, max: usize) -> &str {
    match value.char_indices().nth(max) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

/// Whether an optional field counts as filled in
pub fn is_filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}
