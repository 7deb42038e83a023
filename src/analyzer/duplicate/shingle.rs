/// Lowercase and collapse runs of whitespace to single spaces.
#[must_use]
pub fn canonicalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Word n-grams over the canonical form of `text`.
///
/// Text with at most `size` tokens yields a single shingle of the whole
/// canonical text; empty text yields none.
#[must_use]
pub fn word_shingles(text: &str, size: usize) -> Vec<String> {
    let canonical = canonicalize(text);
    let tokens: Vec<&str> = canonical.split(' ').filter(|t| !t.is_empty()).collect();
    if tokens.is_empty() {
        return Vec::new();
    }
    if tokens.len() <= size {
        return vec![tokens.join(" ")];
    }
    tokens.windows(size).map(|window| window.join(" ")).collect()
}
