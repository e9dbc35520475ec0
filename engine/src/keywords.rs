//! The default keyword list used to build each day's cipher.

const DEFAULT_KEYWORDS_TXT: &str = include_str!("../data/keywords.txt");

/// Parses the embedded keyword list: one ASCII keyword per line, blank
/// lines ignored.
pub fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS_TXT
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keywords_are_non_empty_ascii() {
        let keywords = default_keywords();
        assert!(!keywords.is_empty());
        for k in &keywords {
            assert!(k.chars().all(|c| c.is_ascii_alphabetic()));
            assert!(k.len() <= 26);
        }
    }
}
