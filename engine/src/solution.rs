//! Solution checking (spec.md §4.8).

use crate::error::EngineError;

/// Normalizes a submission for comparison: letters uppercased, digits and
/// punctuation retained verbatim, whitespace runs preserved (not
/// collapsed). Rejects any character outside `[A-Z 0-9 punctuation
/// whitespace]`.
pub fn normalize(input: &str) -> Result<String, EngineError> {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if c.is_ascii_alphabetic() {
            out.push(c.to_ascii_uppercase());
        } else if c.is_ascii_digit() || c.is_ascii_punctuation() || c.is_whitespace() {
            out.push(c);
        } else {
            return Err(EngineError::InvalidInput(format!(
                "disallowed character {:?} in submission",
                c
            )));
        }
    }
    Ok(out)
}

/// Compares a submission against the canonical plaintext, position-exact,
/// case-insensitive.
pub fn check(submission: &str, plaintext: &str) -> Result<bool, EngineError> {
    let normalized_submission = normalize(submission)?;
    let normalized_plaintext = plaintext.to_ascii_uppercase();
    Ok(normalized_submission == normalized_plaintext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_case_insensitive_match_is_correct() {
        assert_eq!(check("hello, world!", "Hello, World!"), Ok(true));
    }

    #[test]
    fn single_letter_perturbation_is_incorrect() {
        assert_eq!(check("hellp, world!", "Hello, World!"), Ok(false));
    }

    #[test]
    fn whitespace_runs_are_preserved_not_collapsed() {
        assert_eq!(check("hello   world", "hello world"), Ok(false));
        assert_eq!(check("hello   world", "hello   world"), Ok(true));
    }

    #[test]
    fn disallowed_characters_are_rejected() {
        assert!(normalize("héllo").is_err());
    }
}
