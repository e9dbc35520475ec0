//! Hint selection (spec.md §4.5).

use serde::{Deserialize, Serialize};

use crate::cipher::CipherMapping;
use crate::difficulty::RARITY_ORDER;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    #[serde(rename = "cipherLetter")]
    pub cipher_letter: char,
    #[serde(rename = "plainLetter")]
    pub plain_letter: char,
}

fn rarity_rank(c: char) -> usize {
    RARITY_ORDER.iter().position(|&r| r == c).unwrap_or(usize::MAX)
}

/// Picks up to `count` plaintext→ciphertext reveals, biased toward rare
/// plaintext letters. Deterministic given identical inputs.
pub fn select_hints(mapping: &CipherMapping, ciphertext: &str, count: usize) -> Vec<Hint> {
    if count == 0 {
        return Vec::new();
    }

    let mut present_cipher_letters: Vec<char> = {
        let mut seen = [false; 26];
        let mut letters = Vec::new();
        for c in ciphertext.chars().filter(|c| c.is_ascii_uppercase()) {
            let idx = (c as u8 - b'A') as usize;
            if !seen[idx] {
                seen[idx] = true;
                letters.push(c);
            }
        }
        letters
    };
    // stable, deterministic tie-break: cipher letter ascending before sorting by rarity.
    present_cipher_letters.sort_unstable();

    let mut candidates: Vec<Hint> = present_cipher_letters
        .into_iter()
        .filter_map(|cipher_letter| {
            mapping.decrypt_letter(cipher_letter).map(|plain_letter| Hint {
                cipher_letter,
                plain_letter,
            })
        })
        .collect();

    candidates.sort_by_key(|hint| rarity_rank(hint.plain_letter));
    candidates.truncate(count);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::build_mapping;

    #[test]
    fn empty_inputs_yield_empty_list() {
        let mapping = build_mapping("KEY", 1);
        assert!(select_hints(&mapping, "ABCD", 0).is_empty());
        assert!(select_hints(&mapping, "", 3).is_empty());
    }

    #[test]
    fn no_duplicate_cipher_letters_and_all_present_in_ciphertext() {
        let mapping = build_mapping("ZEBRA", 9);
        let ciphertext = mapping.apply("the quick brown fox jumps over the lazy dog");
        let hints = select_hints(&mapping, &ciphertext, 5);

        let mut seen = std::collections::HashSet::new();
        for hint in &hints {
            assert!(seen.insert(hint.cipher_letter), "duplicate cipher letter");
            assert!(ciphertext.contains(hint.cipher_letter));
            assert_eq!(mapping.encrypt_letter(hint.plain_letter).unwrap(), hint.cipher_letter);
        }
    }

    #[test]
    fn respects_count_and_availability_bounds() {
        let mapping = build_mapping("KEY", 1);
        let ciphertext = mapping.apply("AB");
        let hints = select_hints(&mapping, &ciphertext, 10);
        assert!(hints.len() <= 2);
        assert!(hints.len() <= 10);
    }

    #[test]
    fn is_deterministic() {
        let mapping = build_mapping("KEY", 1);
        let ciphertext = mapping.apply("the quick brown fox");
        assert_eq!(
            select_hints(&mapping, &ciphertext, 3),
            select_hints(&mapping, &ciphertext, 3)
        );
    }
}
