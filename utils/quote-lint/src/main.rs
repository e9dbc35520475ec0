//! Offline validator for the quote corpus file spec.md §6 calls the
//! "Quote file format" — the same JSON-array-of-`Quote` shape
//! `unquote-server` loads at startup via `QuoteCorpus::from_json`, but
//! reported exhaustively (every bad entry, not just the first) so a
//! corpus author can fix a whole file in one pass.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use unquote_engine::Quote;

/// Validate a quote corpus file without starting a server.
#[derive(Parser)]
struct Opts {
    /// Path to the JSON quote corpus file.
    file: PathBuf,

    /// Exit non-zero on duplicate ids as well as schema violations.
    #[arg(long)]
    strict: bool,
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    let raw = std::fs::read_to_string(&opts.file)
        .with_context(|| anyhow::anyhow!("failed to read {}", opts.file.display()))?;

    let quotes: Vec<Quote> = serde_json::from_str(&raw)
        .with_context(|| anyhow::anyhow!("{} is not a valid quote array", opts.file.display()))?;

    println!("loaded {} entries from {}", quotes.len(), opts.file.display());

    let mut problems = 0usize;
    let mut seen_ids: HashMap<String, usize> = HashMap::new();

    for (index, quote) in quotes.iter().enumerate() {
        for message in lint_entry(quote) {
            println!("entry {index} ({:?}): {message}", quote.id);
            problems += 1;
        }

        if let Some(first_index) = seen_ids.insert(quote.id.clone(), index) {
            let message = format!("duplicate id {:?} (first seen at entry {first_index})", quote.id);
            println!("entry {index} ({:?}): {message}", quote.id);
            if opts.strict {
                problems += 1;
            }
        }
    }

    if problems == 0 {
        println!("ok: no problems found");
        Ok(())
    } else {
        anyhow::bail!("{problems} problem(s) found in {}", opts.file.display());
    }
}

/// Re-checks the invariants spec.md §3 places on a loaded `Quote`
/// (`QuoteCorpus::from_json`'s own validation stops at the first
/// offender; this walks every entry instead).
fn lint_entry(quote: &Quote) -> Vec<String> {
    let mut problems = Vec::new();

    if quote.id.trim().is_empty() {
        problems.push("id must not be empty".to_owned());
    }
    if quote.text.trim().is_empty() {
        problems.push("text must not be empty".to_owned());
    }
    if quote.difficulty > 100 {
        problems.push(format!("difficulty {} is out of range [0,100]", quote.difficulty));
    }
    if quote.author.trim().is_empty() {
        problems.push("author is empty (allowed, but likely an oversight)".to_owned());
    }

    problems
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(id: &str, text: &str, difficulty: u8) -> Quote {
        Quote {
            id: id.to_owned(),
            text: text.to_owned(),
            author: "A".to_owned(),
            category: "c".to_owned(),
            difficulty,
        }
    }

    #[test]
    fn valid_entry_has_no_problems() {
        assert!(lint_entry(&quote("q1", "Hello", 10)).is_empty());
    }

    #[test]
    fn empty_id_and_text_are_flagged() {
        let problems = lint_entry(&quote("", "", 10));
        assert_eq!(problems.len(), 2);
    }

    #[test]
    fn out_of_range_difficulty_is_flagged() {
        let problems = lint_entry(&quote("q1", "Hello", 200));
        assert!(problems.iter().any(|p| p.contains("out of range")));
    }
}
