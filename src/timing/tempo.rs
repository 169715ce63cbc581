// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Tempo range and parsing helpers.

/// Slowest tempo the metronome runs at
pub const MIN_BPM: u32 = 40;

/// Fastest tempo the metronome runs at
pub const MAX_BPM: u32 = 208;

/// Clamp any integer tempo into the playable range
pub fn clamp_bpm(value: i64) -> u32 {
    value.clamp(MIN_BPM as i64, MAX_BPM as i64) as u32
}

/// Parse the leading integer of a tempo field
///
/// Leading whitespace and a single sign are accepted; parsing stops at the
/// first non-digit. Returns `None` if no digits are found. Values too large
/// for `i64` saturate.
pub fn parse_bpm(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits: &str = &digits[..digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len())];
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits
        .bytes()
        .fold(0i64, |acc, b| acc.saturating_mul(10).saturating_add((b - b'0') as i64));
    Some(if negative { -magnitude } else { magnitude })
}
