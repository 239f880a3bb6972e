//! Area specification shorthand
//!
//! A spec is a comma separated list of pieces. Each piece is either a single
//! area name (`A1`, `7`, `North`) or an inclusive ascending range (`1-5`,
//! `B2-B10`). Ranges over prefixed names only expand when both ends share the
//! same alphabetic prefix; anything that does not look like a range is kept as
//! a literal area name, so parsing never fails.

use tracing::warn;

/// Most areas a single range may expand to; longer ranges stay literal
pub const MAX_RANGE_LEN: u64 = 10_000;

/// Expand a spec into the ordered list of area ids it names
pub fn parse(spec: &str) -> Vec<String> {
    let mut areas = Vec::new();

    for piece in spec.split(',') {
        let piece = piece.trim();
        match piece.split_once('-') {
            Some((start, end)) => expand_range(piece, start.trim(), end.trim(), &mut areas),
            None => areas.push(piece.to_string()),
        }
    }

    areas
}

fn expand_range(piece: &str, start: &str, end: &str, out: &mut Vec<String>) {
    match range_bounds(start, end) {
        Some((prefix, lo, hi)) if within_limit(piece, lo, hi) => {
            out.extend((lo..=hi).map(|n| format!("{}{}", prefix, n)));
        }
        _ => out.push(piece.to_string()),
    }
}

/// Shared prefix and numeric bounds of a range, or `None` if it is not one
fn range_bounds<'a>(start: &'a str, end: &str) -> Option<(&'a str, u64, u64)> {
    if is_digits(start) && is_digits(end) {
        if let (Ok(lo), Ok(hi)) = (start.parse::<u64>(), end.parse::<u64>()) {
            return Some(("", lo, hi));
        }
    }

    let (start_prefix, start_number) = split_prefix(start)?;
    let (end_prefix, end_number) = split_prefix(end)?;
    if start_prefix != end_prefix || !is_digits(start_number) || !is_digits(end_number) {
        return None;
    }
    let lo = start_number.parse::<u64>().ok()?;
    let hi = end_number.parse::<u64>().ok()?;
    Some((start_prefix, lo, hi))
}

/// Descending ranges are empty and always allowed
fn within_limit(piece: &str, lo: u64, hi: u64) -> bool {
    match hi.checked_sub(lo) {
        Some(span) if span >= MAX_RANGE_LEN => {
            warn!(piece, max = MAX_RANGE_LEN, "range too long, keeping it as a literal area");
            false
        }
        _ => true,
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Split `AB12` into (`AB`, `12`). Either half may be empty, but nothing
/// may follow the digits.
fn split_prefix(token: &str) -> Option<(&str, &str)> {
    let split = token
        .bytes()
        .position(|b| !b.is_ascii_alphabetic())
        .unwrap_or(token.len());
    let (prefix, number) = token.split_at(split);

    if number.bytes().all(|b| b.is_ascii_digit()) {
        Some((prefix, number))
    } else {
        None
    }
}
