//! Natural string collation
//!
//! Digit runs compare by numeric value and other text compares without
//! regard to case, so "Widget 9" sorts before "Widget 10". Strings that
//! differ only in case fall back to lowercase-first.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// Sort weight of a character: whitespace and punctuation sort before
/// digits, digits before letters
fn class_rank(c: char) -> u8 {
    if c.is_ascii_digit() {
        1
    } else if c.is_whitespace() || c.is_ascii_punctuation() {
        0
    } else {
        2
    }
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

fn compare_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Case and leading-zero differences, lowercase first
fn tie_break(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        return match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => x.cmp(&y),
        };
    }
    a.len().cmp(&b.len())
}

/// Compare two cell texts the way a locale-aware numeric collation does
pub fn compare_natural(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();
    loop {
        let ord = match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return tie_break(a, b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                compare_digits(&take_digits(&mut left), &take_digits(&mut right))
            }
            (Some(x), Some(y)) => {
                left.next();
                right.next();
                (class_rank(x), fold(x)).cmp(&(class_rank(y), fold(y)))
            }
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
}
