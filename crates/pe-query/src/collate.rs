//! Locale-style string ordering
//!
//! Approximates the default collation of a browser `localeCompare`. Both
//! strings are decomposed (NFD); each base character carries the combining
//! marks that follow it. Comparison then runs in levels:
//!
//! 1. Primary: whitespace < punctuation and symbols < digits < letters,
//!    base letters compared without regard to case or accents
//! 2. Secondary: accents, unaccented first (`e` < `é`)
//! 3. Tertiary: lowercase before uppercase
//! 4. Final: code point order, so distinct strings never compare equal

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Compare two strings with locale-style ordering
#[must_use]
pub fn compare(a: &str, b: &str) -> Ordering {
    let (a_elems, b_elems) = (elements(a), elements(b));

    a_elems
        .iter()
        .map(|e| e.primary)
        .cmp(b_elems.iter().map(|e| e.primary))
        .then_with(|| {
            a_elems
                .iter()
                .map(|e| e.marks.as_slice())
                .cmp(b_elems.iter().map(|e| e.marks.as_slice()))
        })
        .then_with(|| {
            a_elems
                .iter()
                .map(|e| e.upper)
                .cmp(b_elems.iter().map(|e| e.upper))
        })
        .then_with(|| a.cmp(b))
}

/// One base character with its trailing combining marks
#[derive(Debug)]
struct Element {
    primary: (u8, char),
    marks: Vec<char>,
    upper: bool,
}

fn elements(s: &str) -> Vec<Element> {
    let mut out: Vec<Element> = Vec::with_capacity(s.len());
    for c in s.nfd() {
        if is_combining_mark(c) {
            if let Some(last) = out.last_mut() {
                last.marks.push(c);
                continue;
            }
        }
        out.push(Element {
            primary: primary_weight(c),
            marks: Vec::new(),
            upper: c.is_uppercase(),
        });
    }
    out
}

fn primary_weight(c: char) -> (u8, char) {
    let class = if c.is_whitespace() {
        0
    } else if c.is_numeric() {
        2
    } else if c.is_alphabetic() {
        3
    } else {
        1
    };
    (class, c.to_lowercase().next().unwrap_or(c))
}
