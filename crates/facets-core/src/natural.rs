//! Digit-aware ("natural") string ordering.
//!
//! Runs of ASCII digits compare by numeric value, everything else compares
//! by character. Strings that only differ in leading zeros fall back to a
//! plain comparison so the order stays total.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();
    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let l = take_digits(&mut left);
                let r = take_digits(&mut right);
                let ord = compare_numeric(&l, &r);
                if ord != Ordering::Equal { return ord; }
            }
            (Some(x), Some(y)) => {
                if x != y { return x.cmp(&y); }
                left.next();
                right.next();
            }
        }
    }
}

pub fn natural_sort(values: &mut [String]) { values.sort_by(|a, b| natural_cmp(a, b)); }

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) { digits.push(c); }
    digits
}

fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
