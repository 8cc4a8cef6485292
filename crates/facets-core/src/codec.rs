//! Filter token codec: `alias<sep>value`.
//!
//! Aliases never contain the separator (enforced when configuration is
//! validated); values may. Decoding splits on the first separator only, so
//! the value comes back verbatim.

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterToken {
    pub alias: String,
    pub value: String,
}

pub fn encode(alias: &str, separator: char, value: &str) -> String {
    let mut token = String::with_capacity(alias.len() + separator.len_utf8() + value.len());
    token.push_str(alias);
    token.push(separator);
    token.push_str(value);
    token
}

pub fn decode(token: &str, separator: char) -> Result<FilterToken> {
    match token.split_once(separator) {
        Some((alias, value)) => Ok(FilterToken { alias: alias.to_string(), value: value.to_string() }),
        None => Err(Error::MalformedToken { token: token.to_string(), separator }),
    }
}
