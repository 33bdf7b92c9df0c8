use crate::engine::format::matches_isbn13;
use serde::Serialize;
use std::fmt;

/// GS1 "Bookland" prefix of an ISBN-13
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooklandPrefix {
    /// 978, the range shared with legacy ISBN-10
    P978,
    /// 979, ISBN-13 only (no ISBN-10 form)
    P979,
}

/// A 13-digit ISBN as printed in an EAN-13 symbol.
///
/// Only constructed through [`Isbn::parse`], so the payload always matches
/// the structural pattern `97[89]` followed by ten digits. The check digit
/// is *not* verified on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Isbn(String);

impl Isbn {
    /// Parse a payload, returning `None` unless it is structurally an ISBN-13
    pub fn parse(payload: &str) -> Option<Self> {
        if matches_isbn13(payload) {
            Some(Self(payload.to_owned()))
        } else {
            None
        }
    }

    /// The 13 digits
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Bookland prefix
    pub fn prefix(&self) -> BooklandPrefix {
        if self.0.starts_with("979") {
            BooklandPrefix::P979
        } else {
            BooklandPrefix::P978
        }
    }

    /// Check the EAN-13 mod-10 check digit (weights 1,3,1,3,...)
    pub fn has_valid_check_digit(&self) -> bool {
        let digits = self.digits();
        let expected = ean13_check_digit(&digits[..12]);
        digits[12] == expected
    }

    /// Legacy ISBN-10 form.
    ///
    /// Only 978-prefixed codes with a correct check digit have one; the
    /// last character may be `X`.
    pub fn to_isbn10(&self) -> Option<String> {
        if self.prefix() != BooklandPrefix::P978 || !self.has_valid_check_digit() {
            return None;
        }
        let digits = self.digits();
        let body = &digits[3..12];
        let sum: u32 = body
            .iter()
            .enumerate()
            .map(|(i, &d)| (10 - i as u32) * d as u32)
            .sum();
        let check = (11 - sum % 11) % 11;

        let mut out: String = body.iter().map(|&d| char::from(b'0' + d)).collect();
        if check == 10 {
            out.push('X');
        } else {
            out.push(char::from(b'0' + check as u8));
        }
        Some(out)
    }

    fn digits(&self) -> [u8; 13] {
        let mut digits = [0u8; 13];
        for (slot, b) in digits.iter_mut().zip(self.0.bytes()) {
            *slot = b - b'0';
        }
        digits
    }
}

/// EAN-13 check digit over the first twelve digits
fn ean13_check_digit(body: &[u8]) -> u8 {
    let sum: u32 = body
        .iter()
        .enumerate()
        .map(|(i, &d)| if i % 2 == 0 { d as u32 } else { 3 * d as u32 })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Isbn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
