use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const MAX_IDENTIFIER_LEN: usize = 12;

/// Lookup scheme the symbology service applies to an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdScheme {
    Isin,
    Wkn,
}

impl IdScheme {
    /// Wire name understood by the mapping endpoint.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Isin => "ID_ISIN",
            Self::Wkn => "ID_WERTPAPIER",
        }
    }
}

/// Validated WKN or ISIN as supplied by the caller.
///
/// WKNs are short alphanumeric strings (digits-only values are real,
/// e.g. `716460`); ISINs are twelve characters with a two-letter
/// country prefix. Input is trimmed and uppercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyIdentifier);
        }

        let normalized = trimmed.to_ascii_uppercase();
        let len = normalized.chars().count();
        if len > MAX_IDENTIFIER_LEN {
            return Err(ValidationError::IdentifierTooLong {
                len,
                max: MAX_IDENTIFIER_LEN,
            });
        }

        for (index, ch) in normalized.chars().enumerate() {
            if !ch.is_ascii_alphanumeric() {
                return Err(ValidationError::IdentifierInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classify the identifier. Exactly twelve characters with a `US`
    /// prefix select the ISIN scheme; everything else is looked up as a
    /// WKN. A heuristic, not a checksum-verified ISIN parse.
    pub fn scheme(&self) -> IdScheme {
        if self.0.chars().count() == MAX_IDENTIFIER_LEN && self.0.starts_with("US") {
            IdScheme::Isin
        } else {
            IdScheme::Wkn
        }
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Identifier {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Identifier {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_identifier() {
        let parsed = Identifier::parse(" us0378331005 ").expect("identifier should parse");
        assert_eq!(parsed.as_str(), "US0378331005");
    }

    #[test]
    fn twelve_char_us_prefix_selects_isin_scheme() {
        let isin = Identifier::parse("US0378331005").expect("valid");
        assert_eq!(isin.scheme(), IdScheme::Isin);
        assert_eq!(isin.scheme().as_str(), "ID_ISIN");
    }

    #[test]
    fn non_us_isin_falls_back_to_wkn_scheme() {
        // Twelve characters, but not a US prefix.
        let isin = Identifier::parse("DE0007164600").expect("valid");
        assert_eq!(isin.scheme(), IdScheme::Wkn);
    }

    #[test]
    fn short_wkn_selects_wkn_scheme() {
        let wkn = Identifier::parse("716460").expect("valid");
        assert_eq!(wkn.scheme(), IdScheme::Wkn);
        assert_eq!(wkn.scheme().as_str(), "ID_WERTPAPIER");
    }

    #[test]
    fn us_prefix_without_twelve_chars_stays_wkn() {
        let wkn = Identifier::parse("US1234").expect("valid");
        assert_eq!(wkn.scheme(), IdScheme::Wkn);
    }

    #[test]
    fn rejects_empty_identifier() {
        let err = Identifier::parse("   ").expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptyIdentifier));
    }

    #[test]
    fn rejects_overlong_identifier() {
        let err = Identifier::parse("US03783310055").expect_err("must fail");
        assert!(matches!(err, ValidationError::IdentifierTooLong { len: 13, max: 12 }));
    }

    #[test]
    fn rejects_non_alphanumeric_characters() {
        let err = Identifier::parse("US03-7833100").expect_err("must fail");
        assert!(matches!(err, ValidationError::IdentifierInvalidChar { ch: '-', .. }));
    }
}
