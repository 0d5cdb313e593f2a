//! Station code types.

use std::fmt;

use serde::Serialize;

/// Longest code accepted. Real CRS codes are 3 letters, but TIPLOC-style
/// codes occasionally leak through upstream and run longer.
const MAX_CODE_LEN: usize = 8;

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code {code:?}: {reason}")]
pub struct InvalidStationCode {
    code: String,
    reason: &'static str,
}

/// A station code, normalised to uppercase.
///
/// Only the format is checked. Codes are never validated against a list of
/// known stations; an unknown code simply resolves to itself as a name.
///
/// # Examples
///
/// ```
/// use departure_board::domain::StationCode;
///
/// let kgx = StationCode::parse("kgx").unwrap();
/// assert_eq!(kgx.as_str(), "KGX");
///
/// assert!(StationCode::parse("").is_err());
/// assert!(StationCode::parse("K X").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StationCode(String);

impl StationCode {
    /// Parse a station code, trimming whitespace and upper-casing.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let trimmed = s.trim();
        let invalid = |reason| InvalidStationCode {
            code: s.to_string(),
            reason,
        };

        if trimmed.is_empty() {
            return Err(invalid("must not be empty"));
        }
        if trimmed.len() > MAX_CODE_LEN {
            return Err(invalid("too long"));
        }
        if !trimmed.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(invalid("must be ASCII letters or digits"));
        }

        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.0)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any alphanumeric code parses to its uppercase form
        #[test]
        fn alphanumeric_parses(s in "[A-Za-z0-9]{1,8}") {
            let code = StationCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.to_ascii_uppercase());
        }

        /// Parsing is idempotent
        #[test]
        fn reparse_is_identity(s in "[a-z]{3}") {
            let once = StationCode::parse(&s).unwrap();
            let twice = StationCode::parse(once.as_str()).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}
