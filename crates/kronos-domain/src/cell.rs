//! Cell identifier module
//!
//! Backends report cell ids as strings or numbers, with inconsistent
//! whitespace and letter case. Overlap tests compare canonical forms only.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Malformed cell identifier or correlation record field
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CellIdNormalizationError {
    /// Nothing left after trimming
    #[error("Cell id is empty")]
    Empty,

    /// Whitespace inside the identifier
    #[error("Cell id '{0}' contains inner whitespace")]
    InnerWhitespace(String),

    /// Character outside the accepted alphabet
    #[error("Cell id '{raw}' contains invalid character '{found}'")]
    InvalidCharacter {
        /// Raw identifier as received
        raw: String,
        /// First offending character
        found: char,
    },

    /// Confidence outside [0, 1] or not a number
    #[error("Confidence {0} is outside [0.0, 1.0]")]
    InvalidConfidence(f64),
}

/// Canonical cell-tower identifier
///
/// Canonical form: trimmed, lowercased, and optionally with leading zeros
/// stripped. Stripping must be applied to both sides of a comparison or to
/// neither; callers pass the same flag for every id they compare.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellId(String);

impl CellId {
    /// Parse and canonicalize a raw identifier
    ///
    /// # Errors
    /// Returns an error if the id is empty, has inner whitespace, or contains
    /// characters outside `[A-Za-z0-9_.:-]`
    ///
    /// # Examples
    ///
    /// ```
    /// use kronos_domain::CellId;
    ///
    /// let a = CellId::parse(" 0512AB ", false).unwrap();
    /// assert_eq!(a.as_str(), "0512ab");
    ///
    /// let b = CellId::parse("0512ab", true).unwrap();
    /// assert_eq!(b.as_str(), "512ab");
    /// ```
    pub fn parse(raw: &str, strip_leading_zeros: bool) -> Result<Self, CellIdNormalizationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CellIdNormalizationError::Empty);
        }

        if trimmed.chars().any(char::is_whitespace) {
            return Err(CellIdNormalizationError::InnerWhitespace(raw.to_string()));
        }

        if let Some(found) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | ':' | '-')))
        {
            return Err(CellIdNormalizationError::InvalidCharacter {
                raw: raw.to_string(),
                found,
            });
        }

        let mut canonical = trimmed.to_ascii_lowercase();
        if strip_leading_zeros {
            let stripped = canonical.trim_start_matches('0');
            canonical = if stripped.is_empty() {
                "0".to_string()
            } else {
                stripped.to_string()
            };
        }

        Ok(Self(canonical))
    }

    /// Get the canonical form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
