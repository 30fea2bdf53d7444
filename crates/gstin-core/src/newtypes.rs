/// Validated newtype wrappers for GSTIN and the PAN embedded in it.
///
/// [`Gstin`] enforces the structural GSTIN pattern at construction time via
/// [`TryFrom<&str>`] (or the [`validate`] free function). Input is
/// upper-cased before matching, so `27abcde1234f1z5` and `27ABCDE1234F1Z5`
/// produce the same value. Once constructed the inner value is immutable (no
/// `DerefMut`). Serde `Deserialize` re-runs validation so an invalid GSTIN
/// cannot enter the type system from untrusted JSON.
///
/// The trailing check character is only shape-checked (any of `[0-9A-Z]`);
/// the GSTN check-character algorithm is not computed.
use std::fmt;
use std::ops::Deref;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Message shown to the user for any malformed GSTIN.
pub const INVALID_GSTIN_MESSAGE: &str = "enter a valid 15-character GSTIN";

/// Number of characters in a GSTIN.
pub const GSTIN_LEN: usize = 15;

/// Number of characters in a PAN.
pub const PAN_LEN: usize = 10;

/// Offset of the PAN inside a GSTIN (it follows the two-digit state code).
const PAN_OFFSET: usize = 2;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors produced when a candidate string is not a well-formed GSTIN.
///
/// Both variants display the same user-facing message; the variant and the
/// rejected input are kept for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The input was empty.
    #[error("enter a valid 15-character GSTIN")]
    Empty,
    /// The upper-cased input did not match the GSTIN pattern.
    #[error("enter a valid 15-character GSTIN")]
    InvalidFormat {
        /// The upper-cased input that was rejected.
        got: String,
    },
}

// ---------------------------------------------------------------------------
// Regex statics
// ---------------------------------------------------------------------------

/// State code, PAN (5 letters, 4 digits, 1 letter), entity code, `Z`, check
/// character.
static GSTIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z]{1}[1-9A-Z]{1}Z[0-9A-Z]{1}$")
        .unwrap_or_else(|_| Regex::new("a^").unwrap_or_else(|_| unreachable!("regex engine broken")))
});

// ---------------------------------------------------------------------------
// Gstin
// ---------------------------------------------------------------------------

/// A structurally valid, upper-case GSTIN.
///
/// Layout: `SS PPPPPPPPPP E Z C` where `SS` is the state code, `P…` the PAN
/// of the registered person, `E` the entity code, `Z` a fixed literal and `C`
/// the check character.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Gstin(String);

/// Validates `raw` as a GSTIN, returning the normalized (upper-case) value.
///
/// # Errors
///
/// Returns [`ValidationError`] when `raw` is empty or does not match the
/// GSTIN pattern after upper-casing.
///
/// # Examples
///
/// ```
/// use gstin_core::validate;
///
/// let gstin = validate("27abcde1234f1z5").expect("valid");
/// assert_eq!(gstin.as_str(), "27ABCDE1234F1Z5");
/// assert!(validate("27ABCDE1234F1Y5").is_err());
/// ```
pub fn validate(raw: &str) -> Result<Gstin, ValidationError> {
    Gstin::try_from(raw)
}

impl TryFrom<&str> for Gstin {
    type Error = ValidationError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        if s.is_empty() {
            return Err(ValidationError::Empty);
        }
        let upper = s.to_ascii_uppercase();
        if GSTIN_RE.is_match(&upper) {
            Ok(Self(upper))
        } else {
            Err(ValidationError::InvalidFormat { got: upper })
        }
    }
}

impl Gstin {
    /// Returns the GSTIN as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the two-digit state code.
    pub fn state_code(&self) -> &str {
        // ASCII-only by construction, so byte slicing is on char boundaries.
        &self.0[..PAN_OFFSET]
    }

    /// Returns the PAN embedded at offset 2..12.
    pub fn pan(&self) -> Pan {
        Pan(self.0[PAN_OFFSET..PAN_OFFSET + PAN_LEN].to_owned())
    }

    /// Returns the entity code (13th character).
    pub fn entity_code(&self) -> char {
        self.0
            .chars()
            .nth(PAN_OFFSET + PAN_LEN)
            .unwrap_or_default()
    }

    /// Returns the trailing check character.
    pub fn check_char(&self) -> char {
        self.0.chars().last().unwrap_or_default()
    }
}

impl Deref for Gstin {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Gstin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Gstin {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Gstin {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Self::try_from(s.as_str()).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Pan
// ---------------------------------------------------------------------------

/// Permanent Account Number derived from a GSTIN.
///
/// Not independently validated: it is whatever sits at offset 2..12 of the
/// source string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pan(String);

impl Pan {
    /// Extracts the PAN from an unvalidated GSTIN string.
    ///
    /// Returns `None` when `gstin` has fewer than 12 characters.
    pub fn from_gstin_str(gstin: &str) -> Option<Self> {
        let pan: String = gstin.chars().skip(PAN_OFFSET).take(PAN_LEN).collect();
        if pan.chars().count() == PAN_LEN {
            Some(Self(pan))
        } else {
            None
        }
    }

    /// Returns the PAN as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Pan {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Pan {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
