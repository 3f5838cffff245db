//! # Taxpayer Identifier Newtypes
//!
//! Organisations are identified by a 9-digit TIN, individuals by a
//! 14-digit PINFL. Each identifier is a distinct type: you cannot pass a
//! [`Pinfl`] where a [`Tin`] is expected.
//!
//! ## Validation
//!
//! Both formats are validated at construction time and at deserialization
//! time. Leading zeros are significant and preserved.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Implement `Deserialize` for string newtypes by routing through the
/// type's validating `new()` constructor.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

fn all_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.chars().all(|c| c.is_ascii_digit())
}

/// Taxpayer identification number of an organisation.
///
/// # Validation
///
/// - Must be exactly 9 digits (0-9)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Tin(String);

impl_validating_deserialize!(Tin);

impl Tin {
    /// Create a TIN, validating the 9-digit format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTin`] if the value is not exactly
    /// 9 digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !all_digits(&s, 9) {
            return Err(ValidationError::InvalidTin(s));
        }
        Ok(Self(s))
    }

    /// Access the TIN string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Tin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Tin {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Personal identification number of an individual.
///
/// # Validation
///
/// - Must be exactly 14 digits (0-9)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Pinfl(String);

impl_validating_deserialize!(Pinfl);

impl Pinfl {
    /// Create a PINFL, validating the 14-digit format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPinfl`] if the value is not exactly
    /// 14 digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !all_digits(&s, 14) {
            return Err(ValidationError::InvalidPinfl(s));
        }
        Ok(Self(s))
    }

    /// Access the PINFL string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Pinfl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Pinfl {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Either kind of taxpayer identifier, as accepted by login and by the
/// waybill party fields.
///
/// Serialized as the bare identifier string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum TinOrPinfl {
    /// Organisation.
    Tin(Tin),
    /// Individual.
    Pinfl(Pinfl),
}

impl_validating_deserialize!(TinOrPinfl);

impl TinOrPinfl {
    /// Classify a raw identifier by its length.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTinOrPinfl`] if the value is
    /// neither 9 nor 14 digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if all_digits(&s, 9) {
            Ok(Self::Tin(Tin(s)))
        } else if all_digits(&s, 14) {
            Ok(Self::Pinfl(Pinfl(s)))
        } else {
            Err(ValidationError::InvalidTinOrPinfl(s))
        }
    }

    /// Access the underlying identifier string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Tin(t) => t.as_str(),
            Self::Pinfl(p) => p.as_str(),
        }
    }

    /// True for an individual's PINFL.
    pub fn is_individual(&self) -> bool {
        matches!(self, Self::Pinfl(_))
    }
}

impl From<Tin> for TinOrPinfl {
    fn from(tin: Tin) -> Self {
        Self::Tin(tin)
    }
}

impl From<Pinfl> for TinOrPinfl {
    fn from(pinfl: Pinfl) -> Self {
        Self::Pinfl(pinfl)
    }
}

impl std::fmt::Display for TinOrPinfl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TinOrPinfl {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any 9-digit string is a TIN and classifies as one.
        #[test]
        fn nine_digits_always_tin(s in "[0-9]{9}") {
            prop_assert!(Tin::new(s.clone()).is_ok());
            prop_assert!(!TinOrPinfl::new(s).unwrap().is_individual());
        }

        /// Any 14-digit string is a PINFL and classifies as one.
        #[test]
        fn fourteen_digits_always_pinfl(s in "[0-9]{14}") {
            prop_assert!(Pinfl::new(s.clone()).is_ok());
            prop_assert!(TinOrPinfl::new(s).unwrap().is_individual());
        }
    }
}
