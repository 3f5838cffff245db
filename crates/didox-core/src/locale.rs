//! Interface language tag used in authentication paths.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Language the platform answers in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Russian, the platform default.
    #[default]
    Ru,
    /// Uzbek.
    Uz,
    /// English.
    En,
}

impl Locale {
    /// Path segment form, e.g. `"ru"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::Uz => "uz",
            Self::En => "en",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Locale {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ru" => Ok(Self::Ru),
            "uz" => Ok(Self::Uz),
            "en" => Ok(Self::En),
            _ => Err(ValidationError::UnknownLocale(s.to_string())),
        }
    }
}
