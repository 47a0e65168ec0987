//! Work shifts as a closed set of schedule categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The work schedule an employee is assigned to.
///
/// Ordering follows the working day, which keeps per-shift tallies stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shift {
    Morning,
    Afternoon,
    Night,
}

impl Shift {
    /// All shifts, in day order.
    pub const ALL: [Self; 3] = [Self::Morning, Self::Afternoon, Self::Night];

    /// Canonical lowercase name used for display and storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Night => "night",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Shift {
    type Err = UnknownShift;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" | "matutino" => Ok(Self::Morning),
            "afternoon" | "vespertino" => Ok(Self::Afternoon),
            "night" | "noturno" => Ok(Self::Night),
            _ => Err(UnknownShift(s.to_string())),
        }
    }
}

impl Serialize for Shift {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Shift {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for strings outside the shift enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownShift(String);

impl UnknownShift {
    /// The rejected input, as given.
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnknownShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown shift '{}', expected one of: morning, afternoon, night",
            self.0
        )
    }
}

impl std::error::Error for UnknownShift {}
