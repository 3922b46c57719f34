//! Categorical skill dimensions shared by processes and employees.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Primary skill category. Drives both exact and relaxed matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Potential {
    Sales,
    Consultation,
    Service,
    Support,
}

/// Communication level. Secondary, droppable matching criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Communication {
    Excellent,
    #[serde(rename = "Very Good")]
    VeryGood,
    Good,
}

/// Raised when a label does not name a known skill value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSkillValue {
    pub field: &'static str,
    pub value: String,
    pub expected: &'static [&'static str],
}

impl Display for UnknownSkillValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid {} value `{}`; valid values are: {}",
            self.field,
            self.value,
            self.expected.join(", ")
        )
    }
}

impl Error for UnknownSkillValue {}

impl Potential {
    pub const ALL: [Potential; 4] = [
        Potential::Sales,
        Potential::Consultation,
        Potential::Service,
        Potential::Support,
    ];
    const LABELS: &'static [&'static str] = &["Sales", "Consultation", "Service", "Support"];

    /// Canonical label used in storage and presentation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sales => "Sales",
            Self::Consultation => "Consultation",
            Self::Service => "Service",
            Self::Support => "Support",
        }
    }
}

impl Communication {
    pub const ALL: [Communication; 3] = [
        Communication::Excellent,
        Communication::VeryGood,
        Communication::Good,
    ];
    const LABELS: &'static [&'static str] = &["Excellent", "Very Good", "Good"];

    /// Canonical label used in storage and presentation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::VeryGood => "Very Good",
            Self::Good => "Good",
        }
    }
}

impl FromStr for Potential {
    type Err = UnknownSkillValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == trimmed)
            .ok_or_else(|| UnknownSkillValue {
                field: "potential",
                value: trimmed.to_string(),
                expected: Self::LABELS,
            })
    }
}

impl FromStr for Communication {
    type Err = UnknownSkillValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == trimmed)
            .ok_or_else(|| UnknownSkillValue {
                field: "communication",
                value: trimmed.to_string(),
                expected: Self::LABELS,
            })
    }
}

impl Display for Potential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for Communication {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
