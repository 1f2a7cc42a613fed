use serde::{Deserialize, Serialize};

use super::ModelError;

/// Clinical risk of an interaction.
///
/// Ordering follows the rank: `Unknown < Minor < Moderate < Major`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Major,
    Moderate,
    Minor,
    Unknown,
}

impl Severity {
    /// Numeric rank used for sorting interaction lists.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Major => 3,
            Self::Moderate => 2,
            Self::Minor => 1,
            Self::Unknown => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Moderate => "moderate",
            Self::Minor => "minor",
            Self::Unknown => "unknown",
        }
    }

    /// Map a third-party severity label onto the four-level scale.
    ///
    /// Never fails: labels outside the known vocabulary become `Unknown`.
    pub fn from_external(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "high" | "major" | "severe" | "contraindicated" => Self::Major,
            "moderate" | "medium" => Self::Moderate,
            "low" | "minor" => Self::Minor,
            _ => Self::Unknown,
        }
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(Self::Major),
            "moderate" => Ok(Self::Moderate),
            "minor" => Ok(Self::Minor),
            "unknown" => Ok(Self::Unknown),
            _ => Err(ModelError::InvalidEnum {
                field: "Severity".into(),
                value: s.into(),
            }),
        }
    }
}
