use serde::{Deserialize, Serialize};

use super::drug::DrugRecord;

/// Structured sections of a product label from the labeling service.
/// Absent sections are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrugLabel {
    #[serde(default)]
    pub generic_names: Vec<String>,
    #[serde(default)]
    pub brand_names: Vec<String>,
    #[serde(default)]
    pub pharm_classes: Vec<String>,
    pub indications: Option<String>,
    pub dosage: Option<String>,
    pub warnings: Option<String>,
    pub boxed_warning: Option<String>,
    pub contraindications: Option<String>,
    pub adverse_reactions: Option<String>,
    pub drug_interactions: Option<String>,
    pub mechanism: Option<String>,
    pub patient_information: Option<String>,
}

impl DrugLabel {
    /// Best display name: first generic name, else first brand name.
    pub fn display_name(&self) -> Option<&str> {
        self.generic_names
            .first()
            .or_else(|| self.brand_names.first())
            .map(String::as_str)
    }
}

/// Drug information from whichever source answered the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum DrugInfo {
    Reference(DrugRecord),
    Label(DrugLabel),
}

impl DrugInfo {
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Self::Reference(record) => Some(record.generic_name.as_str()),
            Self::Label(label) => label.display_name(),
        }
    }
}
