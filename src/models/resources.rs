use serde::{Deserialize, Serialize};

/// Emergency drug quick reference entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyDrug {
    pub drug: String,
    pub indication: String,
    pub dose: String,
    pub route: String,
    #[serde(default)]
    pub notes: String,
}

/// DEA controlled-substance schedule (CI through CV).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlledSchedule {
    pub schedule: String,
    pub description: String,
    #[serde(default)]
    pub examples: Vec<String>,
    pub prescribing: String,
}

/// Boxed warning summary for a drug or drug class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlackBoxWarning {
    pub drug: String,
    pub warning: String,
    pub description: String,
}
