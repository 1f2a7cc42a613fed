use serde::{Deserialize, Serialize};

use crate::validation::normalize_key;

/// Dosing guidance split by patient population.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dosing {
    pub adult: String,
    #[serde(default)]
    pub elderly: String,
    #[serde(default)]
    pub renal: String,
    #[serde(default)]
    pub hepatic: String,
}

/// Reference profile for one drug, keyed by its lower-case identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugRecord {
    pub id: String,
    pub generic_name: String,
    #[serde(default)]
    pub brand_names: Vec<String>,
    pub drug_class: String,
    #[serde(default)]
    pub indications: Vec<String>,
    pub mechanism: String,
    #[serde(default)]
    pub dosing: Dosing,
    #[serde(default)]
    pub monitoring: String,
    #[serde(default)]
    pub contraindications: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub adverse_effects: Vec<String>,
    #[serde(default)]
    pub counseling: Vec<String>,
}

impl DrugRecord {
    /// Brand name check under the same normalization as lookup keys.
    pub fn has_brand(&self, brand: &str) -> bool {
        let key = normalize_key(brand);
        self.brand_names.iter().any(|b| normalize_key(b) == key)
    }
}
