use std::collections::HashMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::interactions::InteractionTable;
use crate::models::{BlackBoxWarning, ControlledSchedule, DrugRecord, EmergencyDrug, InteractionRecord};
use crate::validation::normalize_key;

const INTERACTIONS_FILE: &str = "interactions.json";
const DRUGS_FILE: &str = "drugs.json";
const EMERGENCY_FILE: &str = "emergency_drugs.json";
const CONTROLLED_FILE: &str = "controlled_substances.json";
const BLACK_BOX_FILE: &str = "black_box_warnings.json";

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Failed to load reference data from {0}: {1}")]
    Load(String, String),

    #[error("Failed to parse reference data {0}: {1}")]
    Parse(String, String),
}

/// Immutable reference dataset: interaction table, drug profiles, and the
/// quick-reference resources.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    interactions: InteractionTable,
    drugs: Vec<DrugRecord>,
    drug_index: HashMap<String, usize>,
    pub emergency_drugs: Vec<EmergencyDrug>,
    pub controlled_substances: Vec<ControlledSchedule>,
    pub black_box_warnings: Vec<BlackBoxWarning>,
}

impl ReferenceData {
    /// Dataset compiled into the binary.
    pub fn bundled() -> Result<Self, ReferenceError> {
        Ok(Self::from_parts(
            parse(INTERACTIONS_FILE, include_str!("../resources/interactions.json"))?,
            parse(DRUGS_FILE, include_str!("../resources/drugs.json"))?,
            parse(EMERGENCY_FILE, include_str!("../resources/emergency_drugs.json"))?,
            parse(CONTROLLED_FILE, include_str!("../resources/controlled_substances.json"))?,
            parse(BLACK_BOX_FILE, include_str!("../resources/black_box_warnings.json"))?,
        ))
    }

    /// Load the dataset from JSON files in `resources_dir`.
    ///
    /// All five files must be present.
    pub fn load(resources_dir: &Path) -> Result<Self, ReferenceError> {
        Ok(Self::from_parts(
            read(resources_dir, INTERACTIONS_FILE)?,
            read(resources_dir, DRUGS_FILE)?,
            read(resources_dir, EMERGENCY_FILE)?,
            read(resources_dir, CONTROLLED_FILE)?,
            read(resources_dir, BLACK_BOX_FILE)?,
        ))
    }

    /// Small fixture for tests (no file I/O).
    #[cfg(test)]
    pub(crate) fn load_test() -> Self {
        use crate::models::{Dosing, Severity};

        let interaction = |a: &str, b: &str, severity, mechanism: &str| InteractionRecord {
            drug_a: a.into(),
            drug_b: b.into(),
            severity,
            mechanism: mechanism.into(),
            clinical_effect: "Clinical effect".into(),
            management: "Management".into(),
            onset: "Days".into(),
            documentation: "Established".into(),
        };
        let drug = |id: &str, generic: &str, brands: &[&str]| DrugRecord {
            id: id.into(),
            generic_name: generic.into(),
            brand_names: brands.iter().map(|b| b.to_string()).collect(),
            drug_class: "Test class".into(),
            indications: vec!["Test indication".into()],
            mechanism: "Test mechanism".into(),
            dosing: Dosing {
                adult: "Test dose".into(),
                ..Default::default()
            },
            monitoring: String::new(),
            contraindications: vec![],
            warnings: vec![],
            adverse_effects: vec![],
            counseling: vec![],
        };

        Self::from_parts(
            vec![
                interaction("warfarin", "amiodarone", Severity::Major, "CYP2C9 inhibition"),
                interaction("amiodarone", "simvastatin", Severity::Major, "CYP3A4 inhibition"),
                interaction("metoprolol", "simvastatin", Severity::Minor, "Minimal interaction"),
                interaction("warfarin", "acetaminophen", Severity::Moderate, "Unclear"),
            ],
            vec![
                drug("warfarin", "Warfarin", &["Coumadin", "Jantoven"]),
                drug("amiodarone", "Amiodarone", &["Cordarone", "Pacerone"]),
                drug("metformin", "Metformin", &["Glucophage"]),
                drug("simvastatin", "Simvastatin", &["Zocor"]),
            ],
            vec![EmergencyDrug {
                drug: "Epinephrine".into(),
                indication: "Anaphylaxis".into(),
                dose: "0.3-0.5mg IM".into(),
                route: "IM".into(),
                notes: String::new(),
            }],
            vec![ControlledSchedule {
                schedule: "CII".into(),
                description: "High abuse potential".into(),
                examples: vec!["Oxycodone".into()],
                prescribing: "Written prescription".into(),
            }],
            vec![BlackBoxWarning {
                drug: "Warfarin".into(),
                warning: "Bleeding Risk".into(),
                description: "Can cause major or fatal bleeding.".into(),
            }],
        )
    }

    fn from_parts(
        interactions: Vec<InteractionRecord>,
        drugs: Vec<DrugRecord>,
        emergency_drugs: Vec<EmergencyDrug>,
        controlled_substances: Vec<ControlledSchedule>,
        black_box_warnings: Vec<BlackBoxWarning>,
    ) -> Self {
        let interactions = InteractionTable::new(interactions);

        let mut drug_index = HashMap::with_capacity(drugs.len());
        for (pos, record) in drugs.iter().enumerate() {
            drug_index.entry(normalize_key(&record.id)).or_insert(pos);
        }

        tracing::info!(
            interaction_pairs = interactions.len(),
            shadowed_pairs = interactions.shadowed(),
            drugs = drugs.len(),
            "Reference data loaded"
        );

        Self {
            interactions,
            drugs,
            drug_index,
            emergency_drugs,
            controlled_substances,
            black_box_warnings,
        }
    }

    pub fn interactions(&self) -> &InteractionTable {
        &self.interactions
    }

    pub fn drugs(&self) -> &[DrugRecord] {
        &self.drugs
    }

    /// Drug profile by identifier, falling back to a brand-name match.
    ///
    /// Case- and whitespace-insensitive. `None` is the normal
    /// "not in database" outcome.
    pub fn drug_info(&self, id: &str) -> Option<&DrugRecord> {
        let key = normalize_key(id);
        if key.is_empty() {
            return None;
        }
        self.drug_index
            .get(&key)
            .and_then(|&pos| self.drugs.get(pos))
            .or_else(|| self.drugs.iter().find(|d| d.has_brand(&key)))
    }

    /// Sorted drug identifiers, for autocomplete.
    pub fn drug_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.drugs.iter().map(|d| d.id.as_str()).collect();
        ids.sort_unstable();
        ids
    }

    /// First `limit` identifiers in alphabetical order, offered when a
    /// search misses.
    pub fn available_drugs(&self, limit: usize) -> Vec<&str> {
        let mut ids = self.drug_ids();
        ids.truncate(limit);
        ids
    }
}

fn parse<T: DeserializeOwned>(file: &str, json: &str) -> Result<T, ReferenceError> {
    serde_json::from_str(json).map_err(|e| ReferenceError::Parse(file.into(), e.to_string()))
}

fn read<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<T, ReferenceError> {
    let path = dir.join(file);
    let json = std::fs::read_to_string(&path)
        .map_err(|e| ReferenceError::Load(path.display().to_string(), e.to_string()))?;
    parse(file, &json)
}
