//! openFDA drug label client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::DrugLabel;

use super::{HttpJson, LabelLookup, RemoteError};

pub struct OpenFdaClient {
    http: HttpJson,
}

impl OpenFdaClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RemoteError> {
        Ok(Self {
            http: HttpJson::new(base_url, timeout)?,
        })
    }

    /// First label matching `search`, or `None` on an empty result / 404.
    async fn first_label(&self, search: &str) -> Result<Option<DrugLabel>, RemoteError> {
        let result = self
            .http
            .get_json::<LabelResponse>("/drug/label.json", &[("search", search), ("limit", "1")])
            .await;

        match result {
            Ok(body) => Ok(body.results.into_iter().next().map(LabelResult::into_label)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Search expressions tried in order: generic name, brand name, free text.
fn label_searches(name: &str) -> [String; 3] {
    let term = name.trim().replace('"', "");
    [
        format!("openfda.generic_name:\"{term}\""),
        format!("openfda.brand_name:\"{term}\""),
        term,
    ]
}

#[async_trait]
impl LabelLookup for OpenFdaClient {
    async fn label(&self, name: &str) -> Result<Option<DrugLabel>, RemoteError> {
        for search in label_searches(name) {
            if search.is_empty() {
                continue;
            }
            if let Some(label) = self.first_label(&search).await? {
                tracing::debug!(drug = name, %search, "openFDA label found");
                return Ok(Some(label));
            }
        }
        Ok(None)
    }
}

// ═══════════════════════════════════════════════════════════
// Wire types
// ═══════════════════════════════════════════════════════════

#[derive(Deserialize)]
struct LabelResponse {
    #[serde(default)]
    results: Vec<LabelResult>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct LabelResult {
    openfda: OpenFdaFields,
    indications_and_usage: Vec<String>,
    dosage_and_administration: Vec<String>,
    warnings: Vec<String>,
    boxed_warning: Vec<String>,
    contraindications: Vec<String>,
    adverse_reactions: Vec<String>,
    drug_interactions: Vec<String>,
    mechanism_of_action: Vec<String>,
    information_for_patients: Vec<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct OpenFdaFields {
    generic_name: Vec<String>,
    brand_name: Vec<String>,
    pharm_class_epc: Vec<String>,
}

/// Join a multi-paragraph label section; empty sections become `None`.
fn section(parts: Vec<String>) -> Option<String> {
    let text = parts
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    (!text.is_empty()).then_some(text)
}

impl LabelResult {
    fn into_label(self) -> DrugLabel {
        DrugLabel {
            generic_names: self.openfda.generic_name,
            brand_names: self.openfda.brand_name,
            pharm_classes: self.openfda.pharm_class_epc,
            indications: section(self.indications_and_usage),
            dosage: section(self.dosage_and_administration),
            warnings: section(self.warnings),
            boxed_warning: section(self.boxed_warning),
            contraindications: section(self.contraindications),
            adverse_reactions: section(self.adverse_reactions),
            drug_interactions: section(self.drug_interactions),
            mechanism: section(self.mechanism_of_action),
            patient_information: section(self.information_for_patients),
        }
    }
}
