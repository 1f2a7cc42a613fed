use std::sync::Arc;

use async_trait::async_trait;

use crate::config::SUGGESTION_LIMIT;
use crate::interactions::find_all_interactions;
use crate::models::{DrugInfo, PairCheck, RegimenReport};
use crate::reference::ReferenceData;
use crate::suggestions::rank_suggestions;
use crate::validation::{validate_pair, validate_query, validate_regimen};

use super::{DrugKnowledgeSource, LookupError};

/// Answers everything from the bundled reference dataset. Never touches
/// the network and never returns `LookupError::Upstream`.
pub struct LocalSource {
    reference: Arc<ReferenceData>,
}

impl LocalSource {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self { reference }
    }
}

#[async_trait]
impl DrugKnowledgeSource for LocalSource {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn check_pair(&self, raw_a: &str, raw_b: &str) -> Result<PairCheck, LookupError> {
        let (a, b) = validate_pair(raw_a, raw_b)?;
        let interaction = self
            .reference
            .interactions()
            .find_interaction(a.key(), b.key())
            .cloned();

        tracing::debug!(
            drug_a = a.key(),
            drug_b = b.key(),
            found = interaction.is_some(),
            "Local pair check"
        );

        Ok(PairCheck {
            drug_a_display: a.display().to_string(),
            drug_b_display: b.display().to_string(),
            interaction,
        })
    }

    async fn check_regimen(&self, raws: &[String]) -> Result<RegimenReport, LookupError> {
        let drugs = validate_regimen(raws)?;
        let found = find_all_interactions(self.reference.interactions(), &drugs);
        Ok(RegimenReport::new(drugs.len(), found))
    }

    async fn drug_info(&self, raw: &str) -> Result<Option<DrugInfo>, LookupError> {
        let query = validate_query(raw)?;
        Ok(self
            .reference
            .drug_info(query.key())
            .cloned()
            .map(DrugInfo::Reference))
    }

    async fn suggest(&self, raw: &str) -> Result<Vec<String>, LookupError> {
        Ok(rank_suggestions(&self.reference.drug_ids(), raw, SUGGESTION_LIMIT))
    }

    fn available_drugs(&self, limit: usize) -> Vec<String> {
        self.reference
            .available_drugs(limit)
            .into_iter()
            .map(String::from)
            .collect()
    }
}
