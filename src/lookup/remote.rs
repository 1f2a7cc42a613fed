use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};

use crate::config::{AppConfig, RESOLVE_CONCURRENCY, SUGGESTION_LIMIT};
use crate::interactions::{find_all_interactions, InteractionTable};
use crate::models::{DrugInfo, InteractionRecord, PairCheck, RegimenReport};
use crate::remote::{
    DrugNormalizer, InteractionLister, LabelLookup, OpenFdaClient, RemoteError, RxNavClient,
};
use crate::suggestions::SuggestionCache;
use crate::validation::{
    capitalize, ensure_distinct, normalize_key, validate_pair, validate_query, validate_regimen,
    DrugQuery, ValidationError,
};

use super::{DrugKnowledgeSource, LookupError};

/// Answers from RxNav and openFDA.
///
/// Drugs are resolved to RxCUIs first; interactions are then fetched in
/// one request for all of them and matched by RxCUI.
pub struct RemoteSource {
    normalizer: Arc<dyn DrugNormalizer>,
    interactions: Arc<dyn InteractionLister>,
    labels: Arc<dyn LabelLookup>,
    cache: SuggestionCache,
}

impl RemoteSource {
    pub fn new(
        normalizer: Arc<dyn DrugNormalizer>,
        interactions: Arc<dyn InteractionLister>,
        labels: Arc<dyn LabelLookup>,
    ) -> Self {
        Self {
            normalizer,
            interactions,
            labels,
            cache: SuggestionCache::new(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, RemoteError> {
        let rxnav = Arc::new(RxNavClient::new(&config.rxnav_url, config.http_timeout)?);
        let openfda = Arc::new(OpenFdaClient::new(&config.openfda_url, config.http_timeout)?);
        Ok(Self::new(rxnav.clone(), rxnav, openfda))
    }

    /// Resolve every query, at most `RESOLVE_CONCURRENCY` at a time. The
    /// returned queries are keyed by RxCUI and display the resolved concept
    /// name, in input order.
    async fn resolve_all(&self, queries: &[DrugQuery]) -> Result<Vec<DrugQuery>, LookupError> {
        let futures: Vec<_> = queries.iter().map(|q| self.normalizer.resolve(q.key())).collect();
        let results: Vec<_> = stream::iter(futures)
            .buffered(RESOLVE_CONCURRENCY)
            .collect()
            .await;

        queries
            .iter()
            .zip(results)
            .map(|(query, result)| match result? {
                Some(drug) => Ok(DrugQuery::canonical(drug.rxcui, capitalize(&drug.name))),
                None => {
                    tracing::info!(input = query.key(), "Drug name did not resolve");
                    Err(LookupError::Unresolved {
                        input: query.display().to_string(),
                    })
                }
            })
            .collect()
    }

    async fn interaction_table(&self, resolved: &[DrugQuery]) -> Result<InteractionTable, LookupError> {
        let rxcuis: Vec<String> = resolved.iter().map(|q| q.key().to_string()).collect();
        let records = self.interactions.interactions(&rxcuis).await?;
        Ok(InteractionTable::new(records))
    }
}

/// Replace RxCUIs in a record with the resolved names.
fn relabel(mut record: InteractionRecord, names: &HashMap<&str, &str>) -> InteractionRecord {
    if let Some(name) = names.get(record.drug_a.as_str()) {
        record.drug_a = name.to_string();
    }
    if let Some(name) = names.get(record.drug_b.as_str()) {
        record.drug_b = name.to_string();
    }
    record
}

fn name_map(resolved: &[DrugQuery]) -> HashMap<&str, &str> {
    resolved.iter().map(|q| (q.key(), q.display())).collect()
}

#[async_trait]
impl DrugKnowledgeSource for RemoteSource {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn check_pair(&self, raw_a: &str, raw_b: &str) -> Result<PairCheck, LookupError> {
        let (a, b) = validate_pair(raw_a, raw_b)?;
        let resolved = self.resolve_all(&[a, b]).await?;
        let (ra, rb) = (&resolved[0], &resolved[1]);
        if ra.key() == rb.key() {
            return Err(ValidationError::SameDrug.into());
        }

        let table = self.interaction_table(&resolved).await?;
        let names = name_map(&resolved);
        let interaction = table
            .find_interaction(ra.key(), rb.key())
            .cloned()
            .map(|r| relabel(r, &names));

        Ok(PairCheck {
            drug_a_display: ra.display().to_string(),
            drug_b_display: rb.display().to_string(),
            interaction,
        })
    }

    async fn check_regimen(&self, raws: &[String]) -> Result<RegimenReport, LookupError> {
        let drugs = validate_regimen(raws)?;
        let resolved = self.resolve_all(&drugs).await?;
        ensure_distinct(&resolved)?;

        let table = self.interaction_table(&resolved).await?;
        let names = name_map(&resolved);
        let found = find_all_interactions(&table, &resolved)
            .into_iter()
            .map(|mut f| {
                f.interaction = relabel(f.interaction, &names);
                f
            })
            .collect();

        Ok(RegimenReport::new(resolved.len(), found))
    }

    async fn drug_info(&self, raw: &str) -> Result<Option<DrugInfo>, LookupError> {
        let query = validate_query(raw)?;
        match self.labels.label(query.key()).await {
            Ok(label) => Ok(label.map(DrugInfo::Label)),
            Err(e) => {
                tracing::warn!(drug = query.key(), error = %e, "Label lookup failed, reporting not found");
                Ok(None)
            }
        }
    }

    async fn suggest(&self, raw: &str) -> Result<Vec<String>, LookupError> {
        let key = normalize_key(raw);
        if key.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }

        match self.normalizer.suggest(&key, SUGGESTION_LIMIT).await {
            Ok(names) => Ok(self.cache.insert(&key, names)),
            Err(e) => {
                tracing::warn!(query = %key, error = %e, "Suggestion lookup failed");
                Ok(Vec::new())
            }
        }
    }
}
