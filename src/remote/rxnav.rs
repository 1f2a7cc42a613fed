//! RxNav REST client: RxNorm name resolution, approximate-term
//! suggestions, and the interaction list API.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::interactions::PairKey;
use crate::models::{InteractionRecord, Severity};
use crate::suggestions::dedup_names;

use super::{DrugNormalizer, HttpJson, InteractionLister, RemoteError, ResolvedDrug};

/// RxNorm "normalized string" search mode.
const SEARCH_NORMALIZED: &str = "2";

pub struct RxNavClient {
    http: HttpJson,
}

impl RxNavClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RemoteError> {
        Ok(Self {
            http: HttpJson::new(base_url, timeout)?,
        })
    }

    async fn exact_rxcui(&self, name: &str) -> Result<Option<String>, RemoteError> {
        let body: RxcuiResponse = self
            .http
            .get_json("/REST/rxcui.json", &[("name", name), ("search", SEARCH_NORMALIZED)])
            .await?;
        Ok(body
            .id_group
            .and_then(|g| g.rxnorm_id)
            .and_then(|ids| ids.into_iter().find(|id| !id.is_empty())))
    }

    async fn approximate(&self, term: &str, max_entries: usize) -> Result<Vec<Candidate>, RemoteError> {
        let max = max_entries.to_string();
        let body: ApproximateResponse = self
            .http
            .get_json("/REST/approximateTerm.json", &[("term", term), ("maxEntries", max.as_str())])
            .await?;

        let mut candidates = body
            .approximate_group
            .and_then(|g| g.candidate)
            .unwrap_or_default();
        // Stable: equal ranks keep service order.
        candidates.sort_by_key(Candidate::rank);
        Ok(candidates)
    }

    async fn concept_name(&self, rxcui: &str) -> Result<Option<String>, RemoteError> {
        let path = format!("/REST/rxcui/{rxcui}/properties.json");
        let body: PropertiesResponse = self.http.get_json(&path, &[]).await?;
        Ok(body
            .properties
            .map(|p| p.name)
            .filter(|n| !n.trim().is_empty()))
    }
}

#[async_trait]
impl DrugNormalizer for RxNavClient {
    async fn resolve(&self, name: &str) -> Result<Option<ResolvedDrug>, RemoteError> {
        let name = name.trim();

        let rxcui = match self.exact_rxcui(name).await? {
            Some(id) => Some(id),
            None => {
                tracing::debug!(drug = name, "No exact RxNorm match, trying approximate search");
                self.approximate(name, 1)
                    .await?
                    .into_iter()
                    .map(|c| c.rxcui)
                    .find(|id| !id.is_empty())
            }
        };

        let Some(rxcui) = rxcui else {
            return Ok(None);
        };

        let display = match self.concept_name(&rxcui).await {
            Ok(Some(n)) => n,
            Ok(None) => name.to_string(),
            Err(e) => {
                tracing::warn!(%rxcui, error = %e, "RxNorm properties lookup failed, using input name");
                name.to_string()
            }
        };

        Ok(Some(ResolvedDrug { rxcui, name: display }))
    }

    async fn suggest(&self, partial: &str, limit: usize) -> Result<Vec<String>, RemoteError> {
        // Candidates repeat across vocabularies; over-fetch before de-duplicating.
        let candidates = self.approximate(partial.trim(), limit.saturating_mul(3)).await?;
        let mut names = dedup_names(candidates.into_iter().filter_map(|c| c.name));
        names.truncate(limit);
        Ok(names)
    }
}

#[async_trait]
impl InteractionLister for RxNavClient {
    async fn interactions(&self, rxcuis: &[String]) -> Result<Vec<InteractionRecord>, RemoteError> {
        if rxcuis.len() < 2 {
            return Ok(Vec::new());
        }
        let joined = rxcuis.join(" ");
        let body: InteractionListResponse = self
            .http
            .get_json("/REST/interaction/list.json", &[("rxcuis", joined.as_str())])
            .await?;

        let requested: HashSet<&str> = rxcuis.iter().map(String::as_str).collect();
        let mut seen = HashSet::new();
        let mut records = Vec::new();

        for group in body.full_interaction_type_group.unwrap_or_default() {
            let source = group.source_name.unwrap_or_default();
            for kind in group.full_interaction_type.unwrap_or_default() {
                for pair in kind.interaction_pair.unwrap_or_default() {
                    let Some(record) = pair.into_record(&source, &requested) else {
                        continue;
                    };
                    if seen.insert(PairKey::new(&record.drug_a, &record.drug_b)) {
                        records.push(record);
                    }
                }
            }
        }

        tracing::debug!(drugs = rxcuis.len(), interactions = records.len(), "RxNav interaction list");
        Ok(records)
    }
}

// ═══════════════════════════════════════════════════════════
// Wire types
// ═══════════════════════════════════════════════════════════

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RxcuiResponse {
    id_group: Option<IdGroup>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdGroup {
    rxnorm_id: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApproximateResponse {
    approximate_group: Option<ApproximateGroup>,
}

#[derive(Deserialize)]
struct ApproximateGroup {
    candidate: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    rxcui: String,
    #[serde(default)]
    rank: Option<String>,
    name: Option<String>,
}

impl Candidate {
    fn rank(&self) -> u32 {
        self.rank
            .as_deref()
            .and_then(|r| r.trim().parse().ok())
            .unwrap_or(u32::MAX)
    }
}

#[derive(Deserialize)]
struct PropertiesResponse {
    properties: Option<Properties>,
}

#[derive(Deserialize)]
struct Properties {
    #[serde(default)]
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InteractionListResponse {
    full_interaction_type_group: Option<Vec<InteractionTypeGroup>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InteractionTypeGroup {
    source_name: Option<String>,
    full_interaction_type: Option<Vec<FullInteractionType>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FullInteractionType {
    interaction_pair: Option<Vec<InteractionPair>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InteractionPair {
    #[serde(default)]
    interaction_concept: Vec<InteractionConcept>,
    severity: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InteractionConcept {
    min_concept_item: ConceptItem,
}

#[derive(Deserialize)]
struct ConceptItem {
    rxcui: String,
}

impl InteractionPair {
    /// Pairs naming anything other than two distinct requested RxCUIs are
    /// dropped.
    fn into_record(self, source: &str, requested: &HashSet<&str>) -> Option<InteractionRecord> {
        let [a, b] = <[InteractionConcept; 2]>::try_from(self.interaction_concept).ok()?;
        let (a, b) = (a.min_concept_item.rxcui, b.min_concept_item.rxcui);
        if a == b || !requested.contains(a.as_str()) || !requested.contains(b.as_str()) {
            return None;
        }

        Some(InteractionRecord {
            drug_a: a,
            drug_b: b,
            severity: Severity::from_external(self.severity.as_deref().unwrap_or_default()),
            mechanism: String::new(),
            clinical_effect: self.description.unwrap_or_default(),
            management: String::new(),
            onset: String::new(),
            documentation: source.to_string(),
        })
    }
}
