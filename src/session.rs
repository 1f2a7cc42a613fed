//! Per-user view state for an interactive front end.
//!
//! A `LookupSession` wraps a shared source and keeps one request sequencer
//! per input field. Every call returns `Ok(None)` when a newer call on the
//! same field was started before it finished, so a slow response can never
//! overwrite a fresher one.

use std::sync::Arc;

use crate::lookup::{DrugKnowledgeSource, LookupError};
use crate::models::{DrugInfo, PairCheck, RegimenReport};
use crate::sequence::RequestSequencer;

/// Input fields that issue lookups independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    FirstDrug,
    SecondDrug,
    RegimenEntry,
    Search,
}

pub struct LookupSession {
    source: Arc<dyn DrugKnowledgeSource>,
    first_drug: RequestSequencer,
    second_drug: RequestSequencer,
    regimen_entry: RequestSequencer,
    search: RequestSequencer,
    pair: RequestSequencer,
    regimen: RequestSequencer,
    info: RequestSequencer,
}

impl LookupSession {
    pub fn new(source: Arc<dyn DrugKnowledgeSource>) -> Self {
        Self {
            source,
            first_drug: RequestSequencer::new(),
            second_drug: RequestSequencer::new(),
            regimen_entry: RequestSequencer::new(),
            search: RequestSequencer::new(),
            pair: RequestSequencer::new(),
            regimen: RequestSequencer::new(),
            info: RequestSequencer::new(),
        }
    }

    fn field(&self, field: InputField) -> &RequestSequencer {
        match field {
            InputField::FirstDrug => &self.first_drug,
            InputField::SecondDrug => &self.second_drug,
            InputField::RegimenEntry => &self.regimen_entry,
            InputField::Search => &self.search,
        }
    }

    /// Autocomplete for one field.
    pub async fn suggest(&self, field: InputField, raw: &str) -> Result<Option<Vec<String>>, LookupError> {
        let seq = self.field(field);
        let ticket = seq.issue(raw);
        let result = self.source.suggest(raw).await;
        seq.accept(&ticket, result).transpose()
    }

    pub async fn check_pair(&self, raw_a: &str, raw_b: &str) -> Result<Option<PairCheck>, LookupError> {
        let ticket = self.pair.issue(&format!("{raw_a}|{raw_b}"));
        let result = self.source.check_pair(raw_a, raw_b).await;
        self.pair.accept(&ticket, result).transpose()
    }

    pub async fn check_regimen(&self, raws: &[String]) -> Result<Option<RegimenReport>, LookupError> {
        let ticket = self.regimen.issue(&raws.join("|"));
        let result = self.source.check_regimen(raws).await;
        self.regimen.accept(&ticket, result).transpose()
    }

    /// `Ok(Some(None))` is a current "not found"; `Ok(None)` is stale.
    pub async fn drug_info(&self, raw: &str) -> Result<Option<Option<DrugInfo>>, LookupError> {
        let ticket = self.info.issue(raw);
        let result = self.source.drug_info(raw).await;
        self.info.accept(&ticket, result).transpose()
    }
}
