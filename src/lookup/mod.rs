//! Drug knowledge sources.
//!
//! A source answers the four user-facing questions (pair check, regimen
//! check, drug info, autocomplete) from either the bundled dataset or the
//! remote services. Input validation happens inside every source before
//! any lookup.

pub mod local;
pub mod remote;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{DrugInfo, PairCheck, RegimenReport};
use crate::remote::RemoteError;
use crate::validation::ValidationError;

pub use local::LocalSource;
pub use remote::RemoteSource;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Could not find a drug named \"{input}\"")]
    Unresolved { input: String },

    #[error("Drug service unavailable: {0}")]
    Upstream(#[from] RemoteError),
}

#[async_trait]
pub trait DrugKnowledgeSource: Send + Sync {
    /// Short identifier reported by the health endpoint.
    fn name(&self) -> &'static str;

    async fn check_pair(&self, raw_a: &str, raw_b: &str) -> Result<PairCheck, LookupError>;

    async fn check_regimen(&self, raws: &[String]) -> Result<RegimenReport, LookupError>;

    /// `Ok(None)` when the drug is not known to this source.
    async fn drug_info(&self, raw: &str) -> Result<Option<DrugInfo>, LookupError>;

    /// Autocomplete. Blank input yields an empty list, not an error.
    async fn suggest(&self, raw: &str) -> Result<Vec<String>, LookupError>;

    /// Names worth offering after a search miss.
    fn available_drugs(&self, _limit: usize) -> Vec<String> {
        Vec::new()
    }
}
