//! Shared types for the API layer.

use std::sync::Arc;

use crate::lookup::DrugKnowledgeSource;
use crate::reference::ReferenceData;

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Shared state for all routes: the active lookup source plus the bundled
/// reference data backing the resource endpoints.
#[derive(Clone)]
pub struct ApiContext {
    pub source: Arc<dyn DrugKnowledgeSource>,
    pub reference: Arc<ReferenceData>,
}

impl ApiContext {
    pub fn new(source: Arc<dyn DrugKnowledgeSource>, reference: Arc<ReferenceData>) -> Self {
        Self { source, reference }
    }
}

/// Correlation id injected into request extensions by the logging
/// middleware.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);
