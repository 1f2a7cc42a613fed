//! Clients for the external drug services.
//!
//! Two services are consumed: RxNav (name normalization, suggestions,
//! interaction lists) and openFDA (product labels). Each concern sits
//! behind a trait so lookup sources can be tested with in-memory fakes.

pub mod openfda;
pub mod rxnav;

#[cfg(test)]
pub(crate) mod mock;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{DrugLabel, InteractionRecord};

pub use openfda::OpenFdaClient;
pub use rxnav::RxNavClient;

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Cannot connect to {0}")]
    Connection(String),

    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("Service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("HTTP client error: {0}")]
    Http(String),
}

impl RemoteError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// A drug name resolved to its RxNorm concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDrug {
    pub rxcui: String,
    pub name: String,
}

/// Name normalization and autocomplete.
#[async_trait]
pub trait DrugNormalizer: Send + Sync {
    /// `Ok(None)` when the service knows no concept for `name`.
    async fn resolve(&self, name: &str) -> Result<Option<ResolvedDrug>, RemoteError>;

    async fn suggest(&self, partial: &str, limit: usize) -> Result<Vec<String>, RemoteError>;
}

/// Interaction lists keyed by RxCUI.
#[async_trait]
pub trait InteractionLister: Send + Sync {
    /// Every known interaction among `rxcuis`. Records use the RxCUIs as
    /// `drug_a` / `drug_b`.
    async fn interactions(&self, rxcuis: &[String]) -> Result<Vec<InteractionRecord>, RemoteError>;
}

/// Product label lookup.
#[async_trait]
pub trait LabelLookup: Send + Sync {
    async fn label(&self, name: &str) -> Result<Option<DrugLabel>, RemoteError>;
}

// ═══════════════════════════════════════════════════════════
// Shared HTTP plumbing
// ═══════════════════════════════════════════════════════════

/// JSON-over-GET client bound to one base URL.
#[derive(Debug, Clone)]
pub(crate) struct HttpJson {
    base_url: String,
    client: reqwest::Client,
    timeout_ms: u64,
}

impl HttpJson {
    pub(crate) fn new(base_url: &str, timeout: Duration) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pharmassist/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RemoteError::Http(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        })
    }

    /// GET `path` with URL-encoded `query` and decode the JSON body.
    /// Non-success statuses become `RemoteError::Status`.
    pub(crate) async fn get_json<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, RemoteError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }

    fn map_send_error(&self, e: reqwest::Error) -> RemoteError {
        if e.is_timeout() {
            RemoteError::Timeout(self.timeout_ms)
        } else if e.is_connect() {
            RemoteError::Connection(self.base_url.clone())
        } else {
            RemoteError::Http(e.to_string())
        }
    }
}

/// Serve `router` on an ephemeral local port and return its base URL.
#[cfg(test)]
pub(crate) async fn spawn_stub(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}
