//! In-memory stand-ins for the remote services.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::models::{DrugLabel, InteractionRecord};

use super::{DrugNormalizer, InteractionLister, LabelLookup, RemoteError, ResolvedDrug};

/// Fake RxNav: fixed name table, fixed interaction list, call counters.
#[derive(Default)]
pub struct MockRxNav {
    names: HashMap<String, ResolvedDrug>,
    suggestions: Vec<String>,
    interactions: Vec<InteractionRecord>,
    fail: bool,
    resolve_delay: Option<Duration>,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub resolve_calls: AtomicUsize,
    pub suggest_calls: AtomicUsize,
    pub interaction_calls: AtomicUsize,
}

impl MockRxNav {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_drug(mut self, name: &str, rxcui: &str, display: &str) -> Self {
        self.names.insert(
            name.to_lowercase(),
            ResolvedDrug {
                rxcui: rxcui.into(),
                name: display.into(),
            },
        );
        self
    }

    pub fn with_suggestions(mut self, names: &[&str]) -> Self {
        self.suggestions = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn with_interaction(mut self, record: InteractionRecord) -> Self {
        self.interactions.push(record);
        self
    }

    /// Hold each resolve open for `delay` so overlapping calls show up in
    /// `max_in_flight`.
    pub fn with_resolve_delay(mut self, delay: Duration) -> Self {
        self.resolve_delay = Some(delay);
        self
    }

    /// Every call fails with a connection error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), RemoteError> {
        if self.fail {
            Err(RemoteError::Connection("mock://rxnav".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DrugNormalizer for MockRxNav {
    async fn resolve(&self, name: &str) -> Result<Option<ResolvedDrug>, RemoteError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.resolve_delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.names.get(&name.trim().to_lowercase()).cloned())
    }

    async fn suggest(&self, _partial: &str, limit: usize) -> Result<Vec<String>, RemoteError> {
        self.suggest_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.suggestions.iter().take(limit).cloned().collect())
    }
}

#[async_trait]
impl InteractionLister for MockRxNav {
    async fn interactions(&self, rxcuis: &[String]) -> Result<Vec<InteractionRecord>, RemoteError> {
        self.interaction_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self
            .interactions
            .iter()
            .filter(|r| rxcuis.contains(&r.drug_a) && rxcuis.contains(&r.drug_b))
            .cloned()
            .collect())
    }
}

/// Fake openFDA: labels keyed by lower-case name.
#[derive(Default)]
pub struct MockOpenFda {
    labels: HashMap<String, DrugLabel>,
    fail: bool,
}

impl MockOpenFda {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, name: &str, label: DrugLabel) -> Self {
        self.labels.insert(name.to_lowercase(), label);
        self
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl LabelLookup for MockOpenFda {
    async fn label(&self, name: &str) -> Result<Option<DrugLabel>, RemoteError> {
        if self.fail {
            return Err(RemoteError::Timeout(10_000));
        }
        Ok(self.labels.get(&name.trim().to_lowercase()).cloned())
    }
}
