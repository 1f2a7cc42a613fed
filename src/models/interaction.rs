use serde::{Deserialize, Serialize};

use super::enums::Severity;

/// A known interaction between exactly two drug identifiers (order-independent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub drug_a: String,
    pub drug_b: String,
    pub severity: Severity,
    pub mechanism: String,
    pub clinical_effect: String,
    pub management: String,
    #[serde(default)]
    pub onset: String,
    #[serde(default)]
    pub documentation: String,
}

/// An interaction hit from a multi-drug check, tagged with the display
/// names of both drugs as they were entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundInteraction {
    pub drug_a_display: String,
    pub drug_b_display: String,
    #[serde(flatten)]
    pub interaction: InteractionRecord,
}

impl FoundInteraction {
    pub fn severity(&self) -> Severity {
        self.interaction.severity
    }
}

/// Result of a two-drug check. `interaction == None` is the explicit
/// "no known interaction" state, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairCheck {
    pub drug_a_display: String,
    pub drug_b_display: String,
    pub interaction: Option<InteractionRecord>,
}

impl PairCheck {
    pub fn has_interaction(&self) -> bool {
        self.interaction.is_some()
    }
}

/// Result of a multi-drug check with the summary counters shown to users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimenReport {
    pub total_drugs: usize,
    pub total_interactions: usize,
    pub major_interactions: usize,
    /// Ordered by descending severity.
    pub interactions: Vec<FoundInteraction>,
}

impl RegimenReport {
    pub fn new(total_drugs: usize, interactions: Vec<FoundInteraction>) -> Self {
        let major_interactions = interactions
            .iter()
            .filter(|i| i.severity() == Severity::Major)
            .count();
        Self {
            total_drugs,
            total_interactions: interactions.len(),
            major_interactions,
            interactions,
        }
    }

    /// Number of distinct pairs that were checked.
    pub fn pairs_checked(&self) -> usize {
        self.total_drugs * self.total_drugs.saturating_sub(1) / 2
    }
}
