use crate::models::FoundInteraction;
use crate::validation::DrugQuery;

use super::matcher::PairLookup;

/// Check every unordered pair of `drugs` and return the hits ordered by
/// descending severity.
///
/// Pairs are visited in index order `(i, j)` with `i < j`, so each pair is
/// looked up exactly once. The sort is stable: hits of equal severity keep
/// their visit order. Callers validate distinctness and the two-drug
/// minimum beforehand.
pub fn find_all_interactions<L>(table: &L, drugs: &[DrugQuery]) -> Vec<FoundInteraction>
where
    L: PairLookup + ?Sized,
{
    let mut found = Vec::new();

    for (i, a) in drugs.iter().enumerate() {
        for b in &drugs[i + 1..] {
            if let Some(record) = table.lookup(a.key(), b.key()) {
                found.push(FoundInteraction {
                    drug_a_display: a.display().to_string(),
                    drug_b_display: b.display().to_string(),
                    interaction: record.clone(),
                });
            }
        }
    }

    found.sort_by(|x, y| y.severity().cmp(&x.severity()));
    found
}
