//! Autocomplete for drug name inputs.
//!
//! Candidate names come from the active source (bundled identifiers or the
//! normalization service). Ranking is pure; the cache keeps remote
//! suggestion lists so repeated keystrokes do not refetch.

pub mod cache;

pub use cache::SuggestionCache;

use std::cmp::Ordering;

use crate::validation::normalize_key;

// ─── Ranking ─────────────────────────────────────────────────────────────────

/// Filter `candidates` to those containing `query` and rank them.
///
/// Matching is case-insensitive. Candidates that start with the query come
/// first, then the rest; each group is alphabetical. Duplicates (ignoring
/// case) keep their first spelling. A blank query yields nothing.
pub fn rank_suggestions<S: AsRef<str>>(candidates: &[S], query: &str, limit: usize) -> Vec<String> {
    let needle = normalize_key(query);
    if needle.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut hits: Vec<(bool, String, &str)> = Vec::new();
    for candidate in candidates {
        let name = candidate.as_ref().trim();
        let lower = name.to_lowercase();
        if !lower.contains(&needle) || hits.iter().any(|(_, seen, _)| *seen == lower) {
            continue;
        }
        hits.push((lower.starts_with(&needle), lower, name));
    }

    hits.sort_by(|a, b| match (a.0, b.0) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.1.cmp(&b.1),
    });

    hits.into_iter()
        .take(limit)
        .map(|(_, _, name)| name.to_string())
        .collect()
}

/// Case-insensitive de-duplication that keeps the first spelling and the
/// original order.
pub fn dedup_names<I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = std::collections::HashSet::new();
    names
        .into_iter()
        .filter(|n| !n.trim().is_empty() && seen.insert(n.trim().to_lowercase()))
        .collect()
}
