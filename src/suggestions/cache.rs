use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::config::SUGGESTION_CACHE_CAPACITY;
use crate::validation::normalize_key;

/// Per-query suggestion lists from the remote source.
///
/// Write-once: the first list stored for a normalized query is kept for
/// the lifetime of the cache. Empty lists are never stored, and once
/// `capacity` queries are held new queries pass through uncached.
/// Only successful lookups should be stored.
#[derive(Debug)]
pub struct SuggestionCache {
    entries: RwLock<HashMap<String, Vec<String>>>,
    capacity: usize,
}

impl Default for SuggestionCache {
    fn default() -> Self {
        Self::with_capacity(SUGGESTION_CACHE_CAPACITY)
    }
}

impl SuggestionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    pub fn get(&self, query: &str) -> Option<Vec<String>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(&normalize_key(query)).cloned()
    }

    /// Store `suggestions` unless the query already has an entry, the list
    /// is empty, or the cache is full. Returns the list to hand back for
    /// the query.
    pub fn insert(&self, query: &str, suggestions: Vec<String>) -> Vec<String> {
        let key = normalize_key(query);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(kept) = entries.get(&key) {
            return kept.clone();
        }
        if suggestions.is_empty() || entries.len() >= self.capacity {
            return suggestions;
        }
        entries.insert(key, suggestions.clone());
        suggestions
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn miss_then_hit() {
        let cache = SuggestionCache::new();
        assert!(cache.get("war").is_none());
        cache.insert("war", vec!["warfarin".into()]);
        assert_eq!(cache.get("war"), Some(vec!["warfarin".to_string()]));
    }

    #[test]
    fn first_insert_wins() {
        let cache = SuggestionCache::new();
        cache.insert("met", vec!["metformin".into()]);
        let kept = cache.insert("met", vec!["metoprolol".into()]);
        assert_eq!(kept, vec!["metformin"]);
        assert_eq!(cache.get("met"), Some(vec!["metformin".to_string()]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn keys_are_normalized() {
        let cache = SuggestionCache::new();
        cache.insert("  Met ", vec!["metformin".into()]);
        assert!(cache.get("met").is_some());
        assert!(cache.get("MET").is_some());
    }

    #[test]
    fn empty_lists_are_not_stored() {
        let cache = SuggestionCache::new();
        assert!(cache.insert("zzz", Vec::new()).is_empty());
        assert!(cache.get("zzz").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn full_cache_stops_growing() {
        let cache = SuggestionCache::with_capacity(3);
        for i in 0..50 {
            let returned = cache.insert(&format!("q{i}"), vec![format!("drug{i}")]);
            assert_eq!(returned, vec![format!("drug{i}")]);
        }
        assert_eq!(cache.len(), 3);
        assert!(cache.get("q0").is_some());
        assert!(cache.get("q3").is_none());

        let kept = cache.insert("q1", vec!["other".into()]);
        assert_eq!(kept, vec!["drug1"]);
    }

    #[test]
    fn concurrent_inserts_keep_one_value() {
        let cache = Arc::new(SuggestionCache::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.insert("asp", vec![format!("candidate{i}")]))
            })
            .collect();
        let results: Vec<Vec<String>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let stored = cache.get("asp").unwrap();
        assert!(results.iter().all(|r| *r == stored));
        assert_eq!(cache.len(), 1);
    }
}
