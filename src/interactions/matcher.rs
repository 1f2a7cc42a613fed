use std::collections::HashMap;

use crate::models::InteractionRecord;

/// Unordered, case-folded pair of identifiers. `(a, b)` and `(b, a)`
/// produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairKey(String, String);

impl PairKey {
    pub fn new(a: &str, b: &str) -> Self {
        let a = a.trim().to_lowercase();
        let b = b.trim().to_lowercase();
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }
}

/// Anything that can resolve an unordered identifier pair to a record.
pub trait PairLookup {
    fn lookup(&self, a: &str, b: &str) -> Option<&InteractionRecord>;
}

/// Interaction records indexed by `PairKey`.
///
/// At most one record is kept per unordered pair. When the source list
/// repeats a pair, the first occurrence wins and the rest are counted in
/// `shadowed()`.
#[derive(Debug, Clone, Default)]
pub struct InteractionTable {
    records: Vec<InteractionRecord>,
    index: HashMap<PairKey, usize>,
    shadowed: usize,
}

impl InteractionTable {
    pub fn new(records: Vec<InteractionRecord>) -> Self {
        let mut index = HashMap::with_capacity(records.len());
        let mut shadowed = 0;

        for (pos, record) in records.iter().enumerate() {
            let key = PairKey::new(&record.drug_a, &record.drug_b);
            if let Some(&first) = index.get(&key) {
                shadowed += 1;
                tracing::warn!(
                    drug_a = %record.drug_a,
                    drug_b = %record.drug_b,
                    kept = first,
                    ignored = pos,
                    "Duplicate interaction pair in table, keeping first record"
                );
                continue;
            }
            index.insert(key, pos);
        }

        Self {
            records,
            index,
            shadowed,
        }
    }

    /// Resolve an unordered pair to its interaction record.
    ///
    /// `None` means "no known interaction", which is a normal outcome.
    /// Callers must reject `a == b` before calling.
    pub fn find_interaction(&self, a: &str, b: &str) -> Option<&InteractionRecord> {
        self.index
            .get(&PairKey::new(a, b))
            .and_then(|&pos| self.records.get(pos))
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Records dropped because their pair was already present.
    pub fn shadowed(&self) -> usize {
        self.shadowed
    }
}

impl PairLookup for InteractionTable {
    fn lookup(&self, a: &str, b: &str) -> Option<&InteractionRecord> {
        self.find_interaction(a, b)
    }
}
