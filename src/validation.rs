//! Input normalization and validation for drug queries.
//!
//! Every check runs before any lookup or network call. Rejections carry
//! the user-facing message in their `Display` impl.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::config::MAX_REGIMEN_DRUGS;

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a drug name")]
    EmptyInput,

    #[error("Please enter two different drugs")]
    SameDrug,

    #[error("Duplicate drug: {0}. Please remove duplicate drugs")]
    DuplicateDrug(String),

    #[error("Please enter at least 2 drugs (found {found})")]
    TooFewDrugs { found: usize },

    #[error("Please enter at most {max} drugs (found {found})")]
    TooManyDrugs { max: usize, found: usize },
}

/// Trim, collapse internal whitespace, lowercase.
pub fn normalize_key(raw: &str) -> String {
    RE_WHITESPACE
        .replace_all(raw.trim(), " ")
        .to_lowercase()
}

/// Uppercase the first character, leave the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A normalized drug query: the lookup key plus the name shown to users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrugQuery {
    key: String,
    display: String,
}

impl DrugQuery {
    /// `None` when the input is blank after normalization.
    pub fn parse(raw: &str) -> Option<Self> {
        let key = normalize_key(raw);
        if key.is_empty() {
            return None;
        }
        let display = capitalize(&key);
        Some(Self { key, display })
    }

    /// Build a query from an already-canonical identifier (e.g. an RxCUI)
    /// and the name to display for it.
    pub fn canonical(key: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            display: display.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn display(&self) -> &str {
        &self.display
    }
}

pub fn validate_query(raw: &str) -> Result<DrugQuery, ValidationError> {
    DrugQuery::parse(raw).ok_or(ValidationError::EmptyInput)
}

/// Both inputs must be non-blank and distinct after normalization.
pub fn validate_pair(raw_a: &str, raw_b: &str) -> Result<(DrugQuery, DrugQuery), ValidationError> {
    let a = validate_query(raw_a)?;
    let b = validate_query(raw_b)?;
    if a.key == b.key {
        return Err(ValidationError::SameDrug);
    }
    Ok((a, b))
}

/// Blank entries are dropped. Between two and `MAX_REGIMEN_DRUGS` must
/// remain and none may repeat.
pub fn validate_regimen<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<DrugQuery>, ValidationError> {
    let queries: Vec<DrugQuery> = inputs
        .iter()
        .filter_map(|raw| DrugQuery::parse(raw.as_ref()))
        .collect();

    if queries.len() < 2 {
        return Err(ValidationError::TooFewDrugs {
            found: queries.len(),
        });
    }
    if queries.len() > MAX_REGIMEN_DRUGS {
        return Err(ValidationError::TooManyDrugs {
            max: MAX_REGIMEN_DRUGS,
            found: queries.len(),
        });
    }
    ensure_distinct(&queries)?;
    Ok(queries)
}

/// Reject the first query whose key was already seen.
pub fn ensure_distinct(queries: &[DrugQuery]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(queries.len());
    for q in queries {
        if !seen.insert(q.key.as_str()) {
            return Err(ValidationError::DuplicateDrug(q.display.clone()));
        }
    }
    Ok(())
}
