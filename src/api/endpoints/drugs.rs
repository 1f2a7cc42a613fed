//! Drug search endpoints.
//!
//! - `GET /api/drugs/suggest?q=` — autocomplete
//! - `GET /api/drugs/:name` — drug information

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::config::AVAILABLE_DRUGS_HINT;
use crate::models::DrugInfo;

#[derive(Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct SuggestResponse {
    pub query: String,
    pub suggestions: Vec<String>,
}

/// `GET /api/drugs/suggest?q=`
pub async fn suggest(
    State(ctx): State<ApiContext>,
    Query(query): Query<SuggestQuery>,
) -> Result<Json<SuggestResponse>, ApiError> {
    let suggestions = ctx.source.suggest(&query.q).await?;
    Ok(Json(SuggestResponse {
        query: query.q,
        suggestions,
    }))
}

#[derive(Serialize)]
pub struct DrugInfoResponse {
    pub query: String,
    /// `null` when the drug is not known to the active source.
    pub info: Option<DrugInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub available_drugs: Vec<String>,
    pub last_updated: String,
}

/// `GET /api/drugs/:name` — a miss is a 200 with `info: null`.
pub async fn info(
    State(ctx): State<ApiContext>,
    Path(name): Path<String>,
) -> Result<Json<DrugInfoResponse>, ApiError> {
    let info = ctx.source.drug_info(&name).await?;
    let available_drugs = if info.is_none() {
        ctx.source.available_drugs(AVAILABLE_DRUGS_HINT)
    } else {
        Vec::new()
    };

    Ok(Json(DrugInfoResponse {
        query: name,
        info,
        available_drugs,
        last_updated: chrono::Utc::now().to_rfc3339(),
    }))
}
