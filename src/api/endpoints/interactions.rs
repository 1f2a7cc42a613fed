//! Interaction check endpoints.
//!
//! - `POST /api/interactions/check` — two drugs
//! - `POST /api/interactions/regimen` — two or more drugs

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{PairCheck, RegimenReport};

#[derive(Deserialize)]
pub struct PairRequest {
    #[serde(default)]
    pub drug_a: String,
    #[serde(default)]
    pub drug_b: String,
}

#[derive(Serialize)]
pub struct PairResponse {
    #[serde(flatten)]
    pub check: PairCheck,
    pub checked_at: String,
}

/// `POST /api/interactions/check`
pub async fn check_pair(
    State(ctx): State<ApiContext>,
    body: Result<Json<PairRequest>, JsonRejection>,
) -> Result<Json<PairResponse>, ApiError> {
    let Json(req) = body?;
    let check = ctx.source.check_pair(&req.drug_a, &req.drug_b).await?;
    Ok(Json(PairResponse {
        check,
        checked_at: chrono::Utc::now().to_rfc3339(),
    }))
}

#[derive(Deserialize)]
pub struct RegimenRequest {
    #[serde(default)]
    pub drugs: Vec<String>,
}

#[derive(Serialize)]
pub struct RegimenResponse {
    #[serde(flatten)]
    pub report: RegimenReport,
    pub pairs_checked: usize,
    pub checked_at: String,
}

/// `POST /api/interactions/regimen`
pub async fn check_regimen(
    State(ctx): State<ApiContext>,
    body: Result<Json<RegimenRequest>, JsonRejection>,
) -> Result<Json<RegimenResponse>, ApiError> {
    let Json(req) = body?;
    let report = ctx.source.check_regimen(&req.drugs).await?;
    Ok(Json(RegimenResponse {
        pairs_checked: report.pairs_checked(),
        report,
        checked_at: chrono::Utc::now().to_rfc3339(),
    }))
}
