//! Quick-reference resources from the bundled dataset.
//!
//! These are served from bundled data whichever source is active.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;
use crate::models::{BlackBoxWarning, ControlledSchedule, EmergencyDrug};

#[derive(Serialize)]
pub struct ResourceList<T> {
    pub total: usize,
    pub items: Vec<T>,
}

impl<T: Clone> ResourceList<T> {
    fn of(items: &[T]) -> Json<Self> {
        Json(Self {
            total: items.len(),
            items: items.to_vec(),
        })
    }
}

/// `GET /api/resources/emergency-drugs`
pub async fn emergency_drugs(State(ctx): State<ApiContext>) -> Json<ResourceList<EmergencyDrug>> {
    ResourceList::of(&ctx.reference.emergency_drugs)
}

/// `GET /api/resources/controlled-substances`
pub async fn controlled_substances(
    State(ctx): State<ApiContext>,
) -> Json<ResourceList<ControlledSchedule>> {
    ResourceList::of(&ctx.reference.controlled_substances)
}

/// `GET /api/resources/black-box-warnings`
pub async fn black_box_warnings(
    State(ctx): State<ApiContext>,
) -> Json<ResourceList<BlackBoxWarning>> {
    ResourceList::of(&ctx.reference.black_box_warnings)
}
