//! Axum route handler for career-domain prediction.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub skills: String,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub predicted_domain: String,
}

/// POST /predict
pub async fn handle_predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, AppError> {
    let predicted_domain = state.classifier.classify(&req.skills)?;
    info!(domain = %predicted_domain, "Predicted career domain");
    Ok(Json(PredictResponse { predicted_domain }))
}
