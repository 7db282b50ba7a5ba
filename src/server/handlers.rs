//! HTTP request handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use super::error::{Result, ServerError};
use super::state::AppState;

/// Predict a car's segment from a raw attribute record and recommend up to
/// five catalog cars in that segment
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>> {
    let predictor = state
        .predictor
        .as_ref()
        .ok_or_else(|| ServerError::Unavailable("Prediction service is not available".to_string()))?;
    let catalog = state
        .catalog
        .as_ref()
        .ok_or_else(|| ServerError::Unavailable("Car catalog is not available".to_string()))?;

    let record = body
        .as_object()
        .ok_or_else(|| ServerError::BadRequest("Request body must be a JSON object".to_string()))?;
    if record.is_empty() {
        return Err(ServerError::BadRequest(
            "No data provided in the request".to_string(),
        ));
    }

    let segment = predictor
        .predict_segment(record)
        .map_err(|e| ServerError::Internal(format!("prediction failed: {}", e)))?;

    // A supplied PriceEuro doubles as the buyer's budget cap on
    // recommendations; zero or negative values disable the cap
    let max_price = record.get("PriceEuro").and_then(budget_bound);
    let recommendations = catalog.recommend(&segment, max_price)?;

    info!(
        segment = %segment,
        recommendations = recommendations.len(),
        "prediction served"
    );

    Ok(Json(json!({
        "status": "success",
        "predicted_segment": segment,
        "recommendations": recommendations,
    })))
}

fn budget_bound(value: &Value) -> Option<f64> {
    let bound = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (bound > 0.0).then_some(bound)
}

/// Readiness probe: 200 when all startup artifacts loaded, 503 otherwise
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    if state.is_ready() {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "catalog_rows": state.catalog.as_ref().map(|c| c.len()),
                "started_at": state.started_at.to_rfc3339(),
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unavailable",
                "message": "Startup artifacts failed to load; see server logs",
            })),
        )
    }
}

/// Service banner
pub async fn home() -> &'static str {
    "EV Segment Predictor API is running. Send POST requests to /api/predict."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_bound_parsing() {
        assert_eq!(budget_bound(&json!(45000)), Some(45000.0));
        assert_eq!(budget_bound(&json!("45000")), Some(45000.0));
        assert_eq!(budget_bound(&json!(0)), None);
        assert_eq!(budget_bound(&json!(-5)), None);
        assert_eq!(budget_bound(&json!("n/a")), None);
    }
}
