use axum::{body::Bytes, extract::State, http::Method, Json};

use crate::error::RequestError;
use crate::models::{NormalizedAmount, NotifyRequest};
use crate::services::dispatch;
use crate::startup::AppState;

/// The relay endpoint. Validation short-circuits in contract order (method,
/// body presence, body shape, amount) with no provider calls; a valid
/// request dispatches per channel and answers 200 with the provider request
/// ids actually obtained.
#[tracing::instrument(skip(state, body))]
pub async fn relay(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Result<Json<Vec<String>>, RequestError> {
    if method != Method::POST {
        tracing::warn!(method = %method, "Rejected request: method not allowed");
        return Err(RequestError::MethodNotAllowed);
    }

    if body.is_empty() {
        tracing::warn!("Rejected request: missing body");
        return Err(RequestError::MissingBody);
    }

    let request: NotifyRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Rejected request: unparseable body");
        RequestError::InvalidBody
    })?;

    let amount = NormalizedAmount::parse(&request.amount).map_err(|e| {
        tracing::warn!(amount = %request.amount, error = %e, "Rejected request: invalid amount");
        RequestError::InvalidAmount
    })?;

    tracing::debug!(raw = %request.amount, normalized = %amount, "Amount normalized");

    let report = dispatch(
        state.provider.as_ref(),
        &request,
        &amount,
        &state.config.templates,
    )
    .await;

    let request_ids = report.request_ids();
    tracing::info!(
        attempted = report.outcomes().len(),
        accepted = request_ids.len(),
        "Dispatch complete"
    );

    Ok(Json(request_ids))
}
