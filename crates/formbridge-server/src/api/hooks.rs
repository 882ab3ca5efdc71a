//! Webhooks the host calls when a submit trigger fires
//!
//! The route is chosen by the handler name the trigger was created with.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};

use formbridge_core::{ProvisionedForm, SubmissionOutcome, SubmitEvent};

use super::errors::ApiError;
use crate::server::FormBridgeServer;

/// Submission of a synthesized table form
///
/// Always answers 200: the outcome is reported in the body and the
/// recipient has already been told by mail.
pub async fn handle_submit(
    State(server): State<Arc<FormBridgeServer>>,
    payload: Result<Json<SubmitEvent>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(event) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let span = info_span!("submit", trigger_id = %event.trigger_uid);
    let outcome = server
        .services()
        .submissions
        .handle(&event)
        .instrument(span)
        .await;

    Ok(Json(outcome_body(&outcome)))
}

/// Submission of the initialization form
pub async fn handle_init_submit(
    State(server): State<Arc<FormBridgeServer>>,
    payload: Result<Json<SubmitEvent>, JsonRejection>,
) -> Result<Json<ProvisionedForm>, ApiError> {
    let Json(event) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let span = info_span!("init_submit", trigger_id = %event.trigger_uid);
    let provisioned = server
        .services()
        .bootstrap
        .handle_init_submit(&event)
        .instrument(span)
        .await
        .map_err(|e| {
            warn!(trigger_id = %event.trigger_uid, error = %e, "Init submission failed");
            e
        })?;

    info!(form_id = %provisioned.form_id, url = %provisioned.url, "Init submission provisioned a form");
    Ok(Json(provisioned))
}

fn outcome_body(outcome: &SubmissionOutcome) -> Value {
    match outcome {
        SubmissionOutcome::Written { row, delivered } => json!({
            "status": "written",
            "row": row,
            "delivered": delivered,
        }),
        SubmissionOutcome::Rejected { row, error, delivered } => json!({
            "status": "rejected",
            "row": row,
            "error": error.to_string(),
            "delivered": delivered,
        }),
        SubmissionOutcome::Dropped { reason } => json!({
            "status": "dropped",
            "reason": reason.to_string(),
        }),
    }
}
