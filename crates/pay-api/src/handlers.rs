//! # Request Handlers
//!
//! Axum request handlers for the payment API.
//!
//! Checkout errors are reported to the storefront as JSON. Callback errors are
//! reported to the gateway only as the plain-text `ERROR` token: the gateway
//! is never told why verification failed.

use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use pay_core::{CallbackRequest, CheckoutRequest, PaymentError};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create checkout response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    /// Gateway redirect URL
    pub pay_url: String,
    pub order_id: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

/// Query parameters of the gateway callback.
///
/// The signature arrives as either `sign` or `ss1`.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub sign: Option<String>,
    #[serde(default)]
    pub ss1: Option<String>,
}

impl From<CallbackQuery> for CallbackRequest {
    fn from(query: CallbackQuery) -> Self {
        CallbackRequest::from_query(query.data, query.sign, query.ss1)
    }
}

fn payment_error_to_response(err: PaymentError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

const CALLBACK_OK: &str = "OK";
const CALLBACK_ERROR: &str = "ERROR";

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "cube-checkout",
        "provider": state.gateway.provider_name(),
        "configured": state.gateway.ensure_configured().is_ok(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Start a checkout: sign the order and return the gateway redirect URL
#[instrument(skip(state, payload))]
pub async fn create_checkout(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<CheckoutResponse>, (StatusCode, Json<ErrorResponse>)> {
    // Missing credentials outrank a bad body
    state.gateway.ensure_configured().map_err(|e| {
        error!("Checkout unavailable: {}", e);
        payment_error_to_response(e)
    })?;

    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected checkout body: {}", rejection.body_text());
        payment_error_to_response(PaymentError::Validation(format!(
            "Invalid checkout request: {}",
            rejection.body_text()
        )))
    })?;

    let session = state.gateway.initiate(&request).map_err(|e| {
        match &e {
            PaymentError::Validation(_) => warn!("Checkout validation failed: {}", e),
            _ => error!("Failed to create checkout: {}", e),
        }
        payment_error_to_response(e)
    })?;

    Ok(Json(CheckoutResponse {
        pay_url: session.pay_url,
        order_id: session.order_id.into_string(),
    }))
}

/// Customer returned from the gateway after paying.
///
/// UX redirect only, not proof of payment.
pub async fn payment_accept() -> Redirect {
    Redirect::to("/?paid=1")
}

/// Customer cancelled on the gateway page
pub async fn payment_cancel() -> Redirect {
    Redirect::to("/?canceled=1")
}

/// Gateway payment-confirmation callback (authoritative)
#[instrument(skip(state, query))]
pub async fn payment_callback(
    State(state): State<AppState>,
    query: Result<Query<CallbackQuery>, QueryRejection>,
) -> Response {
    let request: CallbackRequest = match query {
        Ok(Query(query)) => query.into(),
        Err(rejection) => {
            warn!("Unparseable callback query: {}", rejection.body_text());
            return (StatusCode::BAD_REQUEST, CALLBACK_ERROR).into_response();
        }
    };

    // Absent fields fall through to verification, which rejects them
    let verdict = state.gateway.verify_callback(
        request.data.as_deref().unwrap_or_default(),
        request.signature.as_deref().unwrap_or_default(),
    );

    let callback = match verdict.into_result() {
        Ok(callback) => callback,
        Err(e) if e.is_callback_rejection() => {
            warn!("Callback rejected: {}", e);
            return (StatusCode::BAD_REQUEST, CALLBACK_ERROR).into_response();
        }
        Err(e) => {
            error!("Callback could not be verified: {}", e);
            return (StatusCode::BAD_REQUEST, CALLBACK_ERROR).into_response();
        }
    };

    info!("Verified callback for order {:?}", callback.order_id());

    // Order store failure: answer ERROR so the gateway redelivers
    if let Err(e) = state.fulfillment.on_payment_confirmed(&callback).await {
        error!("Fulfillment failed for order {:?}: {}", callback.order_id(), e);
        return (StatusCode::INTERNAL_SERVER_ERROR, CALLBACK_ERROR).into_response();
    }

    (StatusCode::OK, CALLBACK_OK).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new("Test error", 400);
        assert_eq!(err.error, "Test error");
        assert_eq!(err.code, 400);
    }

    #[test]
    fn test_payment_error_conversion() {
        let (status, _json) =
            payment_error_to_response(PaymentError::Validation("Bad data".to_string()));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _json) =
            payment_error_to_response(PaymentError::Configuration("missing".to_string()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_callback_query_normalizes_signature() {
        let query = CallbackQuery {
            data: Some("abc".into()),
            sign: None,
            ss1: Some("deadbeef".into()),
        };
        let request: CallbackRequest = query.into();

        assert_eq!(request.signature.as_deref(), Some("deadbeef"));
    }
}
