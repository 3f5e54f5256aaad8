//! Handler error type mapping to HTTP responses.
//!
//! Nothing in normal operation is fatal: an unauthenticated action lands
//! back on the login page, and everything else degrades to a visible
//! status code instead of a panic.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};

#[derive(Debug)]
pub enum AppError {
    /// The action requires a logged-in session.
    Unauthorized,
    /// The request was malformed (missing form field, no model selected).
    Validation(String),
    /// Page rendering or other internal failure.
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // An unauthenticated action just lands back on the login page.
            AppError::Unauthorized => Redirect::to("/").into_response(),
            AppError::Validation(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            AppError::Internal(message) => {
                tracing::error!(%message, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
            }
        }
    }
}
