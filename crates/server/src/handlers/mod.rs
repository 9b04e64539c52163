//! # API Route Handlers
//!
//! This module organizes all the Axum route handlers for the `legalsum-server`.

pub mod export;
pub mod general;
pub mod summarize;

// Re-export all handlers so the router can reach them under `handlers::`.
pub use export::*;
pub use general::*;
pub use summarize::*;

// Shared items used by multiple handler modules.
use super::{
    auth::AccessGranted,
    errors::AppError,
    state::AppState,
    types::{ApiResponse, DebugParams},
};
use axum::{extract::Query, Json};
use serde_json::Value;

/// Wraps a successful result in the standard `ApiResponse` format, including
/// debug information only when the caller asked for it.
pub(crate) fn wrap_response<T>(
    result: T,
    debug_params: Query<DebugParams>,
    debug_info: Option<Value>,
) -> Json<ApiResponse<T>> {
    let debug = if debug_params.debug.unwrap_or(false) {
        debug_info
    } else {
        None
    };
    Json(ApiResponse { debug, result })
}
