//! # Access Password Gate
//!
//! Every route that touches a document requires the `AccessGranted` extractor.
//! It only reads request headers, so axum runs it before the body is consumed
//! and a rejected request never reaches extraction or the model.

use crate::{errors::AppError, state::AppState};
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderValue},
};
use percent_encoding::percent_decode;
use tracing::warn;

/// The header carrying the password entered by the user, percent-encoded as
/// UTF-8 so any character survives the trip through HTTP headers.
pub const ACCESS_PASSWORD_HEADER: &str = "x-access-password";

/// Decodes the header back to the string the user typed.
///
/// Raw UTF-8 header bytes are accepted as well, since percent-decoding leaves
/// them untouched.
pub fn decode_access_password(value: &HeaderValue) -> Option<String> {
    percent_decode(value.as_bytes())
        .decode_utf8()
        .ok()
        .map(|password| password.into_owned())
}

/// Proof that the request presented the configured access password.
#[derive(Debug, Clone, Copy)]
pub struct AccessGranted;

impl FromRequestParts<AppState> for AccessGranted {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // An unset password admits nobody.
        let Some(expected) = state.config.access_password() else {
            warn!("Rejected request: no access password is configured.");
            return Err(AppError::AccessDenied);
        };

        let provided = parts
            .headers
            .get(ACCESS_PASSWORD_HEADER)
            .and_then(decode_access_password);

        if provided.as_deref() == Some(expected) {
            Ok(AccessGranted)
        } else {
            warn!("Rejected request with a missing or incorrect access password.");
            Err(AppError::AccessDenied)
        }
    }
}
