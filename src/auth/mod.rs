//! Caller identity boundary.
//!
//! Authentication itself happens upstream (session gateway); requests reach
//! this service with the already-verified owner id in the `X-User-Id` header.

use std::future::{ready, Ready};

use actix_web::{FromRequest, HttpRequest};

use crate::errors::AppError;

pub const USER_ID_HEADER: &str = "X-User-Id";

/// Extractor for the authenticated owner id in handlers.
pub struct AuthenticatedUser(pub String);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user_id = req
            .headers()
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .ok_or_else(|| AppError::Unauthorized("Missing caller identity".to_string()));

        ready(user_id.map(AuthenticatedUser))
    }
}
