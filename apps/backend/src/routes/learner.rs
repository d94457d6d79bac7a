//! Learner identification middleware

use axum::{
    body::Body,
    extract::Request,
    http::HeaderName,
    middleware::Next,
    response::Response,
};
use bahasa_core::LearnerId;
use uuid::Uuid;

use crate::error::{ApiError, Result};

pub const LEARNER_HEADER: HeaderName = HeaderName::from_static("x-learner-id");

/// Learner resolved from the request, stored in request extensions
#[derive(Clone, Copy, Debug)]
pub struct Learner {
    pub id: LearnerId,
}

/// Learner middleware - extracts the learner id from the X-Learner-Id header
pub async fn learner_middleware(mut request: Request<Body>, next: Next) -> Result<Response> {
    let raw = request
        .headers()
        .get(&LEARNER_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing X-Learner-Id header".to_string()))?;

    let id = Uuid::parse_str(raw.trim())
        .map_err(|_| ApiError::Unauthorized("Invalid X-Learner-Id header".to_string()))?;

    request.extensions_mut().insert(Learner { id });

    Ok(next.run(request).await)
}
