use std::sync::Arc;

use axum::{
    body::Body,
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
    Extension, RequestPartsExt,
};
use hyper::StatusCode;

use crate::domain::verify_signature::{self, VerificationInput};

use super::helpers::{body_to_bytes, header_str, to_response_error};
use super::state::AppState;

const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";
const SIGNATURE_HEADER: &str = "x-slack-signature";

struct Guard {
    parts: Parts,
    body: Vec<u8>,
    state: Arc<AppState>,
}

impl Guard {
    async fn new(request: Request<Body>) -> Result<Self, StatusCode> {
        let (mut parts, mut body) = request.into_parts();
        let body = body_to_bytes(&mut body).await?;

        let Extension(state) =
            parts
                .extract::<Extension<Arc<AppState>>>()
                .await
                .map_err(|err| {
                    log::error!("could not find app state on request: {}", err);
                    StatusCode::INTERNAL_SERVER_ERROR
                })?;

        Ok(Self { parts, body, state })
    }

    fn validate_signature(&self) -> Result<(), verify_signature::Error> {
        let timestamp = header_str(&self.parts.headers, TIMESTAMP_HEADER);
        let signature = header_str(&self.parts.headers, SIGNATURE_HEADER);
        log::debug!(
            "verifying signature: x-slack-request-timestamp={:?},x-slack-signature={:?}",
            timestamp,
            signature
        );

        self.state.verifier.verify(&VerificationInput {
            request_timestamp: verify_signature::parse_timestamp(timestamp),
            signature,
            body: &self.body,
            server_time: self.state.clock.now(),
        })
    }

    fn request(self) -> Request<Body> {
        Request::from_parts(self.parts, Body::from(self.body))
    }
}

/// Lets a request through only when it carries a fresh, valid slack signature.
pub async fn validate(request: Request<Body>, next: Next<Body>) -> Result<Response, StatusCode> {
    let guard = Guard::new(request).await?;
    log::trace!("slack guard: validating signature");
    if let Err(err) = guard.validate_signature() {
        log::debug!("slack request rejected: {}", err);
        return Ok(to_response_error(err));
    }
    Ok(next.run(guard.request()).await)
}
