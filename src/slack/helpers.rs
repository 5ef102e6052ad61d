use axum::{
    body::Body,
    response::{IntoResponse, Response},
    Json,
};
use futures::TryStreamExt;
use hyper::{HeaderMap, StatusCode};
use serde::Serialize;

use crate::domain::verify_signature;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Returns the header as text, or an empty string when it is absent or not visible ASCII.
pub fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

pub fn to_response_error(err: verify_signature::Error) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// Largest request body the guard will buffer before the signature is checked.
pub const MAX_BODY_SIZE: usize = 1024 * 1024;

pub async fn body_to_bytes(stream: &mut Body) -> Result<Vec<u8>, StatusCode> {
    let mut data = Vec::new();
    while let Some(chunk) = stream.try_next().await.map_err(|err| {
        log::error!("could not read from body stream: {}", err);
        StatusCode::BAD_REQUEST
    })? {
        if data.len() + chunk.len() > MAX_BODY_SIZE {
            log::debug!("request body exceeds {} bytes", MAX_BODY_SIZE);
            return Err(StatusCode::PAYLOAD_TOO_LARGE);
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_should_read_a_present_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-slack-signature", "v0=abc".parse().unwrap());

        assert_eq!(header_str(&headers, "x-slack-signature"), "v0=abc");
    }

    #[test]
    fn it_should_default_missing_headers_to_empty() {
        assert_eq!(header_str(&HeaderMap::new(), "x-slack-signature"), "");
    }

    #[tokio::test]
    async fn it_should_render_the_rejection_reason() {
        let response = to_response_error(verify_signature::Error::SignatureInvalid);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "Signature is invalid.");
    }

    #[tokio::test]
    async fn it_should_collect_every_chunk_of_the_body() {
        let chunks: Vec<Result<&'static str, std::io::Error>> = vec![Ok("text=a"), Ok("&user=b")];
        let mut body = Body::wrap_stream(futures::stream::iter(chunks));

        assert_eq!(body_to_bytes(&mut body).await.unwrap(), b"text=a&user=b");
    }

    #[tokio::test]
    async fn it_should_fail_when_the_body_stream_breaks() {
        let chunks: Vec<Result<&'static str, std::io::Error>> = vec![
            Ok("text="),
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset")),
        ];
        let mut body = Body::wrap_stream(futures::stream::iter(chunks));

        assert_eq!(body_to_bytes(&mut body).await, Err(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn it_should_accept_a_body_of_exactly_the_maximum_size() {
        let mut body = Body::from(vec![b'a'; MAX_BODY_SIZE]);

        assert_eq!(body_to_bytes(&mut body).await.unwrap().len(), MAX_BODY_SIZE);
    }

    #[tokio::test]
    async fn it_should_refuse_a_body_over_the_maximum_size() {
        let chunks: Vec<Result<Vec<u8>, std::io::Error>> =
            vec![Ok(vec![b'a'; MAX_BODY_SIZE]), Ok(vec![b'a'])];
        let mut body = Body::wrap_stream(futures::stream::iter(chunks));

        assert_eq!(
            body_to_bytes(&mut body).await,
            Err(StatusCode::PAYLOAD_TOO_LARGE)
        );
    }
}
