use std::{net::SocketAddr, sync::Arc};

use axum::{middleware, routing, Extension, Router, Server};
use hyper::{Result, StatusCode};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    config::Config,
    domain::{clock::SystemClock, verify_signature::SignatureVerifier},
};

use super::state::AppState;

pub async fn serve(config: Config) -> Result<()> {
    let state = AppState::new(
        SignatureVerifier::new(&config.signing_secret),
        Arc::new(SystemClock),
    );
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    log::info!("Listening on port {}", config.port);

    Server::bind(&addr)
        .serve(router(state).into_make_service())
        .await
}

/// Builds the application routes, with every slack endpoint behind the signature guard.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/slack/events", routing::post(acknowledge))
        .route("/slack/commands", routing::post(acknowledge))
        .route("/slack/actions", routing::post(acknowledge))
        .route_layer(middleware::from_fn(super::guard::validate))
        .route("/health", routing::get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(Extension(Arc::new(state))),
        )
}

async fn acknowledge() -> StatusCode {
    StatusCode::OK
}

async fn health() -> &'static str {
    "ok"
}
