use std::sync::Arc;

use crate::domain::{clock::Clock, verify_signature::SignatureVerifier};

#[derive(Clone)]
pub struct AppState {
    pub verifier: SignatureVerifier,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(verifier: SignatureVerifier, clock: Arc<dyn Clock>) -> Self {
        Self { verifier, clock }
    }
}
