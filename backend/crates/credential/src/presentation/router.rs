//! Credential Router

use crate::application::config::CredentialConfig;
use crate::application::verifier::{BcryptHasher, CredentialHasher};
use crate::presentation::handlers::{self, CredentialAppState};
use axum::{Router, routing::get};
use std::sync::Arc;

/// Create the credential router with the bcrypt hasher
pub fn credential_router(config: CredentialConfig) -> Router {
    credential_router_generic(BcryptHasher, config)
}

/// Create a credential router for any hasher implementation
pub fn credential_router_generic<H>(hasher: H, config: CredentialConfig) -> Router
where
    H: CredentialHasher + Clone + Sync + 'static,
{
    let state = CredentialAppState {
        hasher: Arc::new(hasher),
        config: Arc::new(config),
    };

    Router::new()
        .route("/", get(handlers::self_check::<H>))
        .with_state(state)
}
