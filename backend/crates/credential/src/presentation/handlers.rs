//! HTTP Handlers

use crate::application::config::CredentialConfig;
use crate::application::self_check::SelfCheckUseCase;
use crate::application::verifier::CredentialHasher;
use crate::error::CredentialResult;
use crate::presentation::dto::SelfCheckResponse;
use axum::Json;
use axum::extract::State;
use std::sync::Arc;

/// Shared state for credential handlers
#[derive(Clone)]
pub struct CredentialAppState<H>
where
    H: CredentialHasher + Clone + Sync + 'static,
{
    pub hasher: Arc<H>,
    pub config: Arc<CredentialConfig>,
}

/// GET /
pub async fn self_check<H>(
    State(state): State<CredentialAppState<H>>,
) -> CredentialResult<Json<SelfCheckResponse>>
where
    H: CredentialHasher + Clone + Sync + 'static,
{
    let use_case = SelfCheckUseCase::new(state.hasher.clone(), state.config.clone());

    let output = use_case.execute().await?;

    Ok(Json(SelfCheckResponse {
        message: state.config.greeting.clone(),
        digest: output.digest,
        work_factor: output.work_factor,
        matched: output.matched,
        wrong_rejected: output.wrong_rejected,
        elapsed_ms: output.elapsed_ms,
    }))
}
