//! Self-check Use Case
//!
//! Hash the configured secret, then verify it and a known-wrong candidate
//! against the fresh digest. The digest is handed back to the caller and
//! never stored.

use crate::application::config::CredentialConfig;
use crate::application::verifier::CredentialHasher;
use crate::error::{CredentialError, CredentialResult};
use std::sync::Arc;
use std::time::Instant;

/// Output DTO for the self-check
#[derive(Debug, Clone)]
pub struct SelfCheckOutput {
    pub digest: String,
    pub work_factor: u32,
    pub matched: bool,
    pub wrong_rejected: bool,
    pub elapsed_ms: u64,
}

/// Self-check Use Case
pub struct SelfCheckUseCase<H>
where
    H: CredentialHasher,
{
    hasher: Arc<H>,
    config: Arc<CredentialConfig>,
}

impl<H> SelfCheckUseCase<H>
where
    H: CredentialHasher,
{
    pub fn new(hasher: Arc<H>, config: Arc<CredentialConfig>) -> Self {
        Self { hasher, config }
    }

    pub async fn execute(&self) -> CredentialResult<SelfCheckOutput> {
        let started = Instant::now();
        let work_factor = self.config.work_factor;

        let digest = self
            .hasher
            .digest(&self.config.self_check_secret, i64::from(work_factor.get()))
            .await?;

        let matched = self
            .hasher
            .verify(&self.config.self_check_secret, digest.as_str())
            .await?;
        let wrong_accepted = self
            .hasher
            .verify(&self.config.self_check_wrong_secret, digest.as_str())
            .await?;

        if !matched || wrong_accepted {
            return Err(CredentialError::SelfCheckFailed {
                matched,
                wrong_accepted,
            });
        }

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        tracing::info!(
            work_factor = %work_factor,
            elapsed_ms = elapsed_ms,
            digest = %digest.as_str(),
            "Credential self-check passed"
        );

        Ok(SelfCheckOutput {
            digest: digest.into_string(),
            work_factor: work_factor.get(),
            matched,
            wrong_rejected: !wrong_accepted,
            elapsed_ms,
        })
    }
}
