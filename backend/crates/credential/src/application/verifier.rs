//! Credential Verifier
//!
//! Async `digest` / `verify` contract over the bcrypt primitives in
//! `platform::password`. Hashing is CPU-bound, so it is moved onto tokio's
//! blocking pool; input validation happens on the calling task first.

use crate::error::CredentialResult;
use platform::password::{PasswordDigest, Secret, WorkFactor};

/// Trait for credential hashing backends
#[trait_variant::make(CredentialHasher: Send)]
pub trait LocalCredentialHasher {
    /// Produce a salted digest of `secret`
    ///
    /// Fails with `InvalidWorkFactor` before any hashing when `work_factor`
    /// is outside the supported range.
    async fn digest(&self, secret: &str, work_factor: i64) -> CredentialResult<PasswordDigest>;

    /// Check `candidate` against a previously produced digest
    ///
    /// A mismatch is `Ok(false)`; a structurally invalid digest is
    /// `Err(MalformedDigest)`.
    async fn verify(&self, candidate: &str, digest: &str) -> CredentialResult<bool>;
}

/// bcrypt-backed hasher running on the blocking pool
#[derive(Debug, Clone, Copy, Default)]
pub struct BcryptHasher;

impl CredentialHasher for BcryptHasher {
    async fn digest(&self, secret: &str, work_factor: i64) -> CredentialResult<PasswordDigest> {
        let work_factor = WorkFactor::new(work_factor)?;
        let secret = Secret::new(secret);

        let digest = tokio::task::spawn_blocking(move || secret.hash(work_factor)).await??;

        tracing::debug!(work_factor = %work_factor, "Digest produced");

        Ok(digest)
    }

    async fn verify(&self, candidate: &str, digest: &str) -> CredentialResult<bool> {
        let digest = PasswordDigest::parse(digest)?;
        let candidate = Secret::new(candidate);

        let matched = tokio::task::spawn_blocking(move || digest.verify(&candidate)).await??;

        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::{BcryptHasher, CredentialHasher};
    use crate::error::CredentialError;

    const FAST: i64 = 4;

    #[tokio::test]
    async fn test_digests_differ_per_call() {
        let hasher = BcryptHasher;
        let first = hasher.digest("same secret", FAST).await.unwrap();
        let second = hasher.digest("same secret", FAST).await.unwrap();
        assert_ne!(first.as_str(), second.as_str());
    }

    #[tokio::test]
    async fn test_round_trip() {
        let hasher = BcryptHasher;
        let long = "x".repeat(100);
        for secret in ["", "a", "pässwörd 🔑", "tab\tand\nnewline", long.as_str()] {
            let digest = hasher.digest(secret, FAST).await.unwrap();
            assert!(
                hasher.verify(secret, digest.as_str()).await.unwrap(),
                "{secret:?} should verify"
            );
        }
    }

    #[tokio::test]
    async fn test_wrong_candidate_is_false_not_error() {
        let hasher = BcryptHasher;
        let digest = hasher.digest("first", FAST).await.unwrap();
        assert!(!hasher.verify("second", digest.as_str()).await.unwrap());
        assert!(!hasher.verify("First", digest.as_str()).await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_digest() {
        let hasher = BcryptHasher;
        for bad in ["", "not-a-digest"] {
            let result = hasher.verify("anything", bad).await;
            assert!(
                matches!(result, Err(CredentialError::MalformedDigest(_))),
                "{bad:?} should be malformed"
            );
        }
    }

    #[tokio::test]
    async fn test_invalid_work_factor() {
        let hasher = BcryptHasher;
        for work_factor in [0, -1, 32] {
            let result = hasher.digest("x", work_factor).await;
            assert!(
                matches!(result, Err(CredentialError::InvalidWorkFactor(_))),
                "{work_factor} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_low_work_factor_is_raised() {
        let hasher = BcryptHasher;
        let digest = hasher.digest("x", 1).await.unwrap();

        assert!(digest.as_str().starts_with("$2b$04$"));
        assert_eq!(digest.work_factor().get(), 4);
        assert!(hasher.verify("x", digest.as_str()).await.unwrap());
    }

    #[tokio::test]
    async fn test_demo_scenario() {
        let hasher = BcryptHasher;
        let digest = hasher.digest("mySuperSecretPassword123", 6).await.unwrap();

        assert!(!digest.as_str().is_empty());
        assert_ne!(digest.as_str(), "mySuperSecretPassword123");
        assert!(
            hasher
                .verify("mySuperSecretPassword123", digest.as_str())
                .await
                .unwrap()
        );
        assert!(!hasher.verify("wrongPassword", digest.as_str()).await.unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_calls_are_independent() {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                tokio::spawn(async move {
                    let secret = format!("secret-{i}");
                    let digest = BcryptHasher.digest(&secret, FAST).await.unwrap();
                    BcryptHasher.verify(&secret, digest.as_str()).await.unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap());
        }
    }
}
