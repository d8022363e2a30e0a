//! Application Configuration
//!
//! Configuration for the credential application layer.

use platform::password::WorkFactor;

/// Demo secret hashed by the self-check
pub const SELF_CHECK_SECRET: &str = "mySuperSecretPassword123";

/// Candidate that must never verify against the self-check digest
pub const SELF_CHECK_WRONG_SECRET: &str = "wrongPassword";

/// Work factor used by the self-check in development (fast, not production-grade)
pub const DEVELOPMENT_WORK_FACTOR: u32 = 6;

/// Credential application configuration
#[derive(Debug, Clone)]
pub struct CredentialConfig {
    /// bcrypt cost for new digests
    pub work_factor: WorkFactor,
    /// Secret hashed and expected to verify
    pub self_check_secret: String,
    /// Secret expected to be rejected
    pub self_check_wrong_secret: String,
    /// `message` field of the self-check response
    pub greeting: String,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            work_factor: WorkFactor::default(),
            self_check_secret: SELF_CHECK_SECRET.to_string(),
            self_check_wrong_secret: SELF_CHECK_WRONG_SECRET.to_string(),
            greeting: "Hello from API".to_string(),
        }
    }
}

impl CredentialConfig {
    /// Create config for development (low work factor)
    pub fn development() -> Self {
        Self {
            work_factor: WorkFactor::new(i64::from(DEVELOPMENT_WORK_FACTOR))
                .unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn with_work_factor(self, work_factor: WorkFactor) -> Self {
        Self {
            work_factor,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_production_cost() {
        let config = CredentialConfig::default();
        assert_eq!(config.work_factor.get(), 12);
        assert_eq!(config.self_check_secret, SELF_CHECK_SECRET);
        assert_ne!(config.self_check_secret, config.self_check_wrong_secret);
    }

    #[test]
    fn test_development_and_override() {
        let config = CredentialConfig::development();
        assert_eq!(config.work_factor.get(), DEVELOPMENT_WORK_FACTOR);

        let config = config.with_work_factor(WorkFactor::new(4).unwrap());
        assert_eq!(config.work_factor.get(), 4);
        assert_eq!(config.greeting, "Hello from API");
    }
}
