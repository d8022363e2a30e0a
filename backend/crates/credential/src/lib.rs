//! Credential Verifier Backend Module
//!
//! Layered the same way as the other backend crates:
//! - `application/` - Verifier seam, self-check use case, configuration
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Security Model
//! - Salts are generated inside the bcrypt primitive, never supplied by callers
//! - Hashing runs on the blocking pool so request handling is never starved
//! - A malformed digest is an error, never a silent mismatch
//! - A failed self-check is a 500, never reported as success

pub mod application;
pub mod error;
pub mod presentation;

// Re-exports for convenience
pub use application::config::CredentialConfig;
pub use application::verifier::{BcryptHasher, CredentialHasher};
pub use error::{CredentialError, CredentialResult};
pub use presentation::router::{credential_router, credential_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
