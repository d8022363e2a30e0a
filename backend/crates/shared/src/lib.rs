//! Shared Kernel - Cross-crate error vocabulary
//!
//! Everything the credential service and its binary agree on:
//! - The unified [`error::app_error::AppError`] type and `AppResult` alias
//! - [`error::kind::ErrorKind`] with its HTTP status mapping
//! - Conversion from integer parse errors (and axum responses behind the `axum` feature)

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
