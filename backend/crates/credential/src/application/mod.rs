//! Application Layer - Use Cases
//!
//! Orchestrates the password primitives from `platform` on the async runtime.

pub mod config;
pub mod self_check;
pub mod verifier;
