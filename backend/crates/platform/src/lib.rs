//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations for the credential service:
//! - Password hashing (bcrypt, salted, self-describing digests)
//! - Work factor validation and digest parsing

pub mod password;
