//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Secure random bytes and fixed-size remember tokens
//! - Keyed hashing (HMAC-SHA512) for lookup-by-digest secrets
//! - Password hashing (Argon2id, salted and non-deterministic)
//! - Remember-cookie construction

pub mod cookie;
pub mod crypto;
pub mod password;
