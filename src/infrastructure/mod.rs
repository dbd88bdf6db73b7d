//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces consumed by the application layer,
//! providing concrete implementations for HTTP delivery and the persisted
//! session-expiry record.
//!
//! # Modules
//!
//! - [`http`] - Login POST delivery (reqwest-backed)
//! - [`storage`] - Expiry store (file-backed and in-memory implementations)

pub mod http;
pub mod storage;
