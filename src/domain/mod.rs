//! Domain layer containing the login page's entities and state machines.
//!
//! This module implements the core domain model following Clean Architecture
//! principles. It defines the form model, wire types and session state,
//! independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Form model, login wire types, session-expiry record
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - External collaborators (HTTP transport, CAPTCHA widget, expiry store,
//!   page handle) sit behind traits implemented by the infrastructure layer
//! - Orchestration is encapsulated in services (see [`crate::application::services`])

pub mod entities;
