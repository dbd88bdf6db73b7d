//! Core domain entities representing the login page state.
//!
//! This module contains the data structures the controller operates on.
//! Entities hold state and the small transitions that belong to it; the
//! orchestration lives in [`crate::application::services`].
//!
//! # Entity Types
//!
//! - [`LoginForm`] - In-memory model of the bound form and its fields
//! - [`LoginRequest`] / [`LoginResponse`] - Wire types for the login POST
//! - [`NoticeBanner`] - The session-expired banner

pub mod form;
pub mod login;
pub mod session;

pub use form::{
    Field, FieldId, FormElements, FormError, FormSnapshot, LoginForm, SubmitButton,
    SubmitButtonState, Validity,
};
pub use login::{LoginFailure, LoginRequest, LoginResponse};
pub use session::{NoticeBanner, TOKEN_EXPIRATION_KEY};
