//! Application layer services implementing the login page's control flow.
//!
//! This layer orchestrates domain operations: it drives the form model
//! through a submit cycle, brokers CAPTCHA tokens, and runs the one-shot
//! session-expiry check. Services consume the infrastructure traits and
//! stay free of concrete I/O.
//!
//! # Available Services
//!
//! - [`services::login_service::LoginService`] - The submit cycle controller
//! - [`services::captcha_service::CaptchaBridge`] - Token acquisition from the challenge widget
//! - [`services::session_service::SessionNoticeService`] - Session-expired banner

pub mod services;
