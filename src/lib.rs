//! # Login Client
//!
//! A headless implementation of a login page's client-side control flow:
//! form submission, CAPTCHA token acquisition, response interpretation and
//! the session-expired notice.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - The form model, its validity state
//!   machine and the login wire types
//! - **Application Layer** ([`application`]) - The submit controller,
//!   CAPTCHA bridge and session-notice service
//! - **Infrastructure Layer** ([`infrastructure`]) - reqwest transport and
//!   the persisted expiry store
//! - **Utils** ([`utils`]) - One-shot asset-maintenance helpers
//!
//! ## Features
//!
//! - One submit cycle at a time, guarded by the busy state
//! - Optional CAPTCHA token per attempt, with a bounded wait
//! - TOTP-aware failure handling with single-shot error recovery
//! - Session-expiry notice driven by a persisted timestamp
//!
//! ## Quick Start
//!
//! ```bash
//! export LOGIN_URL="https://login.example.com/api/login"
//!
//! # Run one interactive login cycle
//! cargo run
//!
//! # Asset maintenance
//! cargo run --bin assets -- clear ./dist/css
//! cargo run --bin assets -- fingerprint ./dist/css/main.css
//! ```
//!
//! ## Configuration
//!
//! Client configuration is loaded from environment variables via
//! [`config::Config`]. See [`config`] module for available options.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod utils;

pub use config::Config;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        CaptchaBridge, CaptchaWidget, LoginService, PageHandle, SessionNoticeService,
        SubmitOutcome,
    };
    pub use crate::config::Config;
    pub use crate::domain::entities::{
        Field, FieldId, FormElements, LoginFailure, LoginForm, NoticeBanner, SubmitButton,
    };
    pub use crate::infrastructure::http::{HttpTransport, LoginTransport};
    pub use crate::infrastructure::storage::{ExpiryStore, FileStore, MemoryStore};
}
