//! Orchestration services for the login page.

pub mod captcha_service;
pub mod login_service;
pub mod session_service;

pub use captcha_service::{CaptchaBridge, CaptchaError, CaptchaWidget, SolveCallback};
pub use login_service::{LoginService, PageHandle, SubmitOutcome};
pub use session_service::SessionNoticeService;
