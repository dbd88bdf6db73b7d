//! The login submit cycle: validation, CAPTCHA, POST, UI transitions.

use std::sync::Arc;

use tracing::{debug, error, warn};

use super::captcha_service::{CaptchaBridge, CaptchaWidget};
use crate::domain::entities::{
    LoginFailure, LoginForm, LoginRequest, TOKEN_EXPIRATION_KEY,
};
use crate::infrastructure::http::LoginTransport;
use crate::infrastructure::storage::ExpiryStore;

/// The page hosting the form. Success replaces the page wholesale, so the
/// only operation the controller needs is a reload.
#[cfg_attr(test, mockall::automock)]
pub trait PageHandle: Send + Sync {
    fn reload(&self);
}

/// Terminal state of one submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Constraint validation failed; no request was sent and the built-in
    /// validation UI carries the error.
    ValidationFailed,
    /// The form has no action URL; a developer mistake, logged and aborted
    /// with no UI state change.
    NotConfigured,
    /// The server accepted the login; exactly one page reload was
    /// triggered.
    Success { expires_at: Option<i64> },
    /// The server rejected the attempt; the form now carries the
    /// field-level error state for the given kind.
    Rejected(LoginFailure),
    /// Transport or CAPTCHA failure; logged, UI restored to idle, the user
    /// must resubmit.
    Errored,
}

/// Owns the login form's submit lifecycle.
///
/// One cycle runs at a time per form: the submit button is disabled before
/// the first suspension point (the CAPTCHA wait) and stays disabled until
/// the cycle ends, so re-entrant submission cannot happen.
pub struct LoginService<T, S, P, W> {
    transport: Arc<T>,
    store: Arc<S>,
    page: Arc<P>,
    captcha: CaptchaBridge<W>,
}

impl<T, S, P, W> LoginService<T, S, P, W>
where
    T: LoginTransport,
    S: ExpiryStore,
    P: PageHandle,
    W: CaptchaWidget + 'static,
{
    pub fn new(
        transport: Arc<T>,
        store: Arc<S>,
        page: Arc<P>,
        captcha: CaptchaBridge<W>,
    ) -> Self {
        Self {
            transport,
            store,
            page,
            captcha,
        }
    }

    /// Runs one submit cycle against the bound form.
    ///
    /// Failure is part of the normal flow here, so everything short of a
    /// programming error comes back as a [`SubmitOutcome`] rather than an
    /// `Err`. No retry is attempted on any path.
    pub async fn submit(&self, form: &mut LoginForm) -> SubmitOutcome {
        if form.needs_validation {
            form.was_validated = true;

            if !form.check_validity() {
                debug!("constraint validation failed, not submitting");
                return SubmitOutcome::ValidationFailed;
            }
        }

        let Some(action) = form.action.clone().filter(|a| !a.is_empty()) else {
            error!("no action defined for this form, cannot send login request");
            return SubmitOutcome::NotConfigured;
        };

        let snapshot = form.snapshot();

        let button_state = form.submit.enter_busy();
        form.toggle_busy();

        let recaptcha_token = if self.captcha.is_enabled() {
            match self.captcha.execute().await {
                Ok(token) => token,
                Err(e) => {
                    form.submit.restore(button_state);
                    form.toggle_busy();
                    error!(error = %e, "captcha token acquisition failed");
                    return SubmitOutcome::Errored;
                }
            }
        } else {
            String::new()
        };

        let request = LoginRequest::new(snapshot, recaptcha_token);

        let response = match self.transport.post_login(&action, &request).await {
            Ok(response) => response,
            Err(e) => {
                form.submit.restore(button_state);
                form.toggle_busy();
                error!(error = %e, "login request failed");
                return SubmitOutcome::Errored;
            }
        };

        if response.is_success() {
            let expires_at = response.session_expiry();

            if let Some(expires) = expires_at
                && let Err(e) = self.store.set(TOKEN_EXPIRATION_KEY, &expires.to_string())
            {
                // The notice is a convenience; a failed write must not
                // block the login.
                warn!(error = %e, "could not persist session expiry");
            }

            // The page replaces itself; no busy restoration needed.
            self.page.reload();
            return SubmitOutcome::Success { expires_at };
        }

        form.submit.restore(button_state);
        form.toggle_busy();

        let failure = response.failure_kind();
        match failure {
            LoginFailure::InvalidTotp => form.apply_totp_failure(),
            LoginFailure::InvalidCredentials => form.apply_credential_failure(),
        }

        SubmitOutcome::Rejected(failure)
    }
}
