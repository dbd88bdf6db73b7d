//! CAPTCHA bridge over a third-party challenge widget.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::oneshot;
use tracing::debug;

/// Callback handed to the widget at render time; the widget invokes it with
/// the solved token.
pub type SolveCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Errors raised by the CAPTCHA bridge or the underlying widget.
#[derive(Debug, Error)]
pub enum CaptchaError {
    #[error("a captcha challenge is already in flight")]
    ChallengePending,

    #[error("captcha challenge timed out after {0:?}")]
    Timeout(Duration),

    #[error("captcha widget error: {0}")]
    Widget(String),
}

/// The remote challenge widget, reduced to its three entry points.
///
/// `render` registers the solved-token callback (the bridge passes one that
/// forwards to [`CaptchaBridge::on_solved`]), `trigger` starts a challenge,
/// `reset` clears the widget after a solve.
#[cfg_attr(test, mockall::automock)]
pub trait CaptchaWidget: Send + Sync {
    fn render(&self, on_solved: SolveCallback) -> Result<(), CaptchaError>;

    fn trigger(&self) -> Result<(), CaptchaError>;

    fn reset(&self);
}

struct Inner<W> {
    widget: W,
    enabled: AtomicBool,
    pending: Mutex<Option<oneshot::Sender<String>>>,
    timeout: Duration,
}

impl<W: CaptchaWidget> Inner<W> {
    fn take_pending(&self) -> Option<oneshot::Sender<String>> {
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
    }

    fn solved(&self, token: String) {
        self.widget.reset();

        match self.take_pending() {
            Some(tx) => {
                if tx.send(token).is_err() {
                    debug!("captcha waiter dropped before the token arrived");
                }
            }
            None => debug!("unsolicited captcha token dropped"),
        }
    }
}

/// Bridges the login controller to the challenge widget.
///
/// Constructed once at startup and cloned into consumers; the enabled flag
/// and the pending waiter live on the shared instance, not in module-level
/// statics.
pub struct CaptchaBridge<W> {
    inner: Arc<Inner<W>>,
}

impl<W> Clone for CaptchaBridge<W> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<W: CaptchaWidget + 'static> CaptchaBridge<W> {
    /// Creates a disabled bridge. Call [`Self::init`] to render the widget
    /// and enable token acquisition.
    pub fn new(widget: W, timeout: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                widget,
                enabled: AtomicBool::new(false),
                pending: Mutex::new(None),
                timeout,
            }),
        }
    }

    /// Renders the widget, wiring its solved-token callback back into the
    /// bridge, and flips the enabled flag.
    ///
    /// # Errors
    ///
    /// Returns the widget's render error; the bridge stays disabled.
    pub fn init(&self) -> Result<(), CaptchaError> {
        let inner: Weak<Inner<W>> = Arc::downgrade(&self.inner);
        self.inner.widget.render(Arc::new(move |token| {
            if let Some(inner) = inner.upgrade() {
                inner.solved(token);
            }
        }))?;

        self.inner.enabled.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Whether the login controller should acquire a token at all.
    pub fn is_enabled(&self) -> bool {
        self.inner.enabled.load(Ordering::SeqCst)
    }

    /// Triggers a challenge and awaits exactly one solved token.
    ///
    /// The wait is bounded by the configured timeout. A second `execute`
    /// while one is in flight is rejected with
    /// [`CaptchaError::ChallengePending`]; the single-submit path never
    /// issues one.
    pub async fn execute(&self) -> Result<String, CaptchaError> {
        let rx = {
            let mut pending = self.inner.pending.lock().unwrap_or_else(|e| e.into_inner());
            if pending.is_some() {
                return Err(CaptchaError::ChallengePending);
            }

            let (tx, rx) = oneshot::channel();
            *pending = Some(tx);
            rx
        };

        if let Err(e) = self.inner.widget.trigger() {
            self.inner.take_pending();
            return Err(e);
        }

        match tokio::time::timeout(self.inner.timeout, rx).await {
            Ok(Ok(token)) => Ok(token),
            Ok(Err(_)) => Err(CaptchaError::Widget(
                "solved-token channel closed before a token arrived".to_string(),
            )),
            Err(_) => {
                self.inner.take_pending();
                Err(CaptchaError::Timeout(self.inner.timeout))
            }
        }
    }

    /// Entry point for the widget's solve callback.
    ///
    /// Resets the widget and hands the one-time token to the pending
    /// waiter. A token with no waiter is dropped.
    pub fn on_solved(&self, token: String) {
        self.inner.solved(token);
    }
}
