#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use login_client::application::services::{CaptchaError, SolveCallback};
use login_client::domain::entities::{LoginRequest, LoginResponse};
use login_client::infrastructure::http::{TransportError, TransportResult};
use login_client::prelude::*;

/// Transport that replays a scripted queue of responses and records every
/// request it delivers.
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<TransportResult<LoginResponse>>>,
    calls: AtomicUsize,
    pub requests: Mutex<Vec<(String, serde_json::Value)>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(LoginResponse::new(status, body)));
        self
    }

    pub fn fail(self, error: TransportError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LoginTransport for ScriptedTransport {
    async fn post_login(
        &self,
        action: &str,
        request: &LoginRequest,
    ) -> TransportResult<LoginResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push((
            action.to_string(),
            serde_json::to_value(request).expect("request serializes"),
        ));

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected login request: no scripted response left")
    }
}

/// Page handle that counts reloads.
#[derive(Default)]
pub struct CountingPage {
    reloads: AtomicUsize,
}

impl CountingPage {
    pub fn reload_count(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }
}

impl PageHandle for CountingPage {
    fn reload(&self) {
        self.reloads.fetch_add(1, Ordering::SeqCst);
    }
}

/// Widget that solves every challenge immediately with a fixed token.
pub struct AutoSolveWidget {
    token: String,
    callback: Mutex<Option<SolveCallback>>,
}

impl AutoSolveWidget {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
            callback: Mutex::new(None),
        }
    }
}

impl CaptchaWidget for AutoSolveWidget {
    fn render(&self, on_solved: SolveCallback) -> Result<(), CaptchaError> {
        *self.callback.lock().unwrap() = Some(on_solved);
        Ok(())
    }

    fn trigger(&self) -> Result<(), CaptchaError> {
        let callback = self
            .callback
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| CaptchaError::Widget("not rendered".to_string()))?;
        callback(self.token.clone());
        Ok(())
    }

    fn reset(&self) {}
}

/// Widget whose challenges never complete.
pub struct StalledWidget;

impl CaptchaWidget for StalledWidget {
    fn render(&self, _on_solved: SolveCallback) -> Result<(), CaptchaError> {
        Ok(())
    }

    fn trigger(&self) -> Result<(), CaptchaError> {
        Ok(())
    }

    fn reset(&self) {}
}

/// A bound form with valid credentials, ready to submit.
pub fn test_form() -> LoginForm {
    LoginForm::bind(FormElements {
        action: Some("https://login.example.com/api/login".to_string()),
        needs_validation: true,
        username: Some(Field::required("username").with_value("alice")),
        password: Some(Field::required("password").with_value("hunter2")),
        totp: Some(Field::optional("totp")),
        submit: Some(SubmitButton::new("Sign in", 96.0)),
        totp_hidden: true,
        extra_fields: BTreeMap::new(),
    })
    .expect("fixture form binds")
}

pub struct TestHarness<W: CaptchaWidget + 'static> {
    pub transport: Arc<ScriptedTransport>,
    pub store: Arc<MemoryStore>,
    pub page: Arc<CountingPage>,
    pub service: LoginService<ScriptedTransport, MemoryStore, CountingPage, W>,
}

/// Wires a service around the scripted transport with CAPTCHA disabled.
pub fn harness(transport: ScriptedTransport) -> TestHarness<StalledWidget> {
    harness_with_widget(transport, StalledWidget, false, Duration::from_secs(1))
}

pub fn harness_with_widget<W: CaptchaWidget + 'static>(
    transport: ScriptedTransport,
    widget: W,
    captcha_enabled: bool,
    captcha_timeout: Duration,
) -> TestHarness<W> {
    let transport = Arc::new(transport);
    let store = Arc::new(MemoryStore::new());
    let page = Arc::new(CountingPage::default());
    let captcha = CaptchaBridge::new(widget, captcha_timeout);

    if captcha_enabled {
        captcha.init().expect("captcha bridge initializes");
    }

    let service = LoginService::new(
        transport.clone(),
        store.clone(),
        page.clone(),
        captcha,
    );

    TestHarness {
        transport,
        store,
        page,
        service,
    }
}
