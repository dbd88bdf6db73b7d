//! Interactive login client.
//!
//! Drives one full submit cycle against the configured endpoint: shows the
//! session-expired notice when due, prompts for credentials, optionally
//! acquires a CAPTCHA token, POSTs the form and reports the outcome.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Input, Password};
use tracing_subscriber::EnvFilter;

use login_client::config;
use login_client::prelude::*;
use login_client::application::services::{CaptchaError, SolveCallback};
use login_client::domain::entities::FieldId;

/// CAPTCHA widget for the terminal: the "challenge" is the operator pasting
/// a token obtained out of band.
struct TerminalWidget {
    on_solved: Mutex<Option<SolveCallback>>,
}

impl TerminalWidget {
    fn new() -> Self {
        Self {
            on_solved: Mutex::new(None),
        }
    }
}

impl CaptchaWidget for TerminalWidget {
    fn render(&self, on_solved: SolveCallback) -> Result<(), CaptchaError> {
        let mut slot = self.on_solved.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(on_solved);
        Ok(())
    }

    fn trigger(&self) -> Result<(), CaptchaError> {
        let callback = self
            .on_solved
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or_else(|| CaptchaError::Widget("widget was never rendered".to_string()))?;

        tokio::task::spawn_blocking(move || {
            let prompt = Input::<String>::new()
                .with_prompt("Captcha token")
                .interact_text();

            match prompt {
                Ok(token) => callback(token),
                Err(e) => tracing::error!(error = %e, "captcha token prompt failed"),
            }
        });

        Ok(())
    }

    fn reset(&self) {}
}

/// Stand-in for the page the form lives on; "reloading" just tells the
/// operator the session is established.
struct TerminalPage;

impl PageHandle for TerminalPage {
    fn reload(&self) {
        println!("{}", "Login accepted, session established.".green().bold());
    }
}

fn prompt_credentials(form: &mut LoginForm) -> Result<()> {
    let username: String = Input::new()
        .with_prompt("Username")
        .interact_text()
        .context("could not read username")?;
    form.set_value(FieldId::Username, username);

    let password = Password::new()
        .with_prompt("Password")
        .interact()
        .context("could not read password")?;
    form.set_value(FieldId::Password, password);

    if !form.totp_hidden {
        let totp: String = Input::new()
            .with_prompt("TOTP code")
            .allow_empty(true)
            .interact_text()
            .context("could not read TOTP code")?;
        form.set_value(FieldId::Totp, totp);
    }

    Ok(())
}

fn report(outcome: SubmitOutcome, form: &LoginForm) -> i32 {
    match outcome {
        SubmitOutcome::Success { .. } => 0,
        SubmitOutcome::ValidationFailed => {
            eprintln!("{}", "Please fill in all required fields.".yellow());
            1
        }
        SubmitOutcome::NotConfigured => {
            eprintln!(
                "{}",
                "No login URL configured; set LOGIN_URL and retry.".yellow()
            );
            1
        }
        SubmitOutcome::Rejected(LoginFailure::InvalidCredentials) => {
            eprintln!("{}", form.username.validity.message().red());
            1
        }
        SubmitOutcome::Rejected(LoginFailure::InvalidTotp) => {
            eprintln!("{}", form.totp.validity.message().red());
            eprintln!("Re-run and enter the one-time code from your authenticator.");
            1
        }
        SubmitOutcome::Errored => {
            eprintln!(
                "{}",
                "The login service could not be reached; try again.".red()
            );
            1
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    if config.log_format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    config.print_summary();

    let store = Arc::new(
        FileStore::open(&config.expiry_store_path).context("could not open the expiry store")?,
    );

    // One-shot session-expiry check, before anything else happens.
    let mut banner = NoticeBanner::hidden();
    let notice = SessionNoticeService::new(store.clone());
    if notice.init(&mut banner)? && banner.visible {
        println!(
            "{}",
            "Your session has expired. Please sign in again."
                .yellow()
                .bold()
        );
    }

    let transport = Arc::new(
        HttpTransport::new(Duration::from_secs(config.http_timeout_secs))
            .context("could not build the HTTP client")?,
    );

    let captcha = CaptchaBridge::new(
        TerminalWidget::new(),
        Duration::from_secs(config.captcha_timeout_secs),
    );
    if config.captcha_enabled {
        captcha.init().context("could not initialize the captcha bridge")?;
    }

    let mut form = LoginForm::bind(FormElements {
        action: config.login_url.clone(),
        needs_validation: true,
        username: Some(Field::required("username")),
        password: Some(Field::required("password")),
        totp: Some(Field::optional("totp")),
        submit: Some(SubmitButton::new("Sign in", 96.0)),
        totp_hidden: true,
        extra_fields: Default::default(),
    })
    .context("could not bind the login form")?;

    prompt_credentials(&mut form)?;

    let service = LoginService::new(transport, store, Arc::new(TerminalPage), captcha);

    let outcome = service.submit(&mut form).await;
    let code = report(outcome, &form);

    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}
