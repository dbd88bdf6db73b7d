//! Wire types for the login request and response interpretation.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::form::FormSnapshot;

/// JSON body of the login POST: every captured form field flattened to a
/// top-level key, plus the CAPTCHA token (empty string when disabled).
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,

    #[serde(rename = "recaptchaToken")]
    pub recaptcha_token: String,
}

impl LoginRequest {
    pub fn new(snapshot: FormSnapshot, recaptcha_token: String) -> Self {
        Self {
            fields: snapshot,
            recaptcha_token,
        }
    }
}

/// How the server rejected the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFailure {
    InvalidCredentials,
    InvalidTotp,
}

/// The raw server response to a login POST.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    pub status: u16,
    pub body: String,
}

impl LoginResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Any 2xx status counts as an accepted login.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The session expiry carried by a successful response, if any.
    ///
    /// The body is expected to be a JSON object with an `expires` field in
    /// epoch milliseconds; anything else yields `None`.
    pub fn session_expiry(&self) -> Option<i64> {
        serde_json::from_str::<Value>(&self.body)
            .ok()?
            .get("expires")?
            .as_i64()
    }

    /// Classifies a rejection as a TOTP failure or a generic credential
    /// failure.
    ///
    /// A structured `{"error": {"kind": "totp"}}` body takes precedence.
    /// For servers that only return plain text, the historical contract
    /// applies: a body containing the substring `TOTP` marks a TOTP
    /// failure.
    pub fn failure_kind(&self) -> LoginFailure {
        if let Ok(value) = serde_json::from_str::<Value>(&self.body)
            && let Some(kind) = value.pointer("/error/kind").and_then(Value::as_str)
        {
            return match kind {
                "totp" => LoginFailure::InvalidTotp,
                _ => LoginFailure::InvalidCredentials,
            };
        }

        if self.body.contains("TOTP") {
            LoginFailure::InvalidTotp
        } else {
            LoginFailure::InvalidCredentials
        }
    }
}
