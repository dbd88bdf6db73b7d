//! In-memory model of the login form.
//!
//! The form owns the state the browser DOM would normally carry: field
//! values, read-only flags, custom validity messages, the submit button's
//! busy visual and the hidden/visible state of the TOTP container. The
//! [`crate::application::services::LoginService`] mutates this model the
//! same way the page script would mutate DOM nodes.

use std::collections::BTreeMap;

use thiserror::Error;

/// Markup shown on the submit button while a request is in flight.
pub const SPINNER_MARKUP: &str = r#"<i class="fa-solid fa-circle-notch fa-spin"></i>"#;

/// Icon class while the password is visible.
pub const ICON_EYE: &str = "fa-solid fa-eye fa-fw";

/// Icon class while the password is masked.
pub const ICON_EYE_SLASH: &str = "fa-solid fa-eye-slash fa-fw";

/// Validity message applied after a generic credential rejection.
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials.";

/// Validity message applied after a TOTP-specific rejection.
pub const MSG_INVALID_TOTP: &str = "Invalid TOTP.";

/// Errors raised while binding the controller to a form.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("username input, password input, TOTP input or submit button is missing")]
    MissingElement,
}

/// Snapshot of all named field values, captured once per submit attempt.
pub type FormSnapshot = BTreeMap<String, String>;

/// Identifies one of the three bound inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Username,
    Password,
    Totp,
}

/// Per-field validity: either valid, or invalid with a message that will be
/// cleared by the next relevant input event.
///
/// This replaces one-shot "clear on input" listeners with an explicit state,
/// so repeated failed submits replace the pending clear instead of stacking
/// handlers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Validity {
    #[default]
    Valid,
    InvalidPendingClear {
        message: String,
    },
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The custom validity message; empty means valid.
    pub fn message(&self) -> &str {
        match self {
            Self::Valid => "",
            Self::InvalidPendingClear { message } => message,
        }
    }
}

/// A single bound input element.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub value: String,
    pub read_only: bool,
    pub required: bool,
    pub validity: Validity,
}

impl Field {
    /// A field that must be non-empty to pass constraint validation.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            read_only: false,
            required: true,
            validity: Validity::Valid,
        }
    }

    /// A field with no presence constraint (the TOTP input starts hidden
    /// and empty).
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            required: false,
            ..Self::required(name)
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn mark_invalid(&mut self, message: &str) {
        self.validity = Validity::InvalidPendingClear {
            message: message.to_string(),
        };
    }

    pub fn clear_validity(&mut self) {
        self.validity = Validity::Valid;
    }

    /// Constraint validation for this field, mirroring the browser's
    /// built-in checks: presence for required fields plus any custom
    /// validity message.
    pub fn satisfies_constraints(&self) -> bool {
        (!self.required || !self.value.is_empty()) && self.validity.is_valid()
    }
}

/// State of the submit button, including the busy visual.
///
/// While busy the original markup is swapped for a spinner and the width is
/// pinned so the control does not shrink around it.
#[derive(Debug, Clone)]
pub struct SubmitButton {
    pub markup: String,
    pub width: f64,
    pub pinned_width: Option<f64>,
    pub disabled: bool,
}

impl SubmitButton {
    pub fn new(markup: impl Into<String>, width: f64) -> Self {
        Self {
            markup: markup.into(),
            width,
            pinned_width: None,
            disabled: false,
        }
    }

    /// Swaps in the spinner and pins the current width. Returns the state
    /// needed to undo the swap on failure.
    pub fn enter_busy(&mut self) -> SubmitButtonState {
        let saved = SubmitButtonState {
            original_markup: self.markup.clone(),
            original_width: self.width,
        };

        self.pinned_width = Some(saved.original_width);
        self.markup = SPINNER_MARKUP.to_string();

        saved
    }

    /// Restores the pre-busy markup and unpins the width.
    pub fn restore(&mut self, state: SubmitButtonState) {
        self.markup = state.original_markup;
        self.width = state.original_width;
        self.pinned_width = None;
    }
}

/// Captured submit button visuals, taken before entering the busy state.
#[derive(Debug, Clone)]
pub struct SubmitButtonState {
    original_markup: String,
    original_width: f64,
}

/// Which clear action the next input event should perform.
///
/// `Credentials` couples the username and password fields: input on either
/// clears both. `Totp` clears only the TOTP field. Either way the submit
/// button is re-enabled exactly once, after which the state returns to
/// `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ErrorRecovery {
    #[default]
    Idle,
    Credentials,
    Totp,
}

/// Elements discovered on the page, handed to [`LoginForm::bind`].
#[derive(Debug, Default)]
pub struct FormElements {
    pub action: Option<String>,
    pub needs_validation: bool,
    pub username: Option<Field>,
    pub password: Option<Field>,
    pub totp: Option<Field>,
    pub submit: Option<SubmitButton>,
    pub totp_hidden: bool,
    /// Any further named inputs inside the form; they travel with the
    /// snapshot but carry no validation logic.
    pub extra_fields: BTreeMap<String, String>,
}

/// The bound login form.
#[derive(Debug)]
pub struct LoginForm {
    pub action: Option<String>,
    pub needs_validation: bool,
    pub was_validated: bool,
    pub username: Field,
    pub password: Field,
    pub totp: Field,
    pub totp_hidden: bool,
    pub password_masked: bool,
    pub reveal_icon: String,
    pub submit: SubmitButton,
    pub extra_fields: BTreeMap<String, String>,
    recovery: ErrorRecovery,
}

impl LoginForm {
    /// Binds to the discovered elements.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingElement`] if the username input, password
    /// input, TOTP input or submit button is absent. The controller cannot
    /// operate without them.
    pub fn bind(elements: FormElements) -> Result<Self, FormError> {
        let (Some(username), Some(password), Some(totp), Some(submit)) = (
            elements.username,
            elements.password,
            elements.totp,
            elements.submit,
        ) else {
            return Err(FormError::MissingElement);
        };

        Ok(Self {
            action: elements.action,
            needs_validation: elements.needs_validation,
            was_validated: false,
            username,
            password,
            totp,
            totp_hidden: elements.totp_hidden,
            password_masked: true,
            reveal_icon: ICON_EYE_SLASH.to_string(),
            submit,
            extra_fields: elements.extra_fields,
            recovery: ErrorRecovery::Idle,
        })
    }

    /// Built-in constraint validation across all bound fields.
    pub fn check_validity(&self) -> bool {
        self.username.satisfies_constraints()
            && self.password.satisfies_constraints()
            && self.totp.satisfies_constraints()
    }

    /// Captures all named field values at submit time.
    pub fn snapshot(&self) -> FormSnapshot {
        let mut snapshot = self.extra_fields.clone();
        for field in [&self.username, &self.password, &self.totp] {
            snapshot.insert(field.name.clone(), field.value.clone());
        }
        snapshot
    }

    /// Symmetric busy toggle: flips the read-only flag on username and
    /// password and the disabled flag on the submit button. Called once to
    /// enter the busy state and once to exit it; two calls restore the
    /// exact original state.
    pub fn toggle_busy(&mut self) {
        self.username.read_only = !self.username.read_only;
        self.password.read_only = !self.password.read_only;
        self.submit.disabled = !self.submit.disabled;
    }

    /// Applies the generic credential-failure state: both identity fields
    /// invalid, submit disabled, next input on either clears both.
    pub fn apply_credential_failure(&mut self) {
        self.username.mark_invalid(MSG_INVALID_CREDENTIALS);
        self.password.mark_invalid(MSG_INVALID_CREDENTIALS);
        self.submit.disabled = true;
        self.recovery = ErrorRecovery::Credentials;
    }

    /// Applies the TOTP-failure state: username and password stay locked,
    /// the TOTP field turns invalid and its container is revealed.
    pub fn apply_totp_failure(&mut self) {
        self.username.read_only = true;
        self.password.read_only = true;
        self.totp.mark_invalid(MSG_INVALID_TOTP);
        self.submit.disabled = true;
        self.totp_hidden = false;
        self.recovery = ErrorRecovery::Totp;
    }

    /// Updates a field's value and runs the input-event transition.
    pub fn set_value(&mut self, field: FieldId, value: impl Into<String>) {
        self.field_mut(field).value = value.into();
        self.notify_input(field);
    }

    /// The input-event transition of the recovery state machine.
    ///
    /// Performs the pending clear at most once; further input events are
    /// no-ops until another failed submit re-arms the state.
    pub fn notify_input(&mut self, field: FieldId) {
        match (self.recovery, field) {
            (ErrorRecovery::Credentials, FieldId::Username | FieldId::Password) => {
                self.username.clear_validity();
                self.password.clear_validity();
                self.submit.disabled = false;
                self.recovery = ErrorRecovery::Idle;
            }
            (ErrorRecovery::Totp, FieldId::Totp) => {
                self.totp.clear_validity();
                self.submit.disabled = false;
                self.recovery = ErrorRecovery::Idle;
            }
            _ => {}
        }
    }

    /// Flips the password between masked and plain text, swapping the icon.
    pub fn toggle_password_visibility(&mut self) {
        self.password_masked = !self.password_masked;
        self.reveal_icon = if self.password_masked {
            ICON_EYE_SLASH.to_string()
        } else {
            ICON_EYE.to_string()
        };
    }

    fn field_mut(&mut self, field: FieldId) -> &mut Field {
        match field {
            FieldId::Username => &mut self.username,
            FieldId::Password => &mut self.password,
            FieldId::Totp => &mut self.totp,
        }
    }
}
