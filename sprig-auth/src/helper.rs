use crate::models::{AuthStage, AuthState};
use crate::service::{AuthBackend, AuthError};

/// Number of digits in an emailed login code
pub const CODE_LENGTH: usize = 6;

/// Basic shape check for an email address
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return false;
    }

    domain.split('.').all(|label| !label.is_empty())
}

/// A login code is exactly [`CODE_LENGTH`] ASCII digits
pub fn is_valid_code(code: &str) -> bool {
    let code = code.trim();
    code.len() == CODE_LENGTH && code.chars().all(|c| c.is_ascii_digit())
}

/// Email + one-time-code login state machine
///
/// Holds everything the login popup binds to: the current stage, the outcome
/// of the last submission, the two text inputs and whether a request is in
/// flight. Transport is provided by an [`AuthBackend`].
#[derive(Debug, Clone, PartialEq)]
pub struct AuthHelper {
    pub stage: AuthStage,
    pub state: AuthState,
    pub email: String,
    pub code: String,
    pub is_loading: bool,
}

impl AuthHelper {
    pub fn new(stage: AuthStage) -> Self {
        let state = if stage == AuthStage::LoggedIn {
            AuthState::LoggedIn
        } else {
            AuthState::Idle
        };

        Self {
            stage,
            state,
            email: String::new(),
            code: String::new(),
            is_loading: false,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Open the email form. Only moves forward from `EmailEntry`.
    pub fn begin_email_entry(&mut self) {
        if self.stage == AuthStage::EmailEntry {
            log::debug!("Auth: EMAIL_ENTRY -> EMAIL");
            self.stage = AuthStage::Email;
        }
    }

    pub fn email_valid(&self) -> bool {
        is_valid_email(&self.email)
    }

    pub fn code_valid(&self) -> bool {
        is_valid_code(&self.code)
    }

    /// Mark a request as in flight. Returns false if one already is.
    pub fn start_request(&mut self) -> bool {
        if self.is_loading {
            return false;
        }
        self.is_loading = true;
        self.state = AuthState::Idle;
        true
    }

    /// Apply the result of an email submission
    pub fn finish_email(&mut self, result: Result<(), AuthError>) {
        self.is_loading = false;
        match result {
            Ok(()) => {
                log::debug!("Auth: email accepted, EMAIL -> CODE");
                self.stage = AuthStage::Code;
                self.state = AuthState::Idle;
            }
            Err(e) => {
                log::warn!("Auth: email submission failed: {}", e);
                self.state = AuthState::EmailIncorrect;
            }
        }
    }

    /// Apply the result of a code submission
    pub fn finish_code(&mut self, result: Result<(), AuthError>) {
        self.is_loading = false;
        match result {
            Ok(()) => {
                log::info!("Auth: logged in as {}", self.email.trim());
                self.stage = AuthStage::LoggedIn;
                self.state = AuthState::LoggedIn;
            }
            Err(e) => {
                log::warn!("Auth: code submission failed: {}", e);
                self.state = AuthState::CodeIncorrect;
            }
        }
    }

    /// Whether an email submission would be sent right now
    pub fn can_submit_email(&self) -> bool {
        self.stage == AuthStage::Email && !self.is_loading && self.email_valid()
    }

    /// Whether a code submission would be sent right now
    pub fn can_submit_code(&self) -> bool {
        self.stage == AuthStage::Code && !self.is_loading && self.code_valid()
    }

    /// Send the entered email and wait for the outcome
    pub async fn submit_email(&mut self, backend: &dyn AuthBackend) {
        if !self.can_submit_email() || !self.start_request() {
            log::debug!("Auth: ignoring email submission in stage {:?}", self.stage);
            return;
        }
        let email = self.email.trim().to_string();
        let result = backend.submit_email(&email).await;
        self.finish_email(result);
    }

    /// Send the entered code and wait for the outcome
    pub async fn submit_code(&mut self, backend: &dyn AuthBackend) {
        if !self.can_submit_code() || !self.start_request() {
            log::debug!("Auth: ignoring code submission in stage {:?}", self.stage);
            return;
        }
        let email = self.email.trim().to_string();
        let code = self.code.trim().to_string();
        let result = backend.submit_code(&email, &code).await;
        self.finish_code(result);
    }
}
