use serde::{Deserialize, Serialize};

/// Which step of the login flow the user is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthStage {
    /// Nothing shown yet, the owner still has to open the email form
    EmailEntry,
    /// Waiting for the user to submit an email
    Email,
    /// Waiting for the one-time code that was emailed
    Code,
    /// Login finished
    LoggedIn,
}

/// Outcome of the last submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthState {
    /// No submission finished yet (or one is in flight)
    #[default]
    Idle,
    EmailIncorrect,
    CodeIncorrect,
    LoggedIn,
}

impl AuthStage {
    /// Stage a freshly created helper starts in
    pub fn initial(already_logged_in: bool) -> Self {
        if already_logged_in {
            AuthStage::LoggedIn
        } else {
            AuthStage::EmailEntry
        }
    }
}
