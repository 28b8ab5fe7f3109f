use serde::{Deserialize, Serialize};
use sprig_auth::{AuthHelper, AuthStage, AuthState, PersistenceState};

/// How far the user is already tied to an account when the prompt opens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggedIn {
    /// Signed in with a verified session
    Full,
    /// Known email, but no verified session yet
    Partial,
    /// Anonymous
    #[default]
    None,
}

impl LoggedIn {
    /// Stage the prompt's own auth helper starts in
    pub fn initial_stage(self) -> AuthStage {
        AuthStage::initial(self != LoggedIn::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Saving,
    Saved,
}

/// Wording of the confirmation view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationCopy {
    pub status: SaveStatus,
    /// Mention the emailed access link instead of ending with a full stop
    pub emailed_link: bool,
}

impl ConfirmationCopy {
    pub fn new(logged_in: LoggedIn, persistence: &PersistenceState) -> Self {
        let status = if persistence.is_cloud_saved() {
            SaveStatus::Saved
        } else {
            SaveStatus::Saving
        };

        Self {
            status,
            emailed_link: logged_in != LoggedIn::Full,
        }
    }

    /// Fluent message id for this copy
    pub fn message_id(&self) -> &'static str {
        if self.emailed_link {
            "prompt-confirmation-emailed"
        } else {
            "prompt-confirmation-full"
        }
    }

    /// Fluent message id for the status word
    pub fn status_id(&self) -> &'static str {
        match self.status {
            SaveStatus::Saved => "prompt-status-saved",
            SaveStatus::Saving => "prompt-status-saving",
        }
    }
}

/// The one view the save prompt shows
#[derive(Debug, Clone, PartialEq)]
pub enum PromptView {
    Confirmation(ConfirmationCopy),
    EmailForm,
    CodeForm { show_error: bool },
    Empty,
}

/// Local state of a mounted save prompt
///
/// `ghost_stage` only ever goes from false to true. Once set, the prompt shows
/// the confirmation no matter what the auth helper does afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavePromptModel {
    ghost_stage: bool,
}

impl SavePromptModel {
    pub fn ghost_stage(&self) -> bool {
        self.ghost_stage
    }

    fn enter_ghost_stage(&mut self) {
        if !self.ghost_stage {
            log::debug!("SavePrompt: entering ghost stage");
            self.ghost_stage = true;
        }
    }

    pub fn view(
        &self,
        auth: &AuthHelper,
        logged_in: LoggedIn,
        persistence: &PersistenceState,
    ) -> PromptView {
        if self.ghost_stage || auth.stage == AuthStage::LoggedIn {
            return PromptView::Confirmation(ConfirmationCopy::new(logged_in, persistence));
        }

        match auth.stage {
            AuthStage::Email => PromptView::EmailForm,
            AuthStage::Code => PromptView::CodeForm {
                show_error: auth.state == AuthState::CodeIncorrect,
            },
            AuthStage::EmailEntry | AuthStage::LoggedIn => PromptView::Empty,
        }
    }

    /// After an email submission. A rejected email skips ahead to the
    /// confirmation rather than showing an error.
    pub fn after_email_submit(&mut self, auth: &AuthHelper) {
        if auth.state == AuthState::EmailIncorrect {
            self.enter_ghost_stage();
        }
    }

    /// After a code submission. Returns true when login succeeded and the
    /// page should reload once the cloud save lands.
    pub fn after_code_submit(&mut self, auth: &AuthHelper) -> bool {
        if auth.state == AuthState::LoggedIn {
            self.enter_ghost_stage();
            true
        } else {
            false
        }
    }

    /// "Skip and just get coding"
    pub fn skip(&mut self) {
        self.enter_ghost_stage();
    }
}

/// One-shot latch that fires the first time persistence reports a finished
/// cloud save after being armed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReloadWatch {
    armed: bool,
    fired: bool,
}

impl ReloadWatch {
    pub fn arm(&mut self) {
        if !self.fired {
            self.armed = true;
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Feed the latest persistence state; true exactly once
    pub fn observe(&mut self, persistence: &PersistenceState) -> bool {
        if self.armed && !self.fired && persistence.is_cloud_saved() {
            self.armed = false;
            self.fired = true;
            return true;
        }
        false
    }
}

/// Flags for the submit button of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitButtonState {
    pub disabled: bool,
    pub loading: bool,
}

impl SubmitButtonState {
    pub fn for_email(auth: &AuthHelper) -> Self {
        Self {
            disabled: !auth.email_valid(),
            loading: auth.is_loading,
        }
    }

    pub fn for_code(auth: &AuthHelper) -> Self {
        Self {
            disabled: !auth.code_valid(),
            loading: auth.is_loading,
        }
    }
}
