use crate::helper::AuthHelper;
use crate::models::AuthStage;
use crate::service::AuthBackend;
use dioxus::prelude::*;
use std::rc::Rc;

/// Create an [`AuthHelper`] owned by the calling component
///
/// # Example
/// ```rust,ignore
/// let auth = use_auth_helper(AuthStage::EmailEntry);
/// let stage = auth.read().stage;
/// ```
pub fn use_auth_helper(initial_stage: AuthStage) -> Signal<AuthHelper> {
    use_signal(|| AuthHelper::new(initial_stage))
}

/// Clears `is_loading` if the submitting task is dropped before the backend
/// answers, so the helper accepts the next submission
struct PendingRequest {
    auth: Signal<AuthHelper>,
    finished: bool,
}

impl PendingRequest {
    fn new(auth: Signal<AuthHelper>) -> Self {
        Self {
            auth,
            finished: false,
        }
    }
}

impl Drop for PendingRequest {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        // Err means the helper itself is gone
        if let Ok(mut helper) = self.auth.try_write() {
            log::debug!("Auth: request cancelled in stage {:?}", helper.stage);
            helper.is_loading = false;
        }
    }
}

/// Submit the email held in `auth`, updating the signal when done
///
/// The signal is only borrowed before and after the request, never across it.
/// Safe to run outside the helper's scope: a dropped helper is skipped.
pub async fn submit_email(mut auth: Signal<AuthHelper>, backend: Rc<dyn AuthBackend>) {
    let email = {
        let mut helper = auth.write();
        if !helper.can_submit_email() || !helper.start_request() {
            log::debug!("Auth: ignoring email submission in stage {:?}", helper.stage);
            return;
        }
        helper.email.trim().to_string()
    };

    let mut pending = PendingRequest::new(auth);
    let result = backend.submit_email(&email).await;
    pending.finished = true;
    match auth.try_write() {
        Ok(mut helper) => helper.finish_email(result),
        Err(e) => log::debug!("Auth: helper dropped before email answer: {}", e),
    }
}

/// Submit the code held in `auth`, updating the signal when done
pub async fn submit_code(mut auth: Signal<AuthHelper>, backend: Rc<dyn AuthBackend>) {
    let (email, code) = {
        let mut helper = auth.write();
        if !helper.can_submit_code() || !helper.start_request() {
            log::debug!("Auth: ignoring code submission in stage {:?}", helper.stage);
            return;
        }
        (
            helper.email.trim().to_string(),
            helper.code.trim().to_string(),
        )
    };

    let mut pending = PendingRequest::new(auth);
    let result = backend.submit_code(&email, &code).await;
    pending.finished = true;
    match auth.try_write() {
        Ok(mut helper) => helper.finish_code(result),
        Err(e) => log::debug!("Auth: helper dropped before code answer: {}", e),
    }
}
