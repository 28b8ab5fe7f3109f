use crate::config::DemoSettings;
use async_trait::async_trait;
use sprig_auth::{AuthBackend, AuthError, PersistError, PersistenceBackend};
use std::rc::Rc;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

/// Login and cloud-save collaborators, shared with components via context
#[derive(Clone)]
pub struct Backends {
    pub auth: Rc<dyn AuthBackend>,
    pub persistence: Rc<dyn PersistenceBackend>,
}

impl Backends {
    pub fn demo(settings: DemoSettings) -> Self {
        let backend = Rc::new(DemoBackend::new(settings));
        Self {
            auth: backend.clone(),
            persistence: backend,
        }
    }
}

/// In-memory stand-in for the Sprig login and save API
pub struct DemoBackend {
    settings: DemoSettings,
}

impl DemoBackend {
    pub fn new(settings: DemoSettings) -> Self {
        Self { settings }
    }

    async fn simulate_latency(&self) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            if self.settings.latency_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.settings.latency_ms)).await;
            }
        }
    }

    fn is_rejected(&self, email: &str) -> bool {
        self.settings
            .rejected_emails
            .iter()
            .any(|rejected| rejected.eq_ignore_ascii_case(email))
    }
}

#[async_trait(?Send)]
impl AuthBackend for DemoBackend {
    async fn submit_email(&self, email: &str) -> Result<(), AuthError> {
        self.simulate_latency().await;
        if !sprig_auth::is_valid_email(email) || self.is_rejected(email) {
            return Err(AuthError::Rejected);
        }
        log::info!("DemoBackend: login code for {} is {}", email, self.settings.login_code);
        Ok(())
    }

    async fn submit_code(&self, email: &str, code: &str) -> Result<(), AuthError> {
        self.simulate_latency().await;
        if self.is_rejected(email) || code != self.settings.login_code {
            return Err(AuthError::Rejected);
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl PersistenceBackend for DemoBackend {
    async fn save_to_cloud(&self, email: &str) -> Result<(), PersistError> {
        self.simulate_latency().await;
        if self.is_rejected(email) {
            return Err(PersistError::ServerError(format!("no account for {}", email)));
        }
        Ok(())
    }
}
