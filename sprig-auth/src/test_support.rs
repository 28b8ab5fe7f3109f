use crate::persistence::PersistenceBackend;
use crate::service::{AuthBackend, AuthError, PersistError};
use async_trait::async_trait;
use dioxus::dioxus_core::NoOpMutations;
use dioxus::prelude::*;
use std::cell::Cell;
use std::time::Duration;

/// Backend that answers after `delay_ms`, accepting the code "123456"
pub struct SlowBackend {
    pub delay_ms: u64,
    pub accept: bool,
    pub calls: Cell<usize>,
}

impl SlowBackend {
    pub fn new(delay_ms: u64, accept: bool) -> Self {
        Self {
            delay_ms,
            accept,
            calls: Cell::new(0),
        }
    }

    async fn answer(&self) -> bool {
        self.calls.set(self.calls.get() + 1);
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        self.accept
    }
}

#[async_trait(?Send)]
impl AuthBackend for SlowBackend {
    async fn submit_email(&self, _email: &str) -> Result<(), AuthError> {
        if self.answer().await {
            Ok(())
        } else {
            Err(AuthError::Rejected)
        }
    }

    async fn submit_code(&self, _email: &str, code: &str) -> Result<(), AuthError> {
        if self.answer().await && code == "123456" {
            Ok(())
        } else {
            Err(AuthError::Rejected)
        }
    }
}

#[async_trait(?Send)]
impl PersistenceBackend for SlowBackend {
    async fn save_to_cloud(&self, _email: &str) -> Result<(), PersistError> {
        if self.answer().await {
            Ok(())
        } else {
            Err(PersistError::ServerError("refused".to_string()))
        }
    }
}

/// Drive `dom` for `ms` milliseconds of wall time
pub async fn run_for(dom: &mut VirtualDom, ms: u64) {
    let deadline = tokio::time::Instant::now() + Duration::from_millis(ms);
    loop {
        tokio::select! {
            _ = dom.wait_for_work() => dom.render_immediate(&mut NoOpMutations),
            _ = tokio::time::sleep_until(deadline) => break,
        }
    }
}
