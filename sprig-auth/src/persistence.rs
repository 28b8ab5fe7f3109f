use crate::service::PersistError;
use async_trait::async_trait;
use dioxus::dioxus_core::spawn_forever;
use dioxus::prelude::*;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Progress of the cloud copy once work is tied to an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CloudSaveState {
    Saving,
    Saved,
}

/// Whether the user's work lives only in the browser or in their account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PersistenceState {
    #[default]
    NotPersisted,
    #[serde(rename_all = "camelCase")]
    Persisted { cloud_save_state: CloudSaveState },
}

impl PersistenceState {
    pub fn is_cloud_saved(&self) -> bool {
        matches!(
            self,
            PersistenceState::Persisted {
                cloud_save_state: CloudSaveState::Saved
            }
        )
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self, PersistenceState::Persisted { .. })
    }

    pub fn begin_cloud_save(&mut self) {
        *self = PersistenceState::Persisted {
            cloud_save_state: CloudSaveState::Saving,
        };
    }

    pub fn finish_cloud_save(&mut self, result: Result<(), PersistError>) {
        *self = match result {
            Ok(()) => PersistenceState::Persisted {
                cloud_save_state: CloudSaveState::Saved,
            },
            Err(_) => PersistenceState::NotPersisted,
        };
    }
}

/// Storage for the user's work in their cloud account
#[async_trait(?Send)]
pub trait PersistenceBackend {
    async fn save_to_cloud(&self, email: &str) -> Result<(), PersistError>;
}

/// Hand the current work over to the account behind `email`
///
/// Marks the state as saving right away and flips it to saved when the
/// backend finishes. Does nothing for an empty email or if the work is
/// already persisted. The save runs in the root scope, so closing the
/// component that asked for it does not cancel it.
pub fn persist(
    mut state: Signal<PersistenceState>,
    email: &str,
    backend: Rc<dyn PersistenceBackend>,
) {
    let email = email.trim().to_string();
    if email.is_empty() {
        log::debug!("Persist: no email, skipping cloud save");
        return;
    }
    if state.peek().is_persisted() {
        log::debug!("Persist: already persisted");
        return;
    }

    state.write().begin_cloud_save();
    spawn_forever(async move {
        let result = backend.save_to_cloud(&email).await;
        match &result {
            Ok(()) => log::info!("Persist: work saved to cloud for {}", email),
            Err(e) => log::error!("Persist: cloud save failed: {}", e),
        }
        match state.try_write() {
            Ok(mut current) => current.finish_cloud_save(result),
            Err(e) => log::warn!("Persist: state dropped before save finished: {}", e),
        }
    });
}
