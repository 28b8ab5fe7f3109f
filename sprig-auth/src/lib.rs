//! # Sprig Auth
//!
//! Email + one-time-code login for Sprig, plus the cloud persistence state the
//! editor reports back to the user.
//!
//! This crate provides:
//! - The `AuthHelper` state machine (email entry, code entry, logged in)
//! - Input validation for emails and 6-digit login codes
//! - `PersistenceState` and the `persist` hand-off to a cloud backend
//! - Dioxus hooks that drive the helper from UI events
//!
//! ## Separation of Concerns
//!
//! This crate does **not** talk to any server. The transport for login and
//! cloud saves is supplied by the application through the `AuthBackend` and
//! `PersistenceBackend` traits.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use sprig_auth::{AuthHelper, AuthStage};
//!
//! // Programmatic usage
//! let mut auth = AuthHelper::new(AuthStage::Email).with_email("fiona@hackclub.com");
//! auth.submit_email(&backend).await;
//! auth.code = "123456".to_string();
//! auth.submit_code(&backend).await;
//!
//! // Inside a component
//! let auth = use_auth_helper(AuthStage::EmailEntry);
//! spawn(submit_email(auth, backend.clone()));
//! ```

pub mod helper;
pub mod hooks;
pub mod models;
pub mod persistence;
pub mod service;

#[cfg(test)]
mod test_support;

pub use helper::{is_valid_code, is_valid_email, AuthHelper, CODE_LENGTH};
pub use hooks::{submit_code, submit_email, use_auth_helper};
pub use models::{AuthStage, AuthState};
pub use persistence::{persist, CloudSaveState, PersistenceBackend, PersistenceState};
pub use service::{AuthBackend, AuthError, PersistError};
