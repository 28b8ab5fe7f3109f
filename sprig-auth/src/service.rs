use async_trait::async_trait;

/// Error type for login operations
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    /// The server refused the email or code
    Rejected,
    NetworkError(String),
    ServerError(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::Rejected => write!(f, "Rejected by server"),
            AuthError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            AuthError::ServerError(msg) => write!(f, "Server error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

/// Error type for cloud saves
#[derive(Debug, Clone, PartialEq)]
pub enum PersistError {
    NetworkError(String),
    ServerError(String),
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            PersistError::ServerError(msg) => write!(f, "Server error: {}", msg),
        }
    }
}

impl std::error::Error for PersistError {}

/// Transport for the email + code login flow
///
/// Implementations live in the application. Futures are not `Send` so the
/// trait can be backed by browser fetch on wasm.
#[async_trait(?Send)]
pub trait AuthBackend {
    /// Ask the server to email a login code to `email`
    async fn submit_email(&self, email: &str) -> Result<(), AuthError>;

    /// Exchange the emailed code for a session
    async fn submit_code(&self, email: &str, code: &str) -> Result<(), AuthError>;
}
