use thiserror::Error;

/// Rejection issued while an email is locked out.
///
/// `retry_after_minutes` is the human-facing wait reported to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Too many failed login attempts; try again in {retry_after_minutes} minutes")]
pub struct LockedOut {
    pub retry_after_minutes: i64,
}

/// Error for login operations.
///
/// Wrong credentials are NOT an error: `attempt_login` returns `Ok(None)`
/// for them, so callers cannot tell an unknown email from a wrong password.
#[derive(Debug, Clone, Error)]
pub enum LoginError {
    #[error(transparent)]
    LockedOut(#[from] LockedOut),

    #[error("Credential verification failed: {0}")]
    Credential(#[from] auth::PasswordError),

    #[error("Token generation failed: {0}")]
    Token(String),

    #[error("Account store error: {0}")]
    Store(String),
}
