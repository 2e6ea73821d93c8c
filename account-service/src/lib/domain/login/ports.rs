use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::login::errors::LoginError;
use crate::domain::login::models::Account;
use crate::domain::login::models::LoginSession;

/// Port for the login flow, consumed by the HTTP layer.
#[async_trait]
pub trait LoginServicePort: Send + Sync + 'static {
    /// Attempt to log in with an email and password.
    ///
    /// # Returns
    /// `Some(LoginSession)` on success; `None` when the email is unknown OR
    /// the password is wrong (deliberately indistinguishable).
    ///
    /// # Errors
    /// * `LockedOut` - Too many consecutive failures for this email
    /// * `Token` / `Store` - Infrastructure failures
    async fn attempt_login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<LoginSession>, LoginError>;
}

/// Read-only account lookup for the login flow.
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// Retrieve the account registered under an email (None if not found).
    ///
    /// # Errors
    /// * `Store` - Lookup failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, LoginError>;
}

/// Mints a signed session token for an authenticated account.
pub trait TokenIssuer: Send + Sync + 'static {
    /// # Errors
    /// * `Token` - Token generation failed
    fn issue(&self, account: &Account) -> Result<String, LoginError>;
}

/// Injectable time source so throttle windows are controllable in tests.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock reading system time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
