use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::listing::Listed;
use crate::domain::user::errors::UserIdError;
use crate::domain::values::DisplayName;
use crate::domain::values::EmailAddress;

/// User aggregate entity.
///
/// A registered user account; the email doubles as the login identifier.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: DisplayName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Listed for User {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn email(&self) -> &str {
        self.email.as_str()
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a new user with validated fields.
#[derive(Debug)]
pub struct CreateUserCommand {
    pub name: DisplayName,
    pub email: EmailAddress,
    pub password: String,
}

impl CreateUserCommand {
    pub fn new(name: DisplayName, email: EmailAddress, password: String) -> Self {
        Self {
            name,
            email,
            password,
        }
    }
}

/// Command to update an existing user with optional validated fields.
///
/// Only provided fields will be updated; the password changes through the
/// dedicated change-password operation instead.
#[derive(Debug)]
pub struct UpdateUserCommand {
    pub name: Option<DisplayName>,
    pub email: Option<EmailAddress>,
}
