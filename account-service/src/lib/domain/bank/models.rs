use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::bank::errors::BankIdError;
use crate::domain::listing::Listed;
use crate::domain::values::DisplayName;
use crate::domain::values::EmailAddress;

/// Bank aggregate entity.
///
/// Same shape as a user account; banks are managed as a second resource
/// collection with their own table and routes.
#[derive(Debug, Clone)]
pub struct Bank {
    pub id: BankId,
    pub name: DisplayName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Listed for Bank {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn email(&self) -> &str {
        self.email.as_str()
    }
}

/// Bank unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BankId(pub Uuid);

impl BankId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, BankIdError> {
        Uuid::parse_str(s)
            .map(BankId)
            .map_err(|e| BankIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for BankId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a new bank with validated fields.
#[derive(Debug)]
pub struct CreateBankCommand {
    pub name: DisplayName,
    pub email: EmailAddress,
    pub password: String,
}

impl CreateBankCommand {
    pub fn new(name: DisplayName, email: EmailAddress, password: String) -> Self {
        Self {
            name,
            email,
            password,
        }
    }
}

/// Command to update an existing bank with optional validated fields.
#[derive(Debug)]
pub struct UpdateBankCommand {
    pub name: Option<DisplayName>,
    pub email: Option<EmailAddress>,
}
