use thiserror::Error;

use crate::domain::values::EmailError;
use crate::domain::values::NameError;

/// Error for BankId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BankIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all bank-related operations
#[derive(Debug, Clone, Error)]
pub enum BankError {
    #[error("Invalid bank ID: {0}")]
    InvalidBankId(#[from] BankIdError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] NameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Bank not found: {0}")]
    NotFound(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
