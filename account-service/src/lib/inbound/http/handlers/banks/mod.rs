use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::bank::models::Bank;

pub mod change_bank_password;
pub mod create_bank;
pub mod delete_bank;
pub mod get_bank;
pub mod list_banks;
pub mod update_bank;

/// Response body shared by the bank handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BankData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Bank> for BankData {
    fn from(bank: &Bank) -> Self {
        Self {
            id: bank.id.to_string(),
            name: bank.name.as_str().to_string(),
            email: bank.email.as_str().to_string(),
            created_at: bank.created_at,
        }
    }
}
