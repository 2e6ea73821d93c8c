use async_trait::async_trait;

use crate::domain::bank::errors::BankError;
use crate::domain::bank::models::Bank;
use crate::domain::bank::models::BankId;
use crate::domain::bank::models::CreateBankCommand;
use crate::domain::bank::models::UpdateBankCommand;
use crate::domain::listing::ListQuery;
use crate::domain::listing::Page;

/// Port for bank domain service operations.
///
/// Mirrors the user service port; see it for the per-operation error
/// contracts.
#[async_trait]
pub trait BankServicePort: Send + Sync + 'static {
    async fn create_bank(&self, command: CreateBankCommand) -> Result<Bank, BankError>;

    async fn get_bank(&self, id: &BankId) -> Result<Bank, BankError>;

    async fn list_banks(&self, query: ListQuery) -> Result<Page<Bank>, BankError>;

    async fn update_bank(&self, id: &BankId, command: UpdateBankCommand)
        -> Result<Bank, BankError>;

    async fn delete_bank(&self, id: &BankId) -> Result<(), BankError>;

    async fn change_password(
        &self,
        id: &BankId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), BankError>;
}

/// Persistence operations for the bank aggregate.
#[async_trait]
pub trait BankRepository: Send + Sync + 'static {
    async fn create(&self, bank: Bank) -> Result<Bank, BankError>;

    async fn find_by_id(&self, id: &BankId) -> Result<Option<Bank>, BankError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Bank>, BankError>;

    async fn list_all(&self) -> Result<Vec<Bank>, BankError>;

    async fn update(&self, bank: Bank) -> Result<Bank, BankError>;

    async fn update_password(&self, id: &BankId, password_hash: &str) -> Result<(), BankError>;

    async fn delete(&self, id: &BankId) -> Result<(), BankError>;
}
