use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::bank::errors::BankError;
use crate::domain::bank::models::Bank;
use crate::domain::bank::models::BankId;
use crate::domain::bank::models::CreateBankCommand;
use crate::domain::bank::models::UpdateBankCommand;
use crate::domain::bank::ports::BankRepository;
use crate::domain::bank::ports::BankServicePort;
use crate::domain::listing;
use crate::domain::listing::ListQuery;
use crate::domain::listing::Page;

/// Domain service implementation for bank operations.
pub struct BankService<BR>
where
    BR: BankRepository,
{
    repository: Arc<BR>,
    password_hasher: auth::PasswordHasher,
}

impl<BR> BankService<BR>
where
    BR: BankRepository,
{
    pub fn new(repository: Arc<BR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    async fn ensure_email_is_free(&self, email: &str) -> Result<(), BankError> {
        if self.repository.find_by_email(email).await?.is_some() {
            return Err(BankError::EmailAlreadyExists(email.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl<BR> BankServicePort for BankService<BR>
where
    BR: BankRepository,
{
    async fn create_bank(&self, command: CreateBankCommand) -> Result<Bank, BankError> {
        self.ensure_email_is_free(command.email.as_str()).await?;

        let password_hash = self
            .password_hasher
            .hash(&command.password)
            .map_err(|e| BankError::Unknown(format!("Password hashing failed: {}", e)))?;

        let bank = Bank {
            id: BankId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        self.repository.create(bank).await
    }

    async fn get_bank(&self, id: &BankId) -> Result<Bank, BankError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(BankError::NotFound(id.to_string()))
    }

    async fn list_banks(&self, query: ListQuery) -> Result<Page<Bank>, BankError> {
        let banks = self.repository.list_all().await?;
        Ok(listing::paginate(banks, &query))
    }

    async fn update_bank(
        &self,
        id: &BankId,
        command: UpdateBankCommand,
    ) -> Result<Bank, BankError> {
        let mut bank = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(BankError::NotFound(id.to_string()))?;

        if let Some(new_email) = command.email {
            if new_email != bank.email {
                self.ensure_email_is_free(new_email.as_str()).await?;
            }
            bank.email = new_email;
        }

        if let Some(new_name) = command.name {
            bank.name = new_name;
        }

        self.repository.update(bank).await
    }

    async fn delete_bank(&self, id: &BankId) -> Result<(), BankError> {
        self.repository.delete(id).await
    }

    async fn change_password(
        &self,
        id: &BankId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), BankError> {
        let bank = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(BankError::NotFound(id.to_string()))?;

        let matches = self
            .password_hasher
            .verify(current_password, &bank.password_hash)
            .map_err(|e| BankError::Unknown(format!("Password verification failed: {}", e)))?;

        if !matches {
            return Err(BankError::InvalidCredentials);
        }

        let password_hash = self
            .password_hasher
            .hash(new_password)
            .map_err(|e| BankError::Unknown(format!("Password hashing failed: {}", e)))?;

        self.repository.update_password(id, &password_hash).await
    }
}
