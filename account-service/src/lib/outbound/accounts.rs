use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::login::errors::LoginError;
use crate::domain::login::models::Account;
use crate::domain::login::ports::AccountStore;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserRepository;

/// Account store adapter over the user repository.
///
/// Users are the login identities; the login flow only sees the narrow
/// [`Account`] view of them.
pub struct UserAccountStore<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
}

impl<UR> UserAccountStore<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<UR> AccountStore for UserAccountStore<UR>
where
    UR: UserRepository,
{
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, LoginError> {
        let user = self
            .repository
            .find_by_email(email)
            .await
            .map_err(|e| LoginError::Store(e.to_string()))?;

        Ok(user.map(account_from_user))
    }
}

fn account_from_user(user: User) -> Account {
    Account {
        id: user.id.0,
        email: user.email.as_str().to_string(),
        name: user.name.as_str().to_string(),
        password_hash: user.password_hash,
    }
}
