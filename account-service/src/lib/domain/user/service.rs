use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::listing;
use crate::domain::listing::ListQuery;
use crate::domain::listing::Page;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    async fn ensure_email_is_free(&self, email: &str) -> Result<(), UserError> {
        if self.repository.find_by_email(email).await?.is_some() {
            return Err(UserError::EmailAlreadyExists(email.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        self.ensure_email_is_free(command.email.as_str()).await?;

        let password_hash = self
            .password_hasher
            .hash(&command.password)
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;

        let user = User {
            id: UserId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        self.repository.create(user).await
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn list_users(&self, query: ListQuery) -> Result<Page<User>, UserError> {
        let users = self.repository.list_all().await?;
        Ok(listing::paginate(users, &query))
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_email) = command.email {
            if new_email != user.email {
                self.ensure_email_is_free(new_email.as_str()).await?;
            }
            user.email = new_email;
        }

        if let Some(new_name) = command.name {
            user.name = new_name;
        }

        self.repository.update(user).await
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await
    }

    async fn change_password(
        &self,
        id: &UserId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), UserError> {
        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        let matches = self
            .password_hasher
            .verify(current_password, &user.password_hash)
            .map_err(|e| UserError::Unknown(format!("Password verification failed: {}", e)))?;

        if !matches {
            return Err(UserError::InvalidCredentials);
        }

        let password_hash = self
            .password_hasher
            .hash(new_password)
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;

        self.repository.update_password(id, &password_hash).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::values::DisplayName;
    use crate::domain::values::EmailAddress;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn list_all(&self) -> Result<Vec<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
            async fn update_password(&self, id: &UserId, password_hash: &str) -> Result<(), UserError>;
            async fn delete(&self, id: &UserId) -> Result<(), UserError>;
        }
    }

    fn user_with(name: &str, email: &str) -> User {
        User {
            id: UserId::new(),
            name: DisplayName::new(name.to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .with(eq("test@example.com"))
            .times(1)
            .returning(|_| Ok(None));

        repository
            .expect_create()
            .withf(|user| {
                user.name.as_str() == "Test User"
                    && user.email.as_str() == "test@example.com"
                    && user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(Ok);

        let service = UserService::new(Arc::new(repository));

        let command = CreateUserCommand {
            name: DisplayName::new("Test User".to_string()).unwrap(),
            email: EmailAddress::new("test@example.com".to_string()).unwrap(),
            password: "password123".to_string(),
        };

        let user = service.create_user(command).await.unwrap();
        assert_eq!(user.name.as_str(), "Test User");
        assert_eq!(user.email.as_str(), "test@example.com");
        // Password is hashed with real Argon2
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|email| Ok(Some(user_with("Existing", email))));

        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository));

        let command = CreateUserCommand {
            name: DisplayName::new("Second".to_string()).unwrap(),
            email: EmailAddress::new("test@example.com".to_string()).unwrap(),
            password: "password456".to_string(),
        };

        let result = service.create_user(command).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let mut repository = MockTestUserRepository::new();

        let expected = user_with("Test User", "test@example.com");
        let user_id = expected.id;

        let returned = expected.clone();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let service = UserService::new(Arc::new(repository));

        let user = service.get_user(&user_id).await.unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.name.as_str(), "Test User");
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let result = service.get_user(&UserId::new()).await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_users_paginates() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_list_all().times(1).returning(|| {
            Ok(vec![
                user_with("Bob", "bob@example.com"),
                user_with("Alice", "alice@example.com"),
                user_with("Carol", "carol@example.com"),
            ])
        });

        let service = UserService::new(Arc::new(repository));

        let query = ListQuery::new(Some(1), Some(2), Some("email_desc"), None).unwrap();
        let page = service.list_users(query).await.unwrap();

        assert_eq!(page.count, 3);
        assert_eq!(page.total_pages, 2);
        assert!(page.has_next_page);
        assert_eq!(page.results[0].email.as_str(), "carol@example.com");
    }

    #[tokio::test]
    async fn test_update_user_success() {
        let mut repository = MockTestUserRepository::new();

        let existing = user_with("Old Name", "old@example.com");
        let user_id = existing.id;

        let returned = existing.clone();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        repository
            .expect_find_by_email()
            .with(eq("new@example.com"))
            .times(1)
            .returning(|_| Ok(None));

        repository
            .expect_update()
            .withf(|user| {
                user.name.as_str() == "New Name" && user.email.as_str() == "new@example.com"
            })
            .times(1)
            .returning(Ok);

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            name: Some(DisplayName::new("New Name".to_string()).unwrap()),
            email: Some(EmailAddress::new("new@example.com".to_string()).unwrap()),
        };

        let updated = service.update_user(&user_id, command).await.unwrap();
        assert_eq!(updated.name.as_str(), "New Name");
        assert_eq!(updated.email.as_str(), "new@example.com");
    }

    #[tokio::test]
    async fn test_update_user_keeping_own_email_skips_uniqueness_check() {
        let mut repository = MockTestUserRepository::new();

        let existing = user_with("Old Name", "same@example.com");
        let user_id = existing.id;

        let returned = existing.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        // Re-submitting the current email must not trip the duplicate check
        repository.expect_find_by_email().times(0);

        repository.expect_update().times(1).returning(Ok);

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            name: None,
            email: Some(EmailAddress::new("same@example.com".to_string()).unwrap()),
        };

        assert!(service.update_user(&user_id, command).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_user_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        let existing = user_with("Old Name", "old@example.com");
        let user_id = existing.id;

        let returned = existing.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|email| Ok(Some(user_with("Taken", email))));

        repository.expect_update().times(0);

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            name: None,
            email: Some(EmailAddress::new("taken@example.com".to_string()).unwrap()),
        };

        let result = service.update_user(&user_id, command).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_update_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            name: Some(DisplayName::new("New Name".to_string()).unwrap()),
            email: None,
        };

        let result = service.update_user(&UserId::new(), command).await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_user_success() {
        let mut repository = MockTestUserRepository::new();

        let user_id = UserId::new();
        repository
            .expect_delete()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(|_| Ok(()));

        let service = UserService::new(Arc::new(repository));

        assert!(service.delete_user(&user_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_change_password_success() {
        let mut repository = MockTestUserRepository::new();

        let hash = auth::PasswordHasher::new().hash("old_password").unwrap();
        let mut user = user_with("Test User", "test@example.com");
        user.password_hash = hash;
        let user_id = user.id;

        let returned = user.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        repository
            .expect_update_password()
            .withf(move |id, hash| *id == user_id && hash.starts_with("$argon2"))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = UserService::new(Arc::new(repository));

        let result = service
            .change_password(&user_id, "old_password", "new_password")
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_change_password_wrong_current_password() {
        let mut repository = MockTestUserRepository::new();

        let hash = auth::PasswordHasher::new().hash("old_password").unwrap();
        let mut user = user_with("Test User", "test@example.com");
        user.password_hash = hash;
        let user_id = user.id;

        let returned = user.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        repository.expect_update_password().times(0);

        let service = UserService::new(Arc::new(repository));

        let result = service
            .change_password(&user_id, "not_the_password", "new_password")
            .await;
        assert!(matches!(result.unwrap_err(), UserError::InvalidCredentials));
    }
}
