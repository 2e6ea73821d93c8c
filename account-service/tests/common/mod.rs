#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;

use account_service::domain::bank::errors::BankError;
use account_service::domain::bank::models::Bank;
use account_service::domain::bank::models::BankId;
use account_service::domain::bank::ports::BankRepository;
use account_service::domain::bank::ports::BankServicePort;
use account_service::domain::bank::service::BankService;
use account_service::domain::login::ports::Clock;
use account_service::domain::login::ports::LoginServicePort;
use account_service::domain::login::service::LoginService;
use account_service::domain::login::throttle::LoginThrottle;
use account_service::domain::login::throttle::ThrottlePolicy;
use account_service::domain::user::errors::UserError;
use account_service::domain::user::models::User;
use account_service::domain::user::models::UserId;
use account_service::domain::user::ports::UserRepository;
use account_service::domain::user::ports::UserServicePort;
use account_service::domain::user::service::UserService;
use account_service::inbound::http::router::create_router;
use account_service::inbound::http::router::AppState;
use account_service::outbound::accounts::UserAccountStore;
use account_service::outbound::tokens::JwtTokenIssuer;
use async_trait::async_trait;
use auth::Claims;
use auth::JwtHandler;
use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;

const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory repositories,
/// with a settable clock driving the login throttle.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
    pub clock: Arc<TestClock>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_repository = Arc::new(InMemoryUserRepository::new());
        let bank_repository = Arc::new(InMemoryBankRepository::new());
        let jwt_handler = Arc::new(JwtHandler::new(TEST_JWT_SECRET));
        let clock = Arc::new(TestClock::new());
        let throttle = Arc::new(LoginThrottle::new(ThrottlePolicy::default()));

        let login_service: Arc<dyn LoginServicePort> = Arc::new(LoginService::new(
            Arc::new(UserAccountStore::new(Arc::clone(&user_repository))),
            Arc::new(JwtTokenIssuer::new(Arc::clone(&jwt_handler), 24)),
            Arc::clone(&clock),
            throttle,
        ));
        let user_service: Arc<dyn UserServicePort> = Arc::new(UserService::new(user_repository));
        let bank_service: Arc<dyn BankServicePort> = Arc::new(BankService::new(bank_repository));

        let router = create_router(AppState {
            user_service,
            bank_service,
            login_service,
            jwt_handler: Arc::clone(&jwt_handler),
        });

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(TEST_JWT_SECRET),
            clock,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Mint a valid Bearer token without going through the login flow.
    pub fn token_for(&self, account_id: &str, email: &str) -> String {
        let claims = Claims::for_account(account_id, email.to_string(), 24);
        self.jwt_handler
            .encode(&claims)
            .expect("Failed to encode test token")
    }

    /// Register a user through the API and return its id.
    pub async fn register_user(&self, name: &str, email: &str, password: &str) -> String {
        let response = self
            .post("/api/users")
            .json(&serde_json::json!({
                "name": name,
                "email": email,
                "password": password,
                "password_confirm": password,
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_str().expect("Missing user id").to_string()
    }

    /// Attempt a login through the API.
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/login")
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// Settable clock so tests can walk the lockout window.
pub struct TestClock(Mutex<DateTime<Utc>>);

impl TestClock {
    pub fn new() -> Self {
        Self(Mutex::new(Self::base_time()))
    }

    pub fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    /// Move the clock to `minutes` past the base time.
    pub fn set_minutes(&self, minutes: i64) {
        *self.0.lock().unwrap() = Self::base_time() + Duration::minutes(minutes);
    }
}

impl Clock for TestClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

/// In-memory user repository; newest entries listed first, like the
/// production repository.
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();

        if users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email.as_str() == email).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().rev().cloned().collect())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();

        if users
            .iter()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        let existing = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(UserError::NotFound(user.id.to_string()))?;

        *existing = user.clone();
        Ok(user)
    }

    async fn update_password(&self, id: &UserId, password_hash: &str) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();

        let existing = users
            .iter_mut()
            .find(|u| u.id == *id)
            .ok_or(UserError::NotFound(id.to_string()))?;

        existing.password_hash = password_hash.to_string();
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();

        let before = users.len();
        users.retain(|u| u.id != *id);

        if users.len() == before {
            return Err(UserError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

/// In-memory bank repository mirroring the user one.
pub struct InMemoryBankRepository {
    banks: Mutex<Vec<Bank>>,
}

impl InMemoryBankRepository {
    pub fn new() -> Self {
        Self {
            banks: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl BankRepository for InMemoryBankRepository {
    async fn create(&self, bank: Bank) -> Result<Bank, BankError> {
        let mut banks = self.banks.lock().unwrap();

        if banks.iter().any(|b| b.email == bank.email) {
            return Err(BankError::EmailAlreadyExists(
                bank.email.as_str().to_string(),
            ));
        }

        banks.push(bank.clone());
        Ok(bank)
    }

    async fn find_by_id(&self, id: &BankId) -> Result<Option<Bank>, BankError> {
        let banks = self.banks.lock().unwrap();
        Ok(banks.iter().find(|b| b.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Bank>, BankError> {
        let banks = self.banks.lock().unwrap();
        Ok(banks.iter().find(|b| b.email.as_str() == email).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Bank>, BankError> {
        let banks = self.banks.lock().unwrap();
        Ok(banks.iter().rev().cloned().collect())
    }

    async fn update(&self, bank: Bank) -> Result<Bank, BankError> {
        let mut banks = self.banks.lock().unwrap();

        if banks
            .iter()
            .any(|b| b.email == bank.email && b.id != bank.id)
        {
            return Err(BankError::EmailAlreadyExists(
                bank.email.as_str().to_string(),
            ));
        }

        let existing = banks
            .iter_mut()
            .find(|b| b.id == bank.id)
            .ok_or(BankError::NotFound(bank.id.to_string()))?;

        *existing = bank.clone();
        Ok(bank)
    }

    async fn update_password(&self, id: &BankId, password_hash: &str) -> Result<(), BankError> {
        let mut banks = self.banks.lock().unwrap();

        let existing = banks
            .iter_mut()
            .find(|b| b.id == *id)
            .ok_or(BankError::NotFound(id.to_string()))?;

        existing.password_hash = password_hash.to_string();
        Ok(())
    }

    async fn delete(&self, id: &BankId) -> Result<(), BankError> {
        let mut banks = self.banks.lock().unwrap();

        let before = banks.len();
        banks.retain(|b| b.id != *id);

        if banks.len() == before {
            return Err(BankError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
