use std::sync::Arc;

use async_trait::async_trait;
use auth::CredentialVerifier;

use crate::domain::login::errors::LoginError;
use crate::domain::login::models::LoginSession;
use crate::domain::login::ports::AccountStore;
use crate::domain::login::ports::Clock;
use crate::domain::login::ports::LoginServicePort;
use crate::domain::login::ports::TokenIssuer;
use crate::domain::login::throttle::LoginThrottle;

/// Login orchestrator.
///
/// Per attempt: throttle gate, account lookup, credential verification,
/// token issuance. The verifier runs on every non-throttled attempt; the
/// lookup result is never allowed to short-circuit the comparison, so an
/// unknown email and a wrong password stay in the same timing class.
pub struct LoginService<AS, TI, CK>
where
    AS: AccountStore,
    TI: TokenIssuer,
    CK: Clock,
{
    accounts: Arc<AS>,
    token_issuer: Arc<TI>,
    clock: Arc<CK>,
    throttle: Arc<LoginThrottle>,
    verifier: CredentialVerifier,
}

impl<AS, TI, CK> LoginService<AS, TI, CK>
where
    AS: AccountStore,
    TI: TokenIssuer,
    CK: Clock,
{
    pub fn new(
        accounts: Arc<AS>,
        token_issuer: Arc<TI>,
        clock: Arc<CK>,
        throttle: Arc<LoginThrottle>,
    ) -> Self {
        Self {
            accounts,
            token_issuer,
            clock,
            throttle,
            verifier: CredentialVerifier::new(),
        }
    }
}

#[async_trait]
impl<AS, TI, CK> LoginServicePort for LoginService<AS, TI, CK>
where
    AS: AccountStore,
    TI: TokenIssuer,
    CK: Clock,
{
    async fn attempt_login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<LoginSession>, LoginError> {
        // A locked-out attempt fails here: no lookup, no verification, and
        // no additional failure recorded.
        self.throttle.check(email, self.clock.now())?;

        let account = self.accounts.find_by_email(email).await?;

        // Always runs, against a decoy hash when the lookup missed.
        let verified = self
            .verifier
            .verify(password, account.as_ref().map(|a| a.password_hash.as_str()))?;

        match account {
            Some(account) if verified => {
                let token = self.token_issuer.issue(&account)?;
                self.throttle.record_success(email);

                tracing::debug!(account_id = %account.id, "Login succeeded");

                Ok(Some(LoginSession {
                    account_id: account.id,
                    email: account.email,
                    name: account.name,
                    token,
                }))
            }
            _ => {
                self.throttle.record_failure(email, self.clock.now());

                tracing::debug!("Login failed, attempt recorded");

                Ok(None)
            }
        }
    }
}
