use std::sync::Arc;

use auth::Claims;
use auth::JwtHandler;

use crate::domain::login::errors::LoginError;
use crate::domain::login::models::Account;
use crate::domain::login::ports::TokenIssuer;

/// Token issuer adapter minting signed JWT session tokens.
pub struct JwtTokenIssuer {
    jwt_handler: Arc<JwtHandler>,
    expiration_hours: i64,
}

impl JwtTokenIssuer {
    pub fn new(jwt_handler: Arc<JwtHandler>, expiration_hours: i64) -> Self {
        Self {
            jwt_handler,
            expiration_hours,
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, account: &Account) -> Result<String, LoginError> {
        let claims = Claims::for_account(account.id, account.email.clone(), self.expiration_hours);

        self.jwt_handler
            .encode(&claims)
            .map_err(|e| LoginError::Token(e.to_string()))
    }
}
