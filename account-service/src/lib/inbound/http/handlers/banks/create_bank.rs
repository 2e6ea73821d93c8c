use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::BankData;
use crate::domain::bank::models::CreateBankCommand;
use crate::domain::values::DisplayName;
use crate::domain::values::EmailAddress;
use crate::domain::values::EmailError;
use crate::domain::values::NameError;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn create_bank(
    State(state): State<AppState>,
    Json(body): Json<CreateBankRequest>,
) -> Result<ApiSuccess<BankData>, ApiError> {
    state
        .bank_service
        .create_bank(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref bank| ApiSuccess::new(StatusCode::CREATED, bank.into()))
}

/// HTTP request body for creating a bank (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateBankRequest {
    name: String,
    email: String,
    password: String,
    password_confirm: String,
}

#[derive(Debug, Clone, Error)]
enum ParseCreateBankRequestError {
    #[error("Password confirmation mismatched")]
    PasswordConfirmationMismatch,

    #[error("Invalid name: {0}")]
    Name(#[from] NameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl CreateBankRequest {
    fn try_into_command(self) -> Result<CreateBankCommand, ParseCreateBankRequestError> {
        if self.password != self.password_confirm {
            return Err(ParseCreateBankRequestError::PasswordConfirmationMismatch);
        }

        let name = DisplayName::new(self.name)?;
        let email = EmailAddress::new(self.email)?;
        Ok(CreateBankCommand::new(name, email, self.password))
    }
}

impl From<ParseCreateBankRequestError> for ApiError {
    fn from(err: ParseCreateBankRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
