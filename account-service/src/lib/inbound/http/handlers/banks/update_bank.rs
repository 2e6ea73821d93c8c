use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::BankData;
use crate::domain::bank::errors::BankError;
use crate::domain::bank::models::BankId;
use crate::domain::bank::models::UpdateBankCommand;
use crate::domain::values::DisplayName;
use crate::domain::values::EmailAddress;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating a bank (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateBankRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UpdateBankRequest {
    fn try_into_command(self) -> Result<UpdateBankCommand, BankError> {
        let name = self.name.map(DisplayName::new).transpose()?;
        let email = self.email.map(EmailAddress::new).transpose()?;

        Ok(UpdateBankCommand { name, email })
    }
}

pub async fn update_bank(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateBankRequest>,
) -> Result<ApiSuccess<BankData>, ApiError> {
    let bank_id = BankId::from_string(&id).map_err(BankError::from)?;
    let command = req.try_into_command()?;

    state
        .bank_service
        .update_bank(&bank_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref bank| ApiSuccess::new(StatusCode::OK, bank.into()))
}
