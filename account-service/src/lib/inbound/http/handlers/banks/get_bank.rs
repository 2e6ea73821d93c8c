use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::BankData;
use crate::domain::bank::models::BankId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_bank(
    State(state): State<AppState>,
    Path(bank_id): Path<String>,
) -> Result<ApiSuccess<BankData>, ApiError> {
    let bank_id = BankId::from_string(&bank_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .bank_service
        .get_bank(&bank_id)
        .await
        .map_err(ApiError::from)
        .map(|ref bank| ApiSuccess::new(StatusCode::OK, bank.into()))
}
