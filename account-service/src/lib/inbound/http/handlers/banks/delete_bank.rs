use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::bank::errors::BankError;
use crate::domain::bank::models::BankId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn delete_bank(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let bank_id = BankId::from_string(&id).map_err(BankError::from)?;

    state
        .bank_service
        .delete_bank(&bank_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
