use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::bank::errors::BankError;
use crate::domain::bank::models::BankId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn change_bank_password(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<ApiSuccess<ChangePasswordResponseData>, ApiError> {
    let bank_id = BankId::from_string(&id).map_err(BankError::from)?;

    if body.password_new != body.password_confirm {
        return Err(ApiError::UnprocessableEntity(
            "Password confirmation mismatched".to_string(),
        ));
    }

    state
        .bank_service
        .change_password(&bank_id, &body.password_old, &body.password_new)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                ChangePasswordResponseData {
                    id: bank_id.to_string(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangePasswordRequest {
    password_old: String,
    password_new: String,
    password_confirm: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangePasswordResponseData {
    pub id: String,
}
