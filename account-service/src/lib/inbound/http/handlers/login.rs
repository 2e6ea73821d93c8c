use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::login::models::LoginSession;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let result = state
        .login_service
        .attempt_login(&body.email, &body.password)
        .await
        .map_err(ApiError::from)?;

    // Unknown email and wrong password produce the same response.
    match result {
        Some(session) => Ok(ApiSuccess::new(StatusCode::OK, (&session).into())),
        None => Err(ApiError::Unauthorized(
            "Wrong email or password".to_string(),
        )),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub id: String,
    pub email: String,
    pub name: String,
    pub token: String,
}

impl From<&LoginSession> for LoginResponseData {
    fn from(session: &LoginSession) -> Self {
        Self {
            id: session.account_id.to_string(),
            email: session.email.clone(),
            name: session.name.clone(),
            token: session.token.clone(),
        }
    }
}
