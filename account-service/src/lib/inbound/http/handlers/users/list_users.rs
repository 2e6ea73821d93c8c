use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::listing::ListQuery;
use crate::domain::listing::Page;
use crate::domain::user::models::User;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<ListUsersParams>,
) -> Result<ApiSuccess<ListUsersResponseData>, ApiError> {
    let query = ListQuery::new(
        params.page_number,
        params.page_size,
        params.sort.as_deref(),
        params.search.as_deref(),
    )?;

    state
        .user_service
        .list_users(query)
        .await
        .map_err(ApiError::from)
        .map(|page| ApiSuccess::new(StatusCode::OK, page.into()))
}

/// Raw listing query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListUsersParams {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
    pub sort: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummaryData {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListUsersResponseData {
    pub page_number: u32,
    pub page_size: u32,
    pub count: usize,
    pub total_pages: usize,
    pub has_previous_page: bool,
    pub has_next_page: bool,
    pub results: Vec<UserSummaryData>,
}

impl From<Page<User>> for ListUsersResponseData {
    fn from(page: Page<User>) -> Self {
        Self {
            page_number: page.page_number,
            page_size: page.page_size,
            count: page.count,
            total_pages: page.total_pages,
            has_previous_page: page.has_previous_page,
            has_next_page: page.has_next_page,
            results: page
                .results
                .iter()
                .map(|user| UserSummaryData {
                    id: user.id.to_string(),
                    name: user.name.as_str().to_string(),
                    email: user.email.as_str().to_string(),
                })
                .collect(),
        }
    }
}
