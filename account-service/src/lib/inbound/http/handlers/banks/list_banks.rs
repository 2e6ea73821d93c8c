use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::bank::models::Bank;
use crate::domain::listing::ListQuery;
use crate::domain::listing::Page;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_banks(
    State(state): State<AppState>,
    Query(params): Query<ListBanksParams>,
) -> Result<ApiSuccess<ListBanksResponseData>, ApiError> {
    let query = ListQuery::new(
        params.page_number,
        params.page_size,
        params.sort.as_deref(),
        params.search.as_deref(),
    )?;

    state
        .bank_service
        .list_banks(query)
        .await
        .map_err(ApiError::from)
        .map(|page| ApiSuccess::new(StatusCode::OK, page.into()))
}

/// Raw listing query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListBanksParams {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
    pub sort: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BankSummaryData {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListBanksResponseData {
    pub page_number: u32,
    pub page_size: u32,
    pub count: usize,
    pub total_pages: usize,
    pub has_previous_page: bool,
    pub has_next_page: bool,
    pub results: Vec<BankSummaryData>,
}

impl From<Page<Bank>> for ListBanksResponseData {
    fn from(page: Page<Bank>) -> Self {
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
                .map(|bank| BankSummaryData {
                    id: bank.id.to_string(),
                    name: bank.name.as_str().to_string(),
                    email: bank.email.as_str().to_string(),
                })
                .collect(),
        }
    }
}
