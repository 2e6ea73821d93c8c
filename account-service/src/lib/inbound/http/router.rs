use std::sync::Arc;
use std::time::Duration;

use auth::JwtHandler;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::banks::change_bank_password::change_bank_password;
use super::handlers::banks::create_bank::create_bank;
use super::handlers::banks::delete_bank::delete_bank;
use super::handlers::banks::get_bank::get_bank;
use super::handlers::banks::list_banks::list_banks;
use super::handlers::banks::update_bank::update_bank;
use super::handlers::login::login;
use super::handlers::users::change_user_password::change_user_password;
use super::handlers::users::create_user::create_user;
use super::handlers::users::delete_user::delete_user;
use super::handlers::users::get_user::get_user;
use super::handlers::users::list_users::list_users;
use super::handlers::users::update_user::update_user;
use super::middleware::authenticate as auth_middleware;
use crate::domain::bank::ports::BankServicePort;
use crate::domain::login::ports::LoginServicePort;
use crate::domain::user::ports::UserServicePort;

/// Shared application state handed to every handler.
///
/// Services are held behind their ports so the HTTP layer composes against
/// trait objects; production wiring and tests inject their own
/// implementations.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub bank_service: Arc<dyn BankServicePort>,
    pub login_service: Arc<dyn LoginServicePort>,
    pub jwt_handler: Arc<JwtHandler>,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/users", post(create_user))
        .route("/api/banks", post(create_bank));

    let protected_routes = Router::new()
        .route("/api/users", get(list_users))
        .route("/api/users/:user_id", get(get_user))
        .route("/api/users/:user_id", patch(update_user))
        .route("/api/users/:user_id", delete(delete_user))
        .route("/api/users/:user_id/password", post(change_user_password))
        .route("/api/banks", get(list_banks))
        .route("/api/banks/:bank_id", get(get_bank))
        .route("/api/banks/:bank_id", patch(update_bank))
        .route("/api/banks/:bank_id", delete(delete_bank))
        .route("/api/banks/:bank_id/password", post(change_bank_password))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
