use std::sync::Arc;

use account_service::config::Config;
use account_service::domain::bank::ports::BankServicePort;
use account_service::domain::bank::service::BankService;
use account_service::domain::login::ports::LoginServicePort;
use account_service::domain::login::ports::SystemClock;
use account_service::domain::login::service::LoginService;
use account_service::domain::login::throttle::LoginThrottle;
use account_service::domain::login::throttle::ThrottlePolicy;
use account_service::domain::user::ports::UserServicePort;
use account_service::domain::user::service::UserService;
use account_service::inbound::http::router::create_router;
use account_service::inbound::http::router::AppState;
use account_service::outbound::accounts::UserAccountStore;
use account_service::outbound::repositories::PostgresBankRepository;
use account_service::outbound::repositories::PostgresUserRepository;
use account_service::outbound::tokens::JwtTokenIssuer;
use auth::JwtHandler;
use chrono::Duration;
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        throttle_max_failures = config.throttle.max_failures,
        throttle_lockout_minutes = config.throttle.lockout_minutes,
        throttle_reset_on_success = config.throttle.reset_on_success,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let jwt_handler = Arc::new(JwtHandler::new(config.jwt.secret.as_bytes()));
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let bank_repository = Arc::new(PostgresBankRepository::new(pg_pool));

    let throttle = Arc::new(LoginThrottle::new(ThrottlePolicy {
        max_failures: config.throttle.max_failures,
        lockout: Duration::minutes(config.throttle.lockout_minutes),
        reset_on_success: config.throttle.reset_on_success,
    }));
    spawn_throttle_sweeper(Arc::clone(&throttle), config.throttle.lockout_minutes);

    let login_service: Arc<dyn LoginServicePort> = Arc::new(LoginService::new(
        Arc::new(UserAccountStore::new(Arc::clone(&user_repository))),
        Arc::new(JwtTokenIssuer::new(
            Arc::clone(&jwt_handler),
            config.jwt.expiration_hours,
        )),
        Arc::new(SystemClock),
        throttle,
    ));
    let user_service: Arc<dyn UserServicePort> = Arc::new(UserService::new(user_repository));
    let bank_service: Arc<dyn BankServicePort> = Arc::new(BankService::new(bank_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(AppState {
        user_service,
        bank_service,
        login_service,
        jwt_handler,
    });

    axum::serve(http_listener, http_application).await?;

    Ok(())
}

/// Periodically drops throttle entries for emails that never reached the
/// failure limit, so the table does not grow without bound.
fn spawn_throttle_sweeper(throttle: Arc<LoginThrottle>, sweep_interval_minutes: i64) {
    let period = std::time::Duration::from_secs(sweep_interval_minutes.max(1) as u64 * 60);

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // The first tick completes immediately; nothing to sweep yet
        interval.tick().await;

        loop {
            interval.tick().await;
            let evicted = throttle.evict_stale(Utc::now());
            if evicted > 0 {
                tracing::debug!(evicted, "Evicted stale throttle entries");
            }
        }
    });
}
