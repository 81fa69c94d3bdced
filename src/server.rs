//! Service wiring: configuration → adapters → router → listener.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::adapters::auth::{JwtConfig, JwtSessionValidator, MockSessionValidator};
use crate::adapters::http::{app_router, AssessmentAppState, AuthState};
use crate::adapters::memory::InMemoryAssessmentRepository;
use crate::adapters::postgres::PostgresAssessmentRepository;
use crate::config::{AppConfig, ConfigError, DatabaseConfig, ServerConfig, ValidationError};
use crate::telemetry::{self, TelemetryError};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ValidationError> for ServerError {
    fn from(err: ValidationError) -> Self {
        ServerError::Config(ConfigError::ValidationFailed(err))
    }
}

/// Load configuration, install logging, and serve until shutdown.
pub async fn run() -> Result<(), ServerError> {
    let config = AppConfig::load()?;
    config.validate()?;
    telemetry::init(&config.server)?;

    let app = build_app(&config).await?;
    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        storage = if config.database.is_some() { "postgres" } else { "memory" },
        brain_profile_scoring = %config.assessment.brain_profile_scoring,
        "Assessment service ready"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Build the router for a validated configuration.
pub async fn build_app(config: &AppConfig) -> Result<Router, ServerError> {
    let state = match &config.database {
        Some(database) => {
            let repository = Arc::new(PostgresAssessmentRepository::new(connect(database).await?));
            AssessmentAppState {
                repository: repository.clone(),
                history_reader: repository,
                validator: config.assessment.validator(),
                history_limit: config.assessment.history_limit,
            }
        }
        None => {
            tracing::warn!("No database configured; assessments are kept in memory");
            let repository = Arc::new(InMemoryAssessmentRepository::new());
            AssessmentAppState {
                repository: repository.clone(),
                history_reader: repository,
                validator: config.assessment.validator(),
                history_limit: config.assessment.history_limit,
            }
        }
    };

    let router = app_router(state, session_validator(config), config.server.request_timeout());

    Ok(match cors_layer(&config.server) {
        Some(cors) => router.layer(cors),
        None => router,
    })
}

fn cors_layer(server: &ServerConfig) -> Option<CorsLayer> {
    if server.allowed_origins().next().is_none() {
        return None;
    }
    let origin = if server.allowed_origins().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            server
                .allowed_origins()
                .filter_map(|origin| HeaderValue::from_str(origin).ok()),
        )
    };
    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}

fn session_validator(config: &AppConfig) -> AuthState {
    match (&config.auth.jwt_secret, &config.auth.dev_token) {
        (Some(secret), _) => Arc::new(JwtSessionValidator::new(JwtConfig::new(
            secret.clone(),
            config.auth.issuer.clone(),
            config.auth.audience.clone(),
        ))),
        (None, Some(token)) => {
            tracing::warn!(user = %config.auth.dev_user, "Using development bearer token");
            Arc::new(
                MockSessionValidator::new()
                    .with_test_user(token.clone(), config.auth.dev_user.clone()),
            )
        }
        (None, None) => Arc::new(MockSessionValidator::new()),
    }
}

async fn connect(config: &DatabaseConfig) -> Result<sqlx::PgPool, ServerError> {
    let lock_timeout = config.lock_timeout_statement();
    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .after_connect(move |conn, _meta| {
            let statement = lock_timeout.clone();
            Box::pin(async move {
                sqlx::query(&statement).execute(conn).await?;
                Ok(())
            })
        })
        .connect(config.url.expose_secret())
        .await?;

    if config.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }
    Ok(pool)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
