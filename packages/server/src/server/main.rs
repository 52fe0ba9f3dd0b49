//! Server binary entry point: wires `Config`, the database pool, the JWT
//! service, and the bounded pool of background workers (spec.md §5) around
//! the HTTP router, then serves.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use server_core::config::Config;
use server_core::domains::auth::jwt::JwtService;
use server_core::domains::scheduling::solver::HighsSolverBackend;
use server_core::kernel::jobs::JobWorker;
use server_core::server::{app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("failed to load configuration")?;

    let pool = app::connect_pool(&config.database_url)
        .await
        .context("failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    let jwt = Arc::new(JwtService::new(
        &config.jwt_secret_key,
        &config.jwt_algorithm,
        config.jwt_expire_days,
    ));

    let backend: Arc<dyn server_core::domains::scheduling::solver::SolverBackend> =
        Arc::new(HighsSolverBackend);

    for worker_index in 0..config.scheduler_worker_concurrency {
        let worker = JobWorker::new(
            pool.clone(),
            backend.clone(),
            Duration::from_millis(config.scheduler_poll_interval_ms),
            config.scheduler_lease_seconds,
        );
        tracing::info!(worker_index, "starting scheduling job worker");
        tokio::spawn(worker.run());
    }

    let state = AppState {
        db_pool: pool,
        jwt,
    };
    let router = app::build_app(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "server listening");

    axum::serve(listener, router)
        .await
        .context("server terminated unexpectedly")?;

    Ok(())
}
