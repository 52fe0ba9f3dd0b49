//! Application setup: shared state and router assembly.
//!
//! Grounded in the teacher's `server::app` (CORS + trace layers, `AppState`
//! carried through `Extension`/`State`), stripped of the seesaw engine and
//! GraphQL schema this service has no use for — spec.md §6.1's HTTP surface
//! is a handful of plain JSON routes.

use std::sync::Arc;
use std::time::Duration;

use axum::http::Method;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domains::auth::jwt::JwtService;

use super::middleware::jwt_auth_middleware;
use super::routes::{auth as auth_routes, health, scheduling, workforce};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt: Arc<JwtService>,
}

pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
        .allow_origin(Any);

    let scheduling_routes = Router::new()
        .route("/optimize", post(scheduling::trigger_optimization))
        .route("/runs/:run_id/metrics", get(scheduling::get_run_metrics))
        .route(
            "/schedules/:weekly_schedule_id/runs",
            get(scheduling::list_runs_for_schedule),
        )
        .route("/runs/:run_id/apply", post(scheduling::apply_run));

    let workforce_routes = Router::new()
        .route(
            "/employees",
            get(workforce::list_employees).post(workforce::create_employee),
        )
        .route(
            "/roles",
            get(workforce::list_roles).post(workforce::create_role),
        )
        .route("/roles/assign", post(workforce::assign_employee_role))
        .route(
            "/shift-templates",
            get(workforce::list_shift_templates).post(workforce::create_shift_template),
        )
        .route(
            "/weekly-schedules",
            get(workforce::list_weekly_schedules).post(workforce::create_weekly_schedule),
        )
        .route("/weekly-schedules/:id", get(workforce::get_weekly_schedule))
        .route(
            "/weekly-schedules/:id/publish",
            post(workforce::publish_weekly_schedule),
        )
        .route(
            "/planned-shifts",
            get(workforce::list_planned_shifts).post(workforce::create_planned_shift),
        )
        .route("/shift-assignments", get(workforce::list_shift_assignments))
        .route(
            "/time-off-requests",
            get(workforce::list_time_off_requests).post(workforce::create_time_off_request),
        )
        .route(
            "/time-off-requests/:id/approve",
            post(workforce::approve_time_off_request),
        )
        .route(
            "/employee-preferences",
            get(workforce::list_employee_preferences).post(workforce::create_employee_preference),
        )
        .route(
            "/system-constraints",
            get(workforce::list_system_constraints).post(workforce::upsert_system_constraint),
        )
        .route(
            "/optimization-configs",
            get(workforce::list_optimization_configs)
                .post(workforce::create_optimization_config),
        )
        .route("/activity-log", get(workforce::list_recent_activity));

    let auth_router = Router::new()
        .route("/login", post(auth_routes::login))
        .route("/register", post(auth_routes::register));

    Router::new()
        .route("/health", get(health::health_handler))
        .nest("/scheduling", scheduling_routes)
        .nest("/workforce", workforce_routes)
        .nest("/auth", auth_router)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Connects the pool with the bounded size and acquire timeout the worker
/// pool assumes (spec.md §5: request-scoped and job-scoped handles are
/// separate clones of one pool, never a borrowed connection held across an
/// await boundary).
pub async fn connect_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url)
        .await
}
