//! placementd: backend service for a college placement cell.
//!
//! Manages students, recruiting companies, applications and their review
//! history, application windows, recruitment rounds, off-campus opportunities,
//! notifications, and placement reporting, behind a JSON REST API.

pub mod api;
pub mod config;
pub mod db;
pub mod eligibility;
pub mod errors;
pub mod telemetry;
pub mod types;

#[cfg(test)]
pub mod test_utils;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use bon::Builder;
pub use config::Config;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{Level, debug, info};

use api::handlers::{
    application_windows, applications, companies, notifications, off_campus, reports, rounds, search,
    students, users,
};

/// Application state shared across all request handlers.
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// Get the placementd database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/users", post(users::create_user).get(users::list_users))
        .route(
            "/users/{id}",
            get(users::get_user).put(users::update_user).delete(users::delete_user),
        )
        .route(
            "/students",
            post(students::create_student).get(students::list_students),
        )
        .route(
            "/students/{id}",
            get(students::get_student)
                .put(students::update_student)
                .delete(students::delete_student),
        )
        .route(
            "/companies",
            post(companies::create_company).get(companies::list_companies),
        )
        .route(
            "/companies/{id}",
            get(companies::get_company)
                .put(companies::update_company)
                .delete(companies::delete_company),
        )
        .route(
            "/companies/{id}/eligibility/{student_id}",
            get(companies::check_eligibility),
        )
        .route(
            "/companies/{company_id}/rounds",
            post(rounds::create_round).get(rounds::list_company_rounds),
        )
        .route(
            "/rounds/{id}",
            get(rounds::get_round).put(rounds::update_round).delete(rounds::delete_round),
        )
        .route("/rounds/{id}/status", put(rounds::update_round_status))
        .route(
            "/applications",
            post(applications::create_application).get(applications::list_applications),
        )
        .route(
            "/applications/{id}",
            get(applications::get_application).delete(applications::delete_application),
        )
        .route("/applications/{id}/status", put(applications::update_application_status))
        .route("/applications/{id}/history", get(applications::get_application_history))
        .route(
            "/application-windows",
            post(application_windows::create_window).get(application_windows::list_windows),
        )
        .route("/application-windows/open", get(application_windows::list_open_windows))
        .route(
            "/application-windows/{id}",
            get(application_windows::get_window)
                .put(application_windows::update_window)
                .delete(application_windows::delete_window),
        )
        .route(
            "/off-campus",
            post(off_campus::create_opportunity).get(off_campus::list_opportunities),
        )
        .route(
            "/off-campus/{id}",
            get(off_campus::get_opportunity)
                .put(off_campus::update_opportunity)
                .delete(off_campus::delete_opportunity),
        )
        .route("/notifications", post(notifications::create_notification))
        .route("/notifications/{id}/read", put(notifications::mark_notification_read))
        .route("/notifications/{id}", delete(notifications::delete_notification))
        .route(
            "/users/{user_id}/notifications",
            get(notifications::list_user_notifications),
        )
        .route(
            "/users/{user_id}/notifications/read-all",
            put(notifications::mark_all_notifications_read),
        )
        .route("/dashboard", get(reports::get_dashboard))
        .route("/reports/branches", get(reports::get_branch_report))
        .route("/reports/companies", get(reports::get_company_report))
        .route("/search", get(search::search));

    Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .nest("/api", api)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// A fully-initialized server, ready to run or hand to a test harness.
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance: connect, migrate, build the router.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting placementd with configuration: {:#?}", config);

        let pool = PgPoolOptions::new()
            .max_connections(config.pool.max_connections)
            .min_connections(config.pool.min_connections)
            .acquire_timeout(Duration::from_secs(config.pool.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(config.pool.idle_timeout_secs))
            .connect(&config.database_url)
            .await?;

        migrator().run(&pool).await?;

        Self::new_with_pool(config, pool)
    }

    /// Create an application around an existing pool. Migrations are assumed
    /// to have run already.
    pub fn new_with_pool(config: Config, pool: PgPool) -> anyhow::Result<Self> {
        let state = AppState::builder().db(pool.clone()).config(config.clone()).build();
        let router = build_router(state);

        Ok(Self { router, config, pool })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "placementd listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::create_test_app;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_healthz(pool: PgPool) {
        let app = create_test_app(pool).await;
        let response = app.get("/healthz").await;
        response.assert_status_ok();
        assert_eq!(response.text(), "OK");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_unknown_route_is_404(pool: PgPool) {
        let app = create_test_app(pool).await;
        app.get("/api/nonexistent").await.assert_status_not_found();
    }
}
