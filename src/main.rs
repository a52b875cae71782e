use assessment_backend::{
    catalog,
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware::{auth, cors, rate_limit},
    routes, AppState,
};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    init_config()?;
    let config = get_config();

    let loaded = catalog::init()?;
    info!(
        sections = loaded.sections().len(),
        questions = loaded.total_questions(),
        "question catalog loaded"
    );

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    // Webhook delivery worker
    {
        let state = app_state.clone();
        tokio::spawn(async move {
            loop {
                match state.notification_service.run_once().await {
                    Ok(true) => {}
                    Ok(false) => {
                        tokio::time::sleep(Duration::from_millis(750)).await;
                    }
                    Err(e) => {
                        tracing::error!(error = ?e, "webhook worker error");
                        tokio::time::sleep(Duration::from_secs(1)).await;
                    }
                }
            }
        });
    }

    // Stale draft purge
    {
        let state = app_state.clone();
        let retention_days = config.draft_retention_days;
        tokio::spawn(async move {
            loop {
                match state.draft_service.purge_stale(retention_days).await {
                    Ok(0) => {}
                    Ok(purged) => info!(purged, "stale drafts removed"),
                    Err(e) => tracing::error!(error = ?e, "draft purge error"),
                }
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
        });
    }

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let public_api = Router::new()
        .route(
            "/api/assessment/catalog",
            get(routes::assessment::get_catalog),
        )
        .route(
            "/api/assessment/session",
            post(routes::assessment::create_session),
        )
        .route(
            "/api/assessment/draft/:token",
            get(routes::assessment::get_draft)
                .put(routes::assessment::save_draft)
                .delete(routes::assessment::delete_draft),
        )
        .route(
            "/api/assessment/submit",
            post(routes::assessment::submit_assessment),
        )
        .route(
            "/api/assessment/events",
            post(routes::assessment::track_events),
        )
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::new_rps_state(config.public_rps),
            rate_limit::rps_middleware,
        ));

    let admin_api = Router::new()
        .route(
            "/api/admin/submissions",
            get(routes::admin::list_submissions),
        )
        .route(
            "/api/admin/submissions/changes",
            get(routes::admin::submission_changes),
        )
        .route(
            "/api/admin/submissions/delete",
            post(routes::admin::delete_submissions),
        )
        .route(
            "/api/admin/submissions/:id",
            get(routes::admin::get_submission),
        )
        .route("/api/admin/dashboard", get(routes::admin::dashboard_stats))
        .route(
            "/api/admin/analytics",
            get(routes::admin::assessment_analytics),
        )
        .route(
            "/api/admin/export/csv",
            get(routes::export::export_submissions_csv),
        )
        .route(
            "/api/admin/export/xlsx",
            get(routes::export::export_submissions_xlsx),
        )
        .route(
            "/api/admin/export/events",
            get(routes::export::export_events),
        )
        .layer(axum::middleware::from_fn(auth::require_admin))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::new_rps_state(config.admin_rps),
            rate_limit::rps_middleware,
        ));

    let app = base_routes
        .merge(public_api)
        .merge(admin_api)
        .with_state(app_state)
        .layer(cors::cors_layer())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
