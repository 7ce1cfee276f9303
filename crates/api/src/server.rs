//! Router assembly and listener lifecycle

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{delete, get, patch, post, put};
use axum::Router;
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::context::AppContext;
use crate::routes::{admin, auth, health, interventions, stats, technicians};

/// Build the full HTTP router over a shared context.
pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/hotels", get(auth::hotels))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .route(
            "/api/hotels/{hotel_id}/interventions",
            get(interventions::list).post(interventions::create),
        )
        .route("/api/hotels/{hotel_id}/interventions/disponibles", get(interventions::available))
        .route("/api/hotels/{hotel_id}/zones", get(interventions::zones))
        .route("/api/interventions/{id}", patch(interventions::update))
        .route("/api/interventions/{id}/statut", put(interventions::update_statut))
        .route("/api/interventions/{id}/assignation", put(interventions::assign))
        .route("/api/hotels/{hotel_id}/techniciens", get(technicians::list))
        .route("/api/hotels/{hotel_id}/techniciens/options", get(technicians::options))
        .route("/api/techniciens/{id}", get(technicians::details))
        .route("/api/techniciens/{id}/stats", get(technicians::stats))
        .route("/api/techniciens/{id}/statut", get(technicians::status))
        .route(
            "/api/techniciens/{id}/interventions/{intervention_id}",
            post(technicians::assign_intervention),
        )
        .route("/api/hotels/{hotel_id}/stats", get(stats::global))
        .route("/api/hotels/{hotel_id}/stats/counts", get(stats::counts))
        .route("/api/stats/periods", get(stats::periods))
        .route("/api/admin/cache/warmup/{hotel_id}", post(admin::warmup))
        .route("/api/admin/cache", delete(admin::clear))
        .route("/api/admin/cache/stats", get(admin::report))
        .with_state(ctx)
}

/// Drop expired stats entries on a fixed interval until the task is aborted.
pub fn spawn_cache_cleanup(ctx: Arc<AppContext>, every: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let removed = ctx.stats.cache().cleanup_expired();
            if removed > 0 {
                debug!(removed, "expired stats cache entries dropped");
            }
        }
    })
}

/// Serve the router until `shutdown` resolves.
pub async fn serve<F>(ctx: Arc<AppContext>, shutdown: F) -> std::io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let bind_address = ctx.config.server.bind_address();
    let listener = TcpListener::bind(&bind_address).await?;
    info!(bind_address = %bind_address, "hotelix listening");

    let cleanup = spawn_cache_cleanup(
        Arc::clone(&ctx),
        Duration::from_millis(ctx.config.cache.ttl_ms.max(1_000)),
    );

    let result = axum::serve(listener, build_router(ctx)).with_graceful_shutdown(shutdown).await;
    cleanup.abort();
    info!("hotelix stopped");
    result
}
