//! shelfmark-api - HTTP API server for shelfmark

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderName;
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use shelfmark_api::handlers::items::{delete_item, list_items, replace_tag, save_item};
use shelfmark_api::handlers::users::{create_user, list_users};
use shelfmark_api::services::ItemService;
use shelfmark_api::AppState;
use shelfmark_core::defaults;
use shelfmark_db::Database;
use shelfmark_resolver::{HttpMetadataResolver, ResolverConfig};

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically — useful
/// for log correlation when chasing a failed resolution.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn env_u64(name: &str, default: u64) -> u64 {
    match std::env::var(name) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    subsystem = "api",
                    op = "startup",
                    var = name,
                    value = %raw,
                    default,
                    "Ignoring unparsable environment variable"
                );
                default
            }
        },
        Err(_) => default,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;
    let addr =
        std::env::var("SHELFMARK_HTTP_ADDR").unwrap_or_else(|_| defaults::HTTP_ADDR.to_string());
    let timeout_secs = env_u64(
        "SHELFMARK_RESOLVE_TIMEOUT_SECS",
        defaults::RESOLVE_TIMEOUT_SECS,
    );
    let max_redirects =
        env_u64("SHELFMARK_MAX_REDIRECTS", defaults::MAX_REDIRECTS as u64) as usize;

    let db = Database::connect(&database_url).await?;
    db.migrate().await?;

    let resolver = HttpMetadataResolver::new(
        ResolverConfig::new()
            .timeout(Duration::from_secs(timeout_secs))
            .max_redirects(max_redirects),
    )?;

    let state = AppState {
        items: Arc::new(ItemService::new(
            Arc::new(db.items.clone()),
            Arc::new(db.users.clone()),
            Arc::new(resolver),
        )),
        users: Arc::new(db.users.clone()),
    };

    let x_request_id = HeaderName::from_static("x-request-id");
    let app = Router::new()
        .route("/health", get(health))
        .route("/items", post(save_item).get(list_items))
        .route("/items/:item_id", delete(delete_item))
        .route("/items/:item_id/tags", patch(replace_tag))
        .route("/users", post(create_user).get(list_users))
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuidV7))
        .with_state(state);

    info!(
        subsystem = "api",
        op = "startup",
        addr = %addr,
        resolve_timeout_secs = timeout_secs,
        max_redirects = max_redirects,
        "shelfmark API listening"
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
