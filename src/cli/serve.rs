use pg2graphql::catalog::SchemaIntrospector;
use pg2graphql::error::{Pg2GraphqlError, Result};
use pg2graphql::schema::SchemaBuilder;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{routing::get, routing::post, Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Run the serve command to start the GraphQL server
pub async fn run(config_path: String, port: Option<u16>) -> Result<()> {
    // Load config
    let config = pg2graphql::config::load_config(&config_path)?;
    super::init_tracing(config.server.log_level.as_deref());

    tracing::info!("Loaded configuration from {}", config_path);

    let server_port = port.unwrap_or(config.server.port);

    let pool = pg2graphql::db::connect_pool(&config.database)?;

    tracing::info!(
        "Introspecting database '{}' on {}",
        config.database.name,
        config.database.host
    );
    let tables = SchemaIntrospector::new(pool.clone()).get().await?;
    tracing::info!("Building GraphQL schema for {} tables", tables.len());

    let (schema, snapshot) = SchemaBuilder::new(pool).build_schema(tables)?;

    tracing::info!("Schema built successfully");
    tracing::info!("GraphQL server running on http://localhost:{}", server_port);
    tracing::info!("Playground: http://localhost:{}/graphql", server_port);
    tracing::info!("Introspection snapshot: http://localhost:{}/introspection", server_port);

    let snapshot_json = serde_json::to_value(&snapshot)?;
    start_http_server(schema, snapshot_json, &config.server.bind, server_port).await
}

#[derive(Clone)]
struct AppState {
    schema: Arc<async_graphql::dynamic::Schema>,
    snapshot: Arc<serde_json::Value>,
}

async fn start_http_server(
    schema: async_graphql::dynamic::Schema,
    snapshot: serde_json::Value,
    bind: &str,
    port: u16,
) -> Result<()> {
    let state = AppState {
        schema: Arc::new(schema),
        snapshot: Arc::new(snapshot),
    };

    let app = Router::new()
        .route("/graphql", post(graphql_handler).get(graphql_playground))
        .route("/introspection", get(introspection_handler))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", bind, port).parse().map_err(|e| {
        Pg2GraphqlError::Config(format!("Invalid bind address '{}:{}': {}", bind, port, e))
    })?;
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        Pg2GraphqlError::Config(format!(
            "Failed to bind to port {}: {}. Port may be in use.",
            port, e
        ))
    })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Pg2GraphqlError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Execute a query document. Resolver-level failures are reported in the
/// GraphQL error envelope with a 400 status; a malformed request body is
/// rejected by the JSON extractor before reaching here.
async fn graphql_handler(
    State(state): State<AppState>,
    Json(request): Json<async_graphql::Request>,
) -> impl IntoResponse {
    let response = state.schema.execute(request).await;
    let status = if response.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(response))
}

/// Read-only snapshot of all registered tables, built once at boot.
async fn introspection_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(state.snapshot.as_ref().clone())
}

async fn graphql_playground() -> axum::response::Html<String> {
    axum::response::Html(async_graphql::http::playground_source(
        async_graphql::http::GraphQLPlaygroundConfig::new("/graphql"),
    ))
}

async fn health_check() -> &'static str {
    "OK"
}
