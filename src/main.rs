use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::any,
};

use std::{env, sync::Arc};

use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use notas_server::handlers::rest;
use notas_server::repository::Repository;
use notas_server::service::{NotaService, TareaService};

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Fetch env variables
    let database_dsn =
        env::var("PG_DSN").expect("database dsn must be provided as an ENV variable");
    let http_addr = env::var("HTTP_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

    // Repository creation and migration
    let mut repo = Repository::new(database_dsn).await.unwrap_or_else(|e| {
        tracing::error!("Failed to establish database connection: {e}");
        panic!("failed to establish database connection: {e}");
    });

    repo.migrate().await.unwrap_or_else(|e| {
        tracing::error!("Failed to migrate database: {e}");
        panic!("failed to migrate database: {e}");
    });

    let repo = Arc::new(repo);

    // Service creation, one façade per entity over the shared repository
    let nota_service = Arc::new(NotaService::new(repo.clone()));
    let tarea_service = Arc::new(TareaService::new(repo));

    // Router config
    let router = Router::new()
        .route("/", any(root))
        .merge(rest::nota_router(nota_service))
        .merge(rest::tarea_router(tarea_service))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", rest::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind {http_addr}: {e}");
            panic!("failed to bind {http_addr}: {e}");
        });

    tracing::info!(
        "Server starting, listening on {}",
        listener.local_addr().unwrap()
    );

    axum::serve(listener, router).await.unwrap_or_else(|e| {
        tracing::error!("HTTP server error: {e}");
        panic!("failed to start HTTP server: {e}");
    });
}

async fn root() -> Response {
    (StatusCode::OK, "Notas server up").into_response()
}
