use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use axum_macros::debug_handler;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::{
        CreateNotaRequest, CreateTareaRequest, NotaResponse, TareaResponse, UpdateNotaRequest,
        UpdateTareaRequest,
    },
    service::{NotaService, TareaService},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        create_nota,
        get_all_notas,
        get_one_nota,
        update_nota,
        delete_nota,
        get_notas_by_title,
        create_tarea,
        get_all_tareas,
        get_one_tarea,
        update_tarea,
        delete_tarea,
        get_tareas_by_title
    ),
    components(schemas(
        NotaResponse,
        CreateNotaRequest,
        UpdateNotaRequest,
        TareaResponse,
        CreateTareaRequest,
        UpdateTareaRequest
    )),
    tags(
        (name = "notas", description = "Notas management API"),
        (name = "tareas", description = "Tareas management API")
    )
)]
pub struct ApiDoc;

const MISSING_FIELDS: &str = "El título y el contenido son obligatorios";

/// Field-presence check applied before the service is invoked. Missing
/// or blank title/content rejects the request with 400.
fn require_fields(title: Option<String>, content: Option<String>) -> Option<(String, String)> {
    let title = title?;
    let content = content?;
    if title.trim().is_empty() || content.trim().is_empty() {
        return None;
    }
    Some((title, content))
}

pub fn nota_router(service: Arc<NotaService>) -> Router {
    Router::new()
        .route("/nota", post(create_nota))
        .route("/nota", get(get_all_notas))
        .route("/nota/titulo/{title}", get(get_notas_by_title))
        .route("/nota/{id}", get(get_one_nota))
        .route("/nota/{id}", put(update_nota))
        .route("/nota/{id}", delete(delete_nota))
        .with_state(service)
}

pub fn tarea_router(service: Arc<TareaService>) -> Router {
    Router::new()
        .route("/tarea", post(create_tarea))
        .route("/tarea", get(get_all_tareas))
        .route("/tarea/titulo/{title}", get(get_tareas_by_title))
        .route("/tarea/{id}", get(get_one_tarea))
        .route("/tarea/{id}", put(update_tarea))
        .route("/tarea/{id}", delete(delete_tarea))
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/nota",
    request_body = CreateNotaRequest,
    responses(
        (status = 201, description = "Nota created successfully", body = NotaResponse),
        (status = 400, description = "Missing title or content"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notas"
)]
#[debug_handler]
pub async fn create_nota(
    State(service): State<Arc<NotaService>>,
    Json(payload): Json<CreateNotaRequest>,
) -> Response {
    let Some((title, content)) = require_fields(payload.title, payload.content) else {
        return (StatusCode::BAD_REQUEST, MISSING_FIELDS).into_response();
    };

    match service.create(title, content).await {
        Ok(nota) => (StatusCode::CREATED, Json(nota)).into_response(),
        Err(e) => {
            tracing::error!("failed to create nota: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create nota").into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/nota",
    responses(
        (status = 200, description = "List of all notas", body = Vec<NotaResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "notas"
)]
#[debug_handler]
pub async fn get_all_notas(State(service): State<Arc<NotaService>>) -> Response {
    match service.find_all().await {
        Ok(notas) => (StatusCode::OK, Json(notas)).into_response(),
        Err(e) => {
            tracing::error!("failed to get notas: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to get notas").into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/nota/{id}",
    params(
        ("id" = i64, Path, description = "Nota ID")
    ),
    responses(
        (status = 200, description = "Nota found", body = NotaResponse),
        (status = 404, description = "Nota not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notas"
)]
#[debug_handler]
pub async fn get_one_nota(State(service): State<Arc<NotaService>>, Path(id): Path<i64>) -> Response {
    match service.find_one(id).await {
        Ok(Some(nota)) => (StatusCode::OK, Json(nota)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            format!("Nota con ID {id} no encontrada"),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to get nota: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to get nota").into_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/nota/{id}",
    params(
        ("id" = i64, Path, description = "Nota ID")
    ),
    request_body = UpdateNotaRequest,
    responses(
        (status = 200, description = "Nota updated successfully", body = NotaResponse),
        (status = 404, description = "Nota not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notas"
)]
#[debug_handler]
pub async fn update_nota(
    State(service): State<Arc<NotaService>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateNotaRequest>,
) -> Response {
    match service.update(id, payload).await {
        Ok(Some(nota)) => (StatusCode::OK, Json(nota)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            format!("Nota con ID {id} no encontrada"),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to update nota: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to update nota").into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/nota/{id}",
    params(
        ("id" = i64, Path, description = "Nota ID")
    ),
    responses(
        (status = 200, description = "Nota deleted successfully"),
        (status = 404, description = "Nota not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notas"
)]
#[debug_handler]
pub async fn delete_nota(State(service): State<Arc<NotaService>>, Path(id): Path<i64>) -> Response {
    match service.remove(id).await {
        Ok(true) => StatusCode::OK.into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            format!("Nota con ID {id} no encontrada"),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to delete nota: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete nota").into_response()
        }
    }
}

/// An empty match set is a valid result here, unlike the tarea variant
/// which reports 404. The divergence comes from the original system and
/// is kept intentionally.
#[utoipa::path(
    get,
    path = "/nota/titulo/{title}",
    params(
        ("title" = String, Path, description = "Substring to search titles for")
    ),
    responses(
        (status = 200, description = "Matching notas, possibly empty", body = Vec<NotaResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "notas"
)]
#[debug_handler]
pub async fn get_notas_by_title(
    State(service): State<Arc<NotaService>>,
    Path(title): Path<String>,
) -> Response {
    match service.find_by_title(&title).await {
        Ok(notas) => (StatusCode::OK, Json(notas)).into_response(),
        Err(e) => {
            tracing::error!("failed to search notas by title: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to search notas").into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/tarea",
    request_body = CreateTareaRequest,
    responses(
        (status = 201, description = "Tarea created successfully", body = TareaResponse),
        (status = 400, description = "Missing title or content"),
        (status = 500, description = "Internal server error")
    ),
    tag = "tareas"
)]
#[debug_handler]
pub async fn create_tarea(
    State(service): State<Arc<TareaService>>,
    Json(payload): Json<CreateTareaRequest>,
) -> Response {
    let Some((title, content)) = require_fields(payload.title, payload.content) else {
        return (StatusCode::BAD_REQUEST, MISSING_FIELDS).into_response();
    };

    match service.create(title, content).await {
        Ok(tarea) => (StatusCode::CREATED, Json(tarea)).into_response(),
        Err(e) => {
            tracing::error!("failed to create tarea: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create tarea").into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/tarea",
    responses(
        (status = 200, description = "List of all tareas", body = Vec<TareaResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "tareas"
)]
#[debug_handler]
pub async fn get_all_tareas(State(service): State<Arc<TareaService>>) -> Response {
    match service.find_all().await {
        Ok(tareas) => (StatusCode::OK, Json(tareas)).into_response(),
        Err(e) => {
            tracing::error!("failed to get tareas: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to get tareas").into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/tarea/{id}",
    params(
        ("id" = i64, Path, description = "Tarea ID")
    ),
    responses(
        (status = 200, description = "Tarea found", body = TareaResponse),
        (status = 404, description = "Tarea not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "tareas"
)]
#[debug_handler]
pub async fn get_one_tarea(
    State(service): State<Arc<TareaService>>,
    Path(id): Path<i64>,
) -> Response {
    match service.find_one(id).await {
        Ok(Some(tarea)) => (StatusCode::OK, Json(tarea)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            format!("Tarea con ID {id} no encontrada"),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to get tarea: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to get tarea").into_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/tarea/{id}",
    params(
        ("id" = i64, Path, description = "Tarea ID")
    ),
    request_body = UpdateTareaRequest,
    responses(
        (status = 200, description = "Tarea updated successfully", body = TareaResponse),
        (status = 404, description = "Tarea not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "tareas"
)]
#[debug_handler]
pub async fn update_tarea(
    State(service): State<Arc<TareaService>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateTareaRequest>,
) -> Response {
    match service.update(id, payload).await {
        Ok(Some(tarea)) => (StatusCode::OK, Json(tarea)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            format!("Tarea con ID {id} no encontrada"),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to update tarea: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to update tarea").into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/tarea/{id}",
    params(
        ("id" = i64, Path, description = "Tarea ID")
    ),
    responses(
        (status = 200, description = "Tarea deleted successfully"),
        (status = 404, description = "Tarea not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "tareas"
)]
#[debug_handler]
pub async fn delete_tarea(
    State(service): State<Arc<TareaService>>,
    Path(id): Path<i64>,
) -> Response {
    match service.remove(id).await {
        Ok(true) => StatusCode::OK.into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            format!("Tarea con ID {id} no encontrada"),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to delete tarea: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete tarea").into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/tarea/titulo/{title}",
    params(
        ("title" = String, Path, description = "Substring to search titles for")
    ),
    responses(
        (status = 200, description = "Matching tareas", body = Vec<TareaResponse>),
        (status = 404, description = "No tarea matched the title"),
        (status = 500, description = "Internal server error")
    ),
    tag = "tareas"
)]
#[debug_handler]
pub async fn get_tareas_by_title(
    State(service): State<Arc<TareaService>>,
    Path(title): Path<String>,
) -> Response {
    match service.find_by_title(&title).await {
        Ok(tareas) if tareas.is_empty() => (
            StatusCode::NOT_FOUND,
            format!("Tarea con el título {title} no encontrada"),
        )
            .into_response(),
        Ok(tareas) => (StatusCode::OK, Json(tareas)).into_response(),
        Err(e) => {
            tracing::error!("failed to search tareas by title: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to search tareas").into_response()
        }
    }
}
