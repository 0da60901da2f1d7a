use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Nota, Tarea};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotaResponse {
    /// Nota ID
    pub id: i64,
    /// Nota title
    pub title: String,
    /// Nota content
    pub content: String,
}

impl From<Nota> for NotaResponse {
    fn from(nota: Nota) -> Self {
        Self {
            id: nota.id,
            title: nota.title,
            content: nota.content,
        }
    }
}

/// Body of `POST /nota`. Both fields are required; they are optional
/// here so the handler can reject incomplete bodies with 400 instead
/// of a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateNotaRequest {
    /// Nota title
    pub title: Option<String>,
    /// Nota content
    pub content: Option<String>,
}

/// Body of `PUT /nota/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateNotaRequest {
    /// New title
    pub title: Option<String>,
    /// New content
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TareaResponse {
    /// Tarea ID
    pub id: i64,
    /// Tarea title
    pub title: String,
    /// Tarea content
    pub content: String,
    /// Whether the tarea is done
    pub completed: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<Tarea> for TareaResponse {
    fn from(tarea: Tarea) -> Self {
        Self {
            id: tarea.id,
            title: tarea.title,
            content: tarea.content,
            completed: tarea.completed,
            created_at: tarea.created_at,
        }
    }
}

/// Body of `POST /tarea`. Same required-field handling as
/// [`CreateNotaRequest`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTareaRequest {
    /// Tarea title
    pub title: Option<String>,
    /// Tarea content
    pub content: Option<String>,
}

/// Body of `PUT /tarea/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateTareaRequest {
    /// New title
    pub title: Option<String>,
    /// New content
    pub content: Option<String>,
    /// New completion flag
    pub completed: Option<bool>,
}
