use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use super::{NotaStore, TareaStore};
use crate::{
    error::StoreError,
    models::{Nota, Tarea},
};

#[derive(Debug, Default)]
struct Tables {
    notas: BTreeMap<i64, Nota>,
    tareas: BTreeMap<i64, Tarea>,
    last_nota_id: i64,
    last_tarea_id: i64,
}

/// In-memory store with the same observable behavior as [`Repository`]:
/// auto-incrementing ids starting at 1, substring title search,
/// affected-row counts on update and delete. Backs the test suite and
/// database-free local runs.
///
/// [`Repository`]: super::Repository
#[derive(Debug, Default)]
pub struct MemRepository {
    tables: Mutex<Tables>,
}

impl MemRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl NotaStore for MemRepository {
    async fn insert(&self, title: String, content: String) -> Result<Nota, StoreError> {
        let mut tables = self.tables();
        tables.last_nota_id += 1;
        let nota = Nota {
            id: tables.last_nota_id,
            title,
            content,
        };
        tables.notas.insert(nota.id, nota.clone());
        Ok(nota)
    }

    async fn fetch_all(&self) -> Result<Vec<Nota>, StoreError> {
        Ok(self.tables().notas.values().cloned().collect())
    }

    async fn fetch_one(&self, id: i64) -> Result<Option<Nota>, StoreError> {
        Ok(self.tables().notas.get(&id).cloned())
    }

    async fn update(
        &self,
        id: i64,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<u64, StoreError> {
        match self.tables().notas.get_mut(&id) {
            Some(nota) => {
                if let Some(title) = title {
                    nota.title = title;
                }
                if let Some(content) = content {
                    nota.content = content;
                }
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        Ok(u64::from(self.tables().notas.remove(&id).is_some()))
    }

    async fn fetch_by_title(&self, title: &str) -> Result<Vec<Nota>, StoreError> {
        Ok(self
            .tables()
            .notas
            .values()
            .filter(|nota| nota.title.contains(title))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl TareaStore for MemRepository {
    async fn insert(&self, title: String, content: String) -> Result<Tarea, StoreError> {
        let mut tables = self.tables();
        tables.last_tarea_id += 1;
        let tarea = Tarea {
            id: tables.last_tarea_id,
            title,
            content,
            completed: false,
            created_at: Utc::now(),
        };
        tables.tareas.insert(tarea.id, tarea.clone());
        Ok(tarea)
    }

    async fn fetch_all(&self) -> Result<Vec<Tarea>, StoreError> {
        Ok(self.tables().tareas.values().cloned().collect())
    }

    async fn fetch_one(&self, id: i64) -> Result<Option<Tarea>, StoreError> {
        Ok(self.tables().tareas.get(&id).cloned())
    }

    async fn update(
        &self,
        id: i64,
        title: Option<String>,
        content: Option<String>,
        completed: Option<bool>,
    ) -> Result<u64, StoreError> {
        match self.tables().tareas.get_mut(&id) {
            Some(tarea) => {
                if let Some(title) = title {
                    tarea.title = title;
                }
                if let Some(content) = content {
                    tarea.content = content;
                }
                if let Some(completed) = completed {
                    tarea.completed = completed;
                }
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        Ok(u64::from(self.tables().tareas.remove(&id).is_some()))
    }

    async fn fetch_by_title(&self, title: &str) -> Result<Vec<Tarea>, StoreError> {
        Ok(self
            .tables()
            .tareas
            .values()
            .filter(|tarea| tarea.title.contains(title))
            .cloned()
            .collect())
    }
}
