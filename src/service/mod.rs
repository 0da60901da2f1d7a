use std::sync::Arc;

use crate::{
    dto::{NotaResponse, TareaResponse, UpdateNotaRequest, UpdateTareaRequest},
    error::StoreError,
    repository::{NotaStore, TareaStore},
};

/// Thin façade over a [`NotaStore`]. Row absence is reported as `None`
/// and mapped to 404 at the HTTP boundary.
#[derive(Clone)]
pub struct NotaService {
    store: Arc<dyn NotaStore>,
}

impl NotaService {
    pub fn new(store: Arc<dyn NotaStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, title: String, content: String) -> Result<NotaResponse, StoreError> {
        self.store
            .insert(title, content)
            .await
            .map(NotaResponse::from)
    }

    pub async fn find_all(&self) -> Result<Vec<NotaResponse>, StoreError> {
        Ok(self
            .store
            .fetch_all()
            .await?
            .into_iter()
            .map(NotaResponse::from)
            .collect())
    }

    pub async fn find_one(&self, id: i64) -> Result<Option<NotaResponse>, StoreError> {
        Ok(self.store.fetch_one(id).await?.map(NotaResponse::from))
    }

    /// Applies the provided fields, then re-reads the row. A matched
    /// count of zero means the id does not exist and the re-read is
    /// skipped. The write-read pair is not atomic against a concurrent
    /// delete.
    pub async fn update(
        &self,
        id: i64,
        request: UpdateNotaRequest,
    ) -> Result<Option<NotaResponse>, StoreError> {
        let affected = self
            .store
            .update(id, request.title, request.content)
            .await?;
        if affected == 0 {
            return Ok(None);
        }
        self.find_one(id).await
    }

    pub async fn remove(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.store.delete(id).await? == 1)
    }

    pub async fn find_by_title(&self, title: &str) -> Result<Vec<NotaResponse>, StoreError> {
        Ok(self
            .store
            .fetch_by_title(title)
            .await?
            .into_iter()
            .map(NotaResponse::from)
            .collect())
    }
}

/// Same contract as [`NotaService`], for tareas.
#[derive(Clone)]
pub struct TareaService {
    store: Arc<dyn TareaStore>,
}

impl TareaService {
    pub fn new(store: Arc<dyn TareaStore>) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        title: String,
        content: String,
    ) -> Result<TareaResponse, StoreError> {
        self.store
            .insert(title, content)
            .await
            .map(TareaResponse::from)
    }

    pub async fn find_all(&self) -> Result<Vec<TareaResponse>, StoreError> {
        Ok(self
            .store
            .fetch_all()
            .await?
            .into_iter()
            .map(TareaResponse::from)
            .collect())
    }

    pub async fn find_one(&self, id: i64) -> Result<Option<TareaResponse>, StoreError> {
        Ok(self.store.fetch_one(id).await?.map(TareaResponse::from))
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateTareaRequest,
    ) -> Result<Option<TareaResponse>, StoreError> {
        let affected = self
            .store
            .update(id, request.title, request.content, request.completed)
            .await?;
        if affected == 0 {
            return Ok(None);
        }
        self.find_one(id).await
    }

    pub async fn remove(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.store.delete(id).await? == 1)
    }

    pub async fn find_by_title(&self, title: &str) -> Result<Vec<TareaResponse>, StoreError> {
        Ok(self
            .store
            .fetch_by_title(title)
            .await?
            .into_iter()
            .map(TareaResponse::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemRepository;

    fn nota_service() -> NotaService {
        NotaService::new(Arc::new(MemRepository::new()))
    }

    fn tarea_service() -> TareaService {
        TareaService::new(Arc::new(MemRepository::new()))
    }

    #[tokio::test]
    async fn create_assigns_fresh_ids_and_persists() {
        let service = nota_service();

        let first = service
            .create("Nota de prueba".into(), "Contenido de prueba".into())
            .await
            .unwrap();
        let second = service
            .create("Otra nota".into(), "Otro contenido".into())
            .await
            .unwrap();

        assert_eq!(first.title, "Nota de prueba");
        assert_eq!(first.content, "Contenido de prueba");
        assert_ne!(first.id, second.id);

        let found = service.find_one(first.id).await.unwrap().unwrap();
        assert_eq!(found.title, first.title);
        assert_eq!(found.content, first.content);
    }

    #[tokio::test]
    async fn find_all_returns_every_inserted_row() {
        let service = nota_service();

        for i in 0..3 {
            service
                .create(format!("Nota {i}"), format!("Contenido {i}"))
                .await
                .unwrap();
        }

        let notas = service.find_all().await.unwrap();
        assert_eq!(notas.len(), 3);
    }

    #[tokio::test]
    async fn find_one_missing_id_is_none() {
        let service = nota_service();
        assert!(service.find_one(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_applies_only_the_given_fields() {
        let service = nota_service();
        let nota = service
            .create("Original".into(), "Contenido original".into())
            .await
            .unwrap();

        let updated = service
            .update(
                nota.id,
                UpdateNotaRequest {
                    title: Some("Actualizada".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Actualizada");
        assert_eq!(updated.content, "Contenido original");

        let reread = service.find_one(nota.id).await.unwrap().unwrap();
        assert_eq!(reread.title, "Actualizada");
    }

    #[tokio::test]
    async fn update_missing_id_is_none() {
        let service = nota_service();
        let result = service
            .update(
                999,
                UpdateNotaRequest {
                    title: Some("Actualizada".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn remove_deletes_the_row() {
        let service = nota_service();
        let nota = service
            .create("Para borrar".into(), "Contenido".into())
            .await
            .unwrap();

        assert!(service.remove(nota.id).await.unwrap());
        assert!(service.find_one(nota.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remove_missing_id_is_false() {
        let service = nota_service();
        assert!(!service.remove(999).await.unwrap());
    }

    #[tokio::test]
    async fn find_by_title_filters_by_substring() {
        let service = nota_service();
        service
            .create("Nota específica".into(), "Contenido".into())
            .await
            .unwrap();
        service
            .create("Otra cosa".into(), "Contenido".into())
            .await
            .unwrap();

        let matches = service.find_by_title("específic").await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "Nota específica");

        let none = service.find_by_title("inexistente").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn find_by_title_treats_wildcards_literally() {
        let service = nota_service();
        service
            .create("Descuento 50%".into(), "Contenido".into())
            .await
            .unwrap();
        service
            .create("Sin comodines".into(), "Contenido".into())
            .await
            .unwrap();

        let matches = service.find_by_title("50%").await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "Descuento 50%");

        // "%" only matches titles containing a literal percent sign
        let matches = service.find_by_title("%").await.unwrap();
        assert_eq!(matches.len(), 1);

        let none = service.find_by_title("_").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn tarea_starts_incomplete_with_creation_timestamp() {
        let service = tarea_service();
        let before = chrono::Utc::now();

        let tarea = service
            .create("Tarea de prueba".into(), "Contenido".into())
            .await
            .unwrap();

        assert!(!tarea.completed);
        assert!(tarea.created_at >= before);
    }

    #[tokio::test]
    async fn tarea_update_can_flip_completion() {
        let service = tarea_service();
        let tarea = service
            .create("Tarea".into(), "Contenido".into())
            .await
            .unwrap();

        let updated = service
            .update(
                tarea.id,
                UpdateTareaRequest {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert!(updated.completed);
        assert_eq!(updated.title, "Tarea");
        assert_eq!(updated.created_at, tarea.created_at);
    }
}
