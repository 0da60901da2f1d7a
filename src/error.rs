use thiserror::Error;

/// Errors surfaced by the storage layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("migration error: {0}")]
    Migration(#[from] refinery::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_std_error<E: std::error::Error + Send + Sync + 'static>() {}

    fn assert_from<T, E: From<T>>() {}

    #[test]
    fn store_error_wraps_the_backend_errors() {
        assert_std_error::<StoreError>();
        assert_from::<tokio_postgres::Error, StoreError>();
        assert_from::<refinery::Error, StoreError>();
    }
}
