use std::future::Future;

/// Append-only tabular destination for recorded bookings.
///
/// Implementations make a single attempt per call; the caller neither retries
/// nor deduplicates.
pub trait RowStore: Send + Sync {
    fn append_row(&self, row: Vec<String>) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Reasons a booking could not be recorded.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("row store is not initialized")]
    NotInitialized,
    #[error("row store authentication failed: {0}")]
    Auth(String),
    #[error("row store append failed: {0}")]
    Backend(String),
}
