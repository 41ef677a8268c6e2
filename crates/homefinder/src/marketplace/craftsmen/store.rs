use super::domain::Craftsman;
use crate::marketplace::listings::StoreError;

/// Craftsman directory table. `all` returns rows in any order; the service
/// sorts for presentation.
pub trait CraftsmanStore: Send + Sync {
    fn insert(&self, craftsman: Craftsman) -> Result<Craftsman, StoreError>;
    fn all(&self) -> Result<Vec<Craftsman>, StoreError>;
}
