use super::domain::{Job, JobId};
use crate::storage::StorageError;

/// Storage abstraction for job listings so the catalog service can be
/// exercised in isolation.
///
/// `list_active` must yield listings in insertion order; implementations are
/// expected to serialize single-row mutations themselves (the service holds
/// no locks of its own).
pub trait JobRepository: Send + Sync {
    fn insert(&self, job: Job) -> Result<Job, StorageError>;
    fn update(&self, job: Job) -> Result<(), StorageError>;
    fn fetch(&self, id: &JobId) -> Result<Option<Job>, StorageError>;
    fn list_active(&self) -> Result<Vec<Job>, StorageError>;
}
