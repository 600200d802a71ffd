use super::domain::{Application, ApplicationId, ApplicationStatus, CandidateId};
use crate::catalog::JobId;
use crate::storage::StorageError;

/// Outcome of an atomic status change on one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChange {
    /// The transition was applied, or re-applied as a no-op; carries the
    /// record as stored afterwards.
    Applied(Application),
    /// The target is not reachable from the current status; the record was
    /// left untouched.
    Refused { current: ApplicationStatus },
}

/// Storage abstraction for the primary application store.
///
/// `insert` must be durable before it returns; the orchestrator treats a
/// successful insert as the point of acceptance.
///
/// `update_status` is the one read-modify-write in the contract and must be
/// atomic per record: the read of the current status, the reachability check
/// via [`ApplicationStatus::can_transition`], and the write happen under the
/// store's row lock, so two concurrent reviewer actions serialize and a stale
/// transition can never overwrite a terminal state. Re-applying the current
/// status is a no-op reported as `Applied`.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, application: Application) -> Result<Application, StorageError>;
    fn update_status(
        &self,
        id: &ApplicationId,
        next: ApplicationStatus,
    ) -> Result<StatusChange, StorageError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, StorageError>;
    fn list_by_candidate(&self, candidate: &CandidateId) -> Result<Vec<Application>, StorageError>;
    fn count_by_job(&self, job: &JobId) -> Result<u64, StorageError>;
}
