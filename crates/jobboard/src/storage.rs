/// Error enumeration shared by the job repository, the application
/// repository, and the stats mirror.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
