//! Job catalog: posting, listing, and soft-deactivation of job listings.
//!
//! Listings are never hard-deleted; `deactivate` flips the active flag and
//! existing applications keep pointing at the record.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{EmployerId, Job, JobDraft, JobFilter, JobId, JobView};
pub use repository::JobRepository;
pub use router::catalog_router;
pub use service::{CatalogError, JobCatalog};
