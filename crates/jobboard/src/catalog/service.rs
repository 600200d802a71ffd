use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use super::domain::{EmployerId, Job, JobDraft, JobFilter, JobId};
use super::repository::JobRepository;
use crate::storage::StorageError;

static JOB_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_job_id() -> JobId {
    let id = JOB_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    JobId(format!("job-{id:06}"))
}

/// Service owning the listing lifecycle: post, list, deactivate.
pub struct JobCatalog<J> {
    jobs: Arc<J>,
}

impl<J> JobCatalog<J>
where
    J: JobRepository + 'static,
{
    pub fn new(jobs: Arc<J>) -> Self {
        Self { jobs }
    }

    /// Publish a new listing. The posted timestamp comes from the server
    /// clock, never from the caller.
    pub fn post_job(&self, employer: EmployerId, draft: JobDraft) -> Result<Job, CatalogError> {
        require_field("title", &draft.title)?;
        require_field("company", &draft.company)?;
        require_field("location", &draft.location)?;
        require_field("description", &draft.description)?;

        let job = Job {
            id: next_job_id(),
            title: draft.title,
            company: draft.company,
            location: draft.location,
            salary: draft.salary,
            category: draft.category,
            description: draft.description,
            requirements: draft.requirements,
            posted_at: Utc::now(),
            is_active: true,
            employer_id: employer,
        };

        let stored = self.jobs.insert(job)?;
        Ok(stored)
    }

    /// Active listings in insertion order, optionally narrowed by the filter.
    pub fn list_active(&self, filter: Option<&JobFilter>) -> Result<Vec<Job>, CatalogError> {
        let jobs = self.jobs.list_active()?;
        match filter {
            Some(filter) if !filter.is_empty() => {
                Ok(jobs.into_iter().filter(|job| filter.matches(job)).collect())
            }
            _ => Ok(jobs),
        }
    }

    pub fn get(&self, id: &JobId) -> Result<Job, CatalogError> {
        self.jobs
            .fetch(id)?
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }

    /// Soft-close a listing. Existing applications are untouched.
    pub fn deactivate(&self, id: &JobId, by: &EmployerId) -> Result<Job, CatalogError> {
        let mut job = self
            .jobs
            .fetch(id)?
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;

        if &job.employer_id != by {
            return Err(CatalogError::Forbidden {
                employer: by.clone(),
                job: id.clone(),
            });
        }

        job.is_active = false;
        self.jobs.update(job.clone())?;
        Ok(job)
    }
}

fn require_field(field: &'static str, value: &str) -> Result<(), CatalogError> {
    if value.trim().is_empty() {
        return Err(CatalogError::Validation { field });
    }
    Ok(())
}

/// Error raised by the catalog service.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("missing required field `{field}`")]
    Validation { field: &'static str },
    #[error("job {0} not found")]
    NotFound(JobId),
    #[error("employer {employer} does not own job {job}")]
    Forbidden { employer: EmployerId, job: JobId },
    #[error(transparent)]
    Storage(#[from] StorageError),
}
