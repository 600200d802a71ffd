use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use super::domain::{
    Application, ApplicationId, ApplicationStatus, CandidateId, SubmissionRequest,
};
use super::repository::{ApplicationRepository, StatusChange};
use crate::catalog::{JobId, JobRepository};
use crate::notify::{AdminNotifier, NotificationMessage};
use crate::stats::{MirrorEntry, StatsMirror};
use crate::storage::StorageError;

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

/// Orchestrator for the application lifecycle.
///
/// `submit` runs a single pass: validate, durable primary write, then the
/// two degraded-on-failure steps (mirror append, admin notification). Once
/// the primary write lands the submission is accepted; there is no
/// compensating rollback for the advisory steps.
pub struct ApplicationService<J, R, M, N> {
    jobs: Arc<J>,
    applications: Arc<R>,
    mirror: Arc<M>,
    notifier: Arc<N>,
}

impl<J, R, M, N> ApplicationService<J, R, M, N>
where
    J: JobRepository + 'static,
    R: ApplicationRepository + 'static,
    M: StatsMirror + 'static,
    N: AdminNotifier + 'static,
{
    pub fn new(jobs: Arc<J>, applications: Arc<R>, mirror: Arc<M>, notifier: Arc<N>) -> Self {
        Self {
            jobs,
            applications,
            mirror,
            notifier,
        }
    }

    /// Accept one submission and fan out to the mirror and the notifier.
    ///
    /// The job's active flag is deliberately not checked here; refusing
    /// applications against closed listings is a caller-layer policy.
    pub fn submit(
        &self,
        request: SubmissionRequest,
    ) -> Result<Application, ApplicationServiceError> {
        require_field("candidate_name", &request.candidate_name)?;
        require_field("candidate_id", &request.candidate_id.0)?;
        require_field("resume_ref", &request.resume_ref)?;

        let job = self
            .jobs
            .fetch(&request.job_id)?
            .ok_or_else(|| ApplicationServiceError::JobNotFound(request.job_id.clone()))?;

        let application = Application {
            id: next_application_id(),
            job_id: job.id.clone(),
            candidate_id: request.candidate_id,
            status: ApplicationStatus::Sent,
            applied_at: Utc::now(),
            resume_ref: request.resume_ref,
            cover_letter: request.cover_letter,
        };

        // System of record; any failure here aborts the submission.
        let stored = self.applications.insert(application)?;

        let entry = MirrorEntry {
            job_title: job.title.clone(),
            candidate_name: request.candidate_name.clone(),
            telegram_handle: request.telegram_handle.clone(),
            applied_at: stored.applied_at,
        };
        if let Err(err) = self.mirror.record_application(entry) {
            warn!(%err, application_id = %stored.id, "stats mirror write failed, count will drift");
        }

        let message = NotificationMessage::submission(&request.candidate_name, &job.title);
        if let Err(err) = self.notifier.notify(&message) {
            warn!(%err, application_id = %stored.id, "admin notification failed");
        }

        Ok(stored)
    }

    /// Apply a reviewer's status change. Re-applying the current status is a
    /// no-op; unreachable targets leave the record untouched. The check and
    /// the write run as one atomic repository call, so concurrent reviewers
    /// serialize at the store and cannot revive a terminal record.
    pub fn update_status(
        &self,
        id: &ApplicationId,
        next: ApplicationStatus,
    ) -> Result<Application, ApplicationServiceError> {
        match self.applications.update_status(id, next) {
            Ok(StatusChange::Applied(application)) => Ok(application),
            Ok(StatusChange::Refused { current }) => {
                Err(ApplicationServiceError::InvalidTransition {
                    from: current.label(),
                    to: next.label(),
                })
            }
            Err(StorageError::NotFound) => Err(ApplicationServiceError::NotFound(id.clone())),
            Err(err) => Err(err.into()),
        }
    }

    pub fn get(&self, id: &ApplicationId) -> Result<Application, ApplicationServiceError> {
        self.applications
            .fetch(id)?
            .ok_or_else(|| ApplicationServiceError::NotFound(id.clone()))
    }

    pub fn list_by_candidate(
        &self,
        candidate: &CandidateId,
    ) -> Result<Vec<Application>, ApplicationServiceError> {
        Ok(self.applications.list_by_candidate(candidate)?)
    }

    pub fn count_by_job(&self, job: &JobId) -> Result<u64, ApplicationServiceError> {
        Ok(self.applications.count_by_job(job)?)
    }
}

fn require_field(field: &'static str, value: &str) -> Result<(), ApplicationServiceError> {
    if value.trim().is_empty() {
        return Err(ApplicationServiceError::Validation { field });
    }
    Ok(())
}

/// Error raised by the application service. Only primary-path failures show
/// up here; mirror and notification failures are logged and swallowed.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error("missing required field `{field}`")]
    Validation { field: &'static str },
    #[error("job {0} not found")]
    JobNotFound(JobId),
    #[error("application {0} not found")]
    NotFound(ApplicationId),
    #[error("cannot move application from {from} to {to}")]
    InvalidTransition { from: &'static str, to: &'static str },
    #[error(transparent)]
    Storage(#[from] StorageError),
}
