use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::applications::domain::{
    Application, ApplicationId, ApplicationStatus, CandidateId, SubmissionRequest,
};
use crate::applications::repository::{ApplicationRepository, StatusChange};
use crate::applications::service::ApplicationService;
use crate::catalog::{EmployerId, Job, JobId, JobRepository};
use crate::notify::{AdminNotifier, DeliveryError, NotificationMessage};
use crate::stats::{MirrorEntry, StatsMirror};
use crate::storage::StorageError;

#[derive(Default)]
pub(super) struct MemoryJobs {
    order: Mutex<Vec<JobId>>,
    records: Mutex<HashMap<JobId, Job>>,
}

impl MemoryJobs {
    pub(super) fn seed(&self, job: Job) -> JobId {
        let id = job.id.clone();
        self.order.lock().expect("lock").push(id.clone());
        self.records.lock().expect("lock").insert(id.clone(), job);
        id
    }
}

impl JobRepository for MemoryJobs {
    fn insert(&self, job: Job) -> Result<Job, StorageError> {
        let mut records = self.records.lock().expect("lock");
        if records.contains_key(&job.id) {
            return Err(StorageError::Conflict);
        }
        self.order.lock().expect("lock").push(job.id.clone());
        records.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    fn update(&self, job: Job) -> Result<(), StorageError> {
        let mut records = self.records.lock().expect("lock");
        if !records.contains_key(&job.id) {
            return Err(StorageError::NotFound);
        }
        records.insert(job.id.clone(), job);
        Ok(())
    }

    fn fetch(&self, id: &JobId) -> Result<Option<Job>, StorageError> {
        Ok(self.records.lock().expect("lock").get(id).cloned())
    }

    fn list_active(&self) -> Result<Vec<Job>, StorageError> {
        let order = self.order.lock().expect("lock");
        let records = self.records.lock().expect("lock");
        Ok(order
            .iter()
            .filter_map(|id| records.get(id))
            .filter(|job| job.is_active)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub(super) struct MemoryApplications {
    records: Mutex<HashMap<ApplicationId, Application>>,
}

impl ApplicationRepository for MemoryApplications {
    fn insert(&self, application: Application) -> Result<Application, StorageError> {
        let mut records = self.records.lock().expect("lock");
        if records.contains_key(&application.id) {
            return Err(StorageError::Conflict);
        }
        records.insert(application.id.clone(), application.clone());
        Ok(application)
    }

    fn update_status(
        &self,
        id: &ApplicationId,
        next: ApplicationStatus,
    ) -> Result<StatusChange, StorageError> {
        let mut records = self.records.lock().expect("lock");
        let application = records.get_mut(id).ok_or(StorageError::NotFound)?;
        if application.status != next {
            if !application.status.can_transition(next) {
                return Ok(StatusChange::Refused {
                    current: application.status,
                });
            }
            application.status = next;
        }
        Ok(StatusChange::Applied(application.clone()))
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, StorageError> {
        Ok(self.records.lock().expect("lock").get(id).cloned())
    }

    fn list_by_candidate(&self, candidate: &CandidateId) -> Result<Vec<Application>, StorageError> {
        Ok(self
            .records
            .lock()
            .expect("lock")
            .values()
            .filter(|application| &application.candidate_id == candidate)
            .cloned()
            .collect())
    }

    fn count_by_job(&self, job: &JobId) -> Result<u64, StorageError> {
        Ok(self
            .records
            .lock()
            .expect("lock")
            .values()
            .filter(|application| &application.job_id == job)
            .count() as u64)
    }
}

/// Primary store that refuses every write, for propagation tests.
pub(super) struct UnavailableApplications;

impl ApplicationRepository for UnavailableApplications {
    fn insert(&self, _application: Application) -> Result<Application, StorageError> {
        Err(StorageError::Unavailable("primary store down".to_string()))
    }

    fn update_status(
        &self,
        _id: &ApplicationId,
        _next: ApplicationStatus,
    ) -> Result<StatusChange, StorageError> {
        Err(StorageError::Unavailable("primary store down".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<Application>, StorageError> {
        Err(StorageError::Unavailable("primary store down".to_string()))
    }

    fn list_by_candidate(
        &self,
        _candidate: &CandidateId,
    ) -> Result<Vec<Application>, StorageError> {
        Err(StorageError::Unavailable("primary store down".to_string()))
    }

    fn count_by_job(&self, _job: &JobId) -> Result<u64, StorageError> {
        Err(StorageError::Unavailable("primary store down".to_string()))
    }
}

/// Mirror that fails the first `fail_first` writes, then recovers. Models
/// the tolerated-drift scenario.
#[derive(Default)]
pub(super) struct FlakyMirror {
    rows: Mutex<Vec<MirrorEntry>>,
    fail_first: AtomicUsize,
    attempts: AtomicUsize,
}

impl FlakyMirror {
    pub(super) fn failing_first(failures: usize) -> Self {
        Self {
            fail_first: AtomicUsize::new(failures),
            ..Self::default()
        }
    }
}

impl StatsMirror for FlakyMirror {
    fn record_application(&self, entry: MirrorEntry) -> Result<(), StorageError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.fail_first.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("mirror store down".to_string()));
        }
        self.rows.lock().expect("lock").push(entry);
        Ok(())
    }

    fn count_all(&self) -> Result<u64, StorageError> {
        Ok(self.rows.lock().expect("lock").len() as u64)
    }
}

#[derive(Default)]
pub(super) struct RecordingNotifier {
    messages: Mutex<Vec<NotificationMessage>>,
}

impl RecordingNotifier {
    pub(super) fn messages(&self) -> Vec<NotificationMessage> {
        self.messages.lock().expect("lock").clone()
    }
}

impl AdminNotifier for RecordingNotifier {
    fn notify(&self, message: &NotificationMessage) -> Result<(), DeliveryError> {
        self.messages.lock().expect("lock").push(message.clone());
        Ok(())
    }
}

/// Notifier whose transport is down, e.g. a timed-out chat API.
pub(super) struct FailingNotifier;

impl AdminNotifier for FailingNotifier {
    fn notify(&self, _message: &NotificationMessage) -> Result<(), DeliveryError> {
        Err(DeliveryError::Transport("connect timeout".to_string()))
    }
}

pub(super) fn architect_job(id: &str) -> Job {
    Job {
        id: JobId(id.to_string()),
        title: "Architect".to_string(),
        company: "Acme".to_string(),
        location: "Remote".to_string(),
        salary: None,
        category: Some("design".to_string()),
        description: "Design buildings".to_string(),
        requirements: None,
        posted_at: Utc::now(),
        is_active: true,
        employer_id: EmployerId("emp-1".to_string()),
    }
}

pub(super) fn submission(job_id: &JobId) -> SubmissionRequest {
    SubmissionRequest {
        job_id: job_id.clone(),
        candidate_id: CandidateId("c1".to_string()),
        candidate_name: "Jane Doe".to_string(),
        telegram_handle: Some("@janedoe".to_string()),
        resume_ref: "r1".to_string(),
        cover_letter: None,
    }
}

pub(super) type TestService =
    ApplicationService<MemoryJobs, MemoryApplications, FlakyMirror, RecordingNotifier>;

pub(super) fn build_service() -> (
    TestService,
    Arc<MemoryJobs>,
    Arc<MemoryApplications>,
    Arc<FlakyMirror>,
    Arc<RecordingNotifier>,
    JobId,
) {
    let jobs = Arc::new(MemoryJobs::default());
    let job_id = jobs.seed(architect_job("job-arch-1"));
    let applications = Arc::new(MemoryApplications::default());
    let mirror = Arc::new(FlakyMirror::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let service = ApplicationService::new(
        jobs.clone(),
        applications.clone(),
        mirror.clone(),
        notifier.clone(),
    );
    (service, jobs, applications, mirror, notifier, job_id)
}

pub(super) async fn read_json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is json")
}
