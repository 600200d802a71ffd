use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use jobboard::applications::{
    Application, ApplicationId, ApplicationRepository, ApplicationStatus, CandidateId, StatusChange,
};
use jobboard::catalog::{Job, JobId, JobRepository};
use jobboard::stats::{MirrorEntry, StatsMirror};
use jobboard::storage::StorageError;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Primary store for job listings. Insertion order is kept so listings come
/// back in posting order.
#[derive(Default, Clone)]
pub(crate) struct InMemoryJobRepository {
    order: Arc<Mutex<Vec<JobId>>>,
    records: Arc<Mutex<HashMap<JobId, Job>>>,
}

impl JobRepository for InMemoryJobRepository {
    fn insert(&self, job: Job) -> Result<Job, StorageError> {
        let mut records = self.records.lock().expect("job mutex poisoned");
        if records.contains_key(&job.id) {
            return Err(StorageError::Conflict);
        }
        self.order
            .lock()
            .expect("job mutex poisoned")
            .push(job.id.clone());
        records.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    fn update(&self, job: Job) -> Result<(), StorageError> {
        let mut records = self.records.lock().expect("job mutex poisoned");
        if !records.contains_key(&job.id) {
            return Err(StorageError::NotFound);
        }
        records.insert(job.id.clone(), job);
        Ok(())
    }

    fn fetch(&self, id: &JobId) -> Result<Option<Job>, StorageError> {
        let records = self.records.lock().expect("job mutex poisoned");
        Ok(records.get(id).cloned())
    }

    fn list_active(&self) -> Result<Vec<Job>, StorageError> {
        let order = self.order.lock().expect("job mutex poisoned");
        let records = self.records.lock().expect("job mutex poisoned");
        Ok(order
            .iter()
            .filter_map(|id| records.get(id))
            .filter(|job| job.is_active)
            .cloned()
            .collect())
    }
}

/// Primary store for application records.
#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<HashMap<ApplicationId, Application>>>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, application: Application) -> Result<Application, StorageError> {
        let mut records = self.records.lock().expect("application mutex poisoned");
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
        // One lock acquisition covers the read, the reachability check, and
        // the write, so concurrent reviewer requests serialize here.
        let mut records = self.records.lock().expect("application mutex poisoned");
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
        let records = self.records.lock().expect("application mutex poisoned");
        Ok(records.get(id).cloned())
    }

    fn list_by_candidate(&self, candidate: &CandidateId) -> Result<Vec<Application>, StorageError> {
        let records = self.records.lock().expect("application mutex poisoned");
        Ok(records
            .values()
            .filter(|application| &application.candidate_id == candidate)
            .cloned()
            .collect())
    }

    fn count_by_job(&self, job: &JobId) -> Result<u64, StorageError> {
        let records = self.records.lock().expect("application mutex poisoned");
        Ok(records
            .values()
            .filter(|application| &application.job_id == job)
            .count() as u64)
    }
}

/// Secondary, schema-independent store behind the admin stats command. Kept
/// separate from the application repository on purpose.
#[derive(Default, Clone)]
pub(crate) struct InMemoryStatsMirror {
    rows: Arc<Mutex<Vec<MirrorEntry>>>,
}

impl StatsMirror for InMemoryStatsMirror {
    fn record_application(&self, entry: MirrorEntry) -> Result<(), StorageError> {
        self.rows.lock().expect("mirror mutex poisoned").push(entry);
        Ok(())
    }

    fn count_all(&self) -> Result<u64, StorageError> {
        Ok(self.rows.lock().expect("mirror mutex poisoned").len() as u64)
    }
}
