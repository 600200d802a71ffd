use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::JobId;

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Candidate identity carried by key only; the account record lives outside
/// this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

impl std::fmt::Display for CandidateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Review status of an application.
///
/// `Sent` is the initial state. `Reviewing` is only entered from `Sent`;
/// the terminal states are reachable from `Reviewing` or directly from
/// `Sent` (fast accept/reject). Nothing leaves a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApplicationStatus {
    Sent,
    Reviewing,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Sent => "SENT",
            ApplicationStatus::Reviewing => "REVIEWING",
            ApplicationStatus::Accepted => "ACCEPTED",
            ApplicationStatus::Rejected => "REJECTED",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, ApplicationStatus::Accepted | ApplicationStatus::Rejected)
    }

    /// Whether `next` is reachable from `self` in one reviewer action.
    /// Re-applying the current status is handled upstream as a no-op.
    pub const fn can_transition(self, next: ApplicationStatus) -> bool {
        matches!(
            (self, next),
            (
                ApplicationStatus::Sent,
                ApplicationStatus::Reviewing
                    | ApplicationStatus::Accepted
                    | ApplicationStatus::Rejected,
            ) | (
                ApplicationStatus::Reviewing,
                ApplicationStatus::Accepted | ApplicationStatus::Rejected,
            )
        )
    }
}

/// An application record. Created exactly once per submission and kept
/// forever for audit; terminal states close the review but never delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub candidate_id: CandidateId,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    /// Opaque pointer into whatever stores the resume; never dereferenced
    /// here.
    pub resume_ref: String,
    pub cover_letter: Option<String>,
}

/// Incoming submission payload, validated by the orchestrator before any
/// write happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub job_id: JobId,
    pub candidate_id: CandidateId,
    pub candidate_name: String,
    #[serde(default)]
    pub telegram_handle: Option<String>,
    pub resume_ref: String,
    #[serde(default)]
    pub cover_letter: Option<String>,
}

/// Serialized application shape returned by the HTTP surface.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationView {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub candidate_id: CandidateId,
    pub status: &'static str,
    pub applied_at: DateTime<Utc>,
    pub resume_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
}

impl From<&Application> for ApplicationView {
    fn from(application: &Application) -> Self {
        Self {
            id: application.id.clone(),
            job_id: application.job_id.clone(),
            candidate_id: application.candidate_id.clone(),
            status: application.status.label(),
            applied_at: application.applied_at,
            resume_ref: application.resume_ref.clone(),
            cover_letter: application.cover_letter.clone(),
        }
    }
}
