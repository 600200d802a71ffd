//! Application lifecycle: submission intake, review status transitions, and
//! the fan-out to the stats mirror and the admin notification channel.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationId, ApplicationStatus, ApplicationView, CandidateId, SubmissionRequest,
};
pub use repository::{ApplicationRepository, StatusChange};
pub use router::application_router;
pub use service::{ApplicationService, ApplicationServiceError};
