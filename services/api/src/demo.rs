use crate::infra::{InMemoryApplicationRepository, InMemoryJobRepository, InMemoryStatsMirror};
use clap::Args;
use std::sync::Arc;

use jobboard::admin::stats_summary;
use jobboard::applications::{
    ApplicationService, ApplicationStatus, CandidateId, SubmissionRequest,
};
use jobboard::catalog::{EmployerId, JobCatalog, JobDraft};
use jobboard::error::AppError;
use jobboard::notify::{AdminNotifier, DeliveryError, NotificationMessage};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Number of candidate submissions to generate against the first job.
    #[arg(long, default_value_t = 3)]
    pub(crate) submissions: u32,
    /// Skip the review transitions at the end of the demo.
    #[arg(long)]
    pub(crate) skip_review: bool,
}

/// Console notifier standing in for the Telegram channel during demos.
struct ConsoleNotifier;

impl AdminNotifier for ConsoleNotifier {
    fn notify(&self, message: &NotificationMessage) -> Result<(), DeliveryError> {
        println!("[notify admin] {}", message.text.replace('\n', " | "));
        Ok(())
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        submissions,
        skip_review,
    } = args;

    println!("Job board demo");

    let jobs = Arc::new(InMemoryJobRepository::default());
    let applications = Arc::new(InMemoryApplicationRepository::default());
    let mirror = Arc::new(InMemoryStatsMirror::default());
    let catalog = JobCatalog::new(jobs.clone());
    let service = ApplicationService::new(jobs, applications, mirror.clone(), Arc::new(ConsoleNotifier));

    let employer = EmployerId("emp-demo".to_string());
    let architect = catalog
        .post_job(
            employer.clone(),
            JobDraft {
                title: "Architect".to_string(),
                company: "Acme".to_string(),
                location: "Remote".to_string(),
                salary: Some("$120k".to_string()),
                category: Some("design".to_string()),
                description: "Design buildings".to_string(),
                requirements: Some("Portfolio, 5 years experience".to_string()),
            },
        )
        .map_err(demo_error)?;
    let engineer = catalog
        .post_job(
            employer.clone(),
            JobDraft {
                title: "Site Engineer".to_string(),
                company: "Acme".to_string(),
                location: "Des Moines".to_string(),
                salary: None,
                category: Some("engineering".to_string()),
                description: "Keep the site running".to_string(),
                requirements: None,
            },
        )
        .map_err(demo_error)?;

    println!("\nActive listings:");
    for job in catalog.list_active(None).map_err(demo_error)? {
        println!("  {} — {} at {} ({})", job.id, job.title, job.company, job.location);
    }

    let mut first_application = None;
    for i in 1..=submissions {
        let stored = service
            .submit(SubmissionRequest {
                job_id: architect.id.clone(),
                candidate_id: CandidateId(format!("c{i}")),
                candidate_name: format!("Candidate {i}"),
                telegram_handle: Some(format!("@candidate{i}")),
                resume_ref: format!("resume-{i}.pdf"),
                cover_letter: None,
            })
            .map_err(demo_error)?;
        first_application.get_or_insert(stored.id);
    }

    // A closed listing still accepts submissions at this layer.
    catalog.deactivate(&engineer.id, &employer).map_err(demo_error)?;
    service
        .submit(SubmissionRequest {
            job_id: engineer.id.clone(),
            candidate_id: CandidateId("c-late".to_string()),
            candidate_name: "Late Candidate".to_string(),
            telegram_handle: None,
            resume_ref: "resume-late.pdf".to_string(),
            cover_letter: None,
        })
        .map_err(demo_error)?;
    println!(
        "\nSubmitted {} applications ({} against the closed listing)",
        submissions + 1,
        1
    );

    if !skip_review {
        if let Some(id) = first_application {
            service
                .update_status(&id, ApplicationStatus::Reviewing)
                .map_err(demo_error)?;
            let accepted = service
                .update_status(&id, ApplicationStatus::Accepted)
                .map_err(demo_error)?;
            println!("Reviewed {}: {}", accepted.id, accepted.status.label());
        }
    }

    println!("\n{}", stats_summary(mirror.as_ref()).map_err(demo_error)?);
    Ok(())
}

fn demo_error(err: impl std::fmt::Display) -> AppError {
    AppError::Io(std::io::Error::other(err.to_string()))
}
