use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for job listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier for the employer account owning a listing. The employer record
/// itself lives outside this crate; only the key is carried.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployerId(pub String);

impl std::fmt::Display for EmployerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A published job listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: Option<String>,
    pub category: Option<String>,
    pub description: String,
    /// Unstructured requirements text; by convention one requirement per line
    /// or comma-separated.
    pub requirements: Option<String>,
    pub posted_at: DateTime<Utc>,
    pub is_active: bool,
    pub employer_id: EmployerId,
}

impl Job {
    /// Splits the free-form requirements text into individual entries.
    pub fn requirement_list(&self) -> Vec<&str> {
        self.requirements
            .as_deref()
            .map(|raw| {
                raw.split(|c| c == '\n' || c == ',')
                    .map(str::trim)
                    .filter(|entry| !entry.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Caller-supplied fields for a new listing. The id, timestamp, and active
/// flag are assigned server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDraft {
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub description: String,
    #[serde(default)]
    pub requirements: Option<String>,
}

/// Optional narrowing applied on top of the active listing sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFilter {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
}

impl JobFilter {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.location.is_none() && self.query.is_none()
    }

    /// Case-insensitive match: exact category, location substring, and
    /// free-text search over title, company, and description.
    pub fn matches(&self, job: &Job) -> bool {
        if let Some(category) = &self.category {
            let matched = job
                .category
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(category));
            if !matched {
                return false;
            }
        }

        if let Some(location) = &self.location {
            if !contains_ignore_case(&job.location, location) {
                return false;
            }
        }

        if let Some(query) = &self.query {
            let hit = contains_ignore_case(&job.title, query)
                || contains_ignore_case(&job.company, query)
                || contains_ignore_case(&job.description, query);
            if !hit {
                return false;
            }
        }

        true
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Serialized listing shape returned by the HTTP surface.
#[derive(Debug, Clone, Serialize)]
pub struct JobView {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub description: String,
    pub requirements: Vec<String>,
    pub posted_at: DateTime<Utc>,
    pub is_active: bool,
}

impl From<&Job> for JobView {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id.clone(),
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            salary: job.salary.clone(),
            category: job.category.clone(),
            description: job.description.clone(),
            requirements: job
                .requirement_list()
                .into_iter()
                .map(str::to_string)
                .collect(),
            posted_at: job.posted_at,
            is_active: job.is_active,
        }
    }
}
