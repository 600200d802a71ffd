//! Admin-side helpers: the operator capability check and the stats reply.
//!
//! The gate is an explicit pre-condition evaluated by the caller layer (HTTP
//! route, bot command) before the mirror read runs; the core services know
//! nothing about operators.

use crate::config::AdminConfig;
use crate::stats::StatsMirror;
use crate::storage::StorageError;

/// Capability check for admin-only commands. Permits exactly the configured
/// operator; with no operator configured every actor is refused.
#[derive(Debug, Clone)]
pub struct OperatorGate {
    operator_id: Option<String>,
}

impl OperatorGate {
    pub fn from_config(config: &AdminConfig) -> Self {
        Self {
            operator_id: config.operator_id.clone(),
        }
    }

    pub fn permits(&self, actor: &str) -> bool {
        self.operator_id
            .as_deref()
            .is_some_and(|operator| operator == actor)
    }
}

/// Text reply for the admin stats command, matching the chat-bot rendering.
pub fn stats_summary<M: StatsMirror + ?Sized>(mirror: &M) -> Result<String, StorageError> {
    let count = mirror.count_all()?;
    Ok(format!(
        "\u{1F4CA} <b>Board statistics</b>\nTotal applications: {count}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::MirrorEntry;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FixedMirror {
        rows: Mutex<Vec<MirrorEntry>>,
    }

    impl StatsMirror for FixedMirror {
        fn record_application(&self, entry: MirrorEntry) -> Result<(), StorageError> {
            self.rows.lock().expect("mirror mutex poisoned").push(entry);
            Ok(())
        }

        fn count_all(&self) -> Result<u64, StorageError> {
            Ok(self.rows.lock().expect("mirror mutex poisoned").len() as u64)
        }
    }

    #[test]
    fn gate_permits_only_the_configured_operator() {
        let gate = OperatorGate::from_config(&AdminConfig {
            operator_id: Some("6237727606".to_string()),
        });
        assert!(gate.permits("6237727606"));
        assert!(!gate.permits("12345"));

        let closed = OperatorGate::from_config(&AdminConfig { operator_id: None });
        assert!(!closed.permits("6237727606"));
    }

    #[test]
    fn stats_summary_renders_the_mirror_count() {
        let mirror = FixedMirror::default();
        mirror
            .record_application(MirrorEntry {
                job_title: "Architect".to_string(),
                candidate_name: "Jane Doe".to_string(),
                telegram_handle: None,
                applied_at: chrono::Utc::now(),
            })
            .expect("mirror write");

        let reply = stats_summary(&mirror).expect("summary renders");
        assert!(reply.contains("Total applications: 1"));
    }
}
