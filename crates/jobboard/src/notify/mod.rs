//! Best-effort admin notification channel.
//!
//! One message per submission event goes to a single fixed recipient. The
//! gateway is fire-and-forget: delivery runs on a detached task with a
//! bounded timeout and any failure is logged, never surfaced to the
//! submission path.

use std::time::Duration;

use serde_json::json;
use tracing::{debug, warn};

use crate::config::NotifierConfig;

/// Rendered notification text. Ephemeral; built once per event and not
/// persisted anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub text: String,
}

impl NotificationMessage {
    /// Message sent to the admin when a candidate submits an application.
    /// Light HTML markup, rendered by the receiving chat client.
    pub fn submission(candidate_name: &str, job_title: &str) -> Self {
        Self {
            text: format!(
                "\u{1F680} <b>New application!</b>\nCandidate: {candidate_name}\nJob: {job_title}"
            ),
        }
    }
}

/// Outbound alert seam. Implementations must not block the caller on slow
/// transports; returning `Err` is allowed and the orchestrator will log and
/// continue.
pub trait AdminNotifier: Send + Sync {
    fn notify(&self, message: &NotificationMessage) -> Result<(), DeliveryError>;
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Telegram `sendMessage` gateway.
///
/// Delivery happens on a spawned tokio task that the submission path never
/// awaits; non-2xx responses, transport errors, and timeouts are logged
/// inside the task. `notify` therefore expects to run inside a tokio
/// runtime; without one the message is dropped with a warning instead of
/// panicking. With missing credentials the gateway stays disabled and only
/// logs at debug level.
pub struct TelegramNotifier {
    client: reqwest::Client,
    config: NotifierConfig,
}

impl TelegramNotifier {
    pub fn from_config(config: NotifierConfig) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| DeliveryError::Transport(err.to_string()))?;
        Ok(Self { client, config })
    }
}

impl AdminNotifier for TelegramNotifier {
    fn notify(&self, message: &NotificationMessage) -> Result<(), DeliveryError> {
        let (Some(token), Some(chat_id)) = (
            self.config.bot_token.as_deref(),
            self.config.admin_chat_id.as_deref(),
        ) else {
            debug!("telegram notifier not configured, dropping message");
            return Ok(());
        };

        let url = format!("{}/bot{token}/sendMessage", self.config.api_base);
        let payload = json!({
            "chat_id": chat_id,
            "text": message.text,
            "parse_mode": "HTML",
        });
        let client = self.client.clone();

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("no tokio runtime available, dropping admin notification");
            return Ok(());
        };
        handle.spawn(async move {
            match client.post(&url).json(&payload).send().await {
                Ok(response) if response.status().is_success() => {}
                Ok(response) => {
                    warn!(status = %response.status(), "telegram rejected the admin notification");
                }
                Err(err) => {
                    warn!(%err, "failed to deliver admin notification");
                }
            }
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_message_carries_candidate_and_job() {
        let message = NotificationMessage::submission("Jane Doe", "Architect");
        assert!(message.text.contains("Jane Doe"));
        assert!(message.text.contains("Architect"));
        assert!(message.text.contains("<b>New application!</b>"));
    }

    #[tokio::test]
    async fn unconfigured_gateway_swallows_messages() {
        let notifier = TelegramNotifier::from_config(NotifierConfig {
            bot_token: None,
            admin_chat_id: None,
            api_base: "https://api.telegram.org".to_string(),
            timeout_ms: 100,
        })
        .expect("client builds");

        let message = NotificationMessage::submission("Jane Doe", "Architect");
        assert!(notifier.notify(&message).is_ok());
    }

    #[test]
    fn notify_outside_a_runtime_drops_instead_of_panicking() {
        let notifier = TelegramNotifier::from_config(NotifierConfig {
            bot_token: Some("123:abc".to_string()),
            admin_chat_id: Some("42".to_string()),
            api_base: "https://api.telegram.org".to_string(),
            timeout_ms: 100,
        })
        .expect("client builds");

        let message = NotificationMessage::submission("Jane Doe", "Architect");
        assert!(notifier.notify(&message).is_ok());
    }

    #[tokio::test]
    async fn unreachable_endpoint_does_not_error_synchronously() {
        let notifier = TelegramNotifier::from_config(NotifierConfig {
            bot_token: Some("123:abc".to_string()),
            admin_chat_id: Some("42".to_string()),
            // Reserved TEST-NET-1 address; the spawned task times out quietly.
            api_base: "http://192.0.2.1:9".to_string(),
            timeout_ms: 50,
        })
        .expect("client builds");

        let message = NotificationMessage::submission("Jane Doe", "Architect");
        assert!(notifier.notify(&message).is_ok());
    }
}
