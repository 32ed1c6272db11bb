//! Fire-and-forget webhook notification
//!
//! Posts the assembled record as JSON to a configured hook URL. The contract
//! is deliberate: callers never observe success or failure. Every error,
//! from client construction to the HTTP round trip, stops at this boundary
//! with at most a log line. The pipeline result must never depend on it.

use std::time::Duration;

use tracing::{debug, warn};

use crate::models::AssessmentRecord;

const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(5);

pub struct WebhookNotifier {
    url: String,
    client: Option<reqwest::blocking::Client>,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(WEBHOOK_TIMEOUT)
            .build();
        let client = match client {
            Ok(client) => Some(client),
            Err(err) => {
                warn!(error = %err, "webhook client unavailable, notifications disabled");
                None
            }
        };
        Self {
            url: url.into(),
            client,
        }
    }

    /// Best-effort POST of the record. Never returns an error.
    pub fn notify(&self, record: &AssessmentRecord) {
        let Some(client) = &self.client else {
            return;
        };
        match client.post(&self.url).json(record).send() {
            Ok(response) => {
                debug!(status = %response.status(), "webhook delivered");
            }
            Err(err) => {
                warn!(error = %err, "webhook delivery failed, ignoring");
            }
        }
    }
}
