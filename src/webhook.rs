//! Outbound push of a report bundle to an automation webhook.
//!
//! Delivery is best-effort: the request runs with a bounded timeout and
//! every failure — connection, timeout, serialization — comes back as a
//! value. Nothing here retries and nothing here can take the caller down.

use std::time::Duration;

use serde::Serialize;

/// Response bodies are echoed back truncated to this many characters.
pub const RESPONSE_SNIPPET_LIMIT: usize = 500;

/// Outcome of one delivery attempt.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryReport {
    pub success: bool,
    pub status: Option<u16>,
    pub response_snippet: Option<String>,
    pub error: Option<String>,
}

impl DeliveryReport {
    fn failure(message: String) -> Self {
        Self {
            success: false,
            status: None,
            response_snippet: None,
            error: Some(message),
        }
    }
}

/// POST the payload as JSON to `url`, waiting at most `timeout`.
///
/// A reachable endpoint yields success with the response status whatever
/// its code; only transport-level failures mark the report unsuccessful.
pub fn deliver<T: Serialize>(url: &str, payload: &T, timeout: Duration) -> DeliveryReport {
    let client = match reqwest::blocking::Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(err) => return DeliveryReport::failure(err.to_string()),
    };

    match client.post(url).json(payload).send() {
        Ok(response) => {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            let snippet = if body.is_empty() {
                None
            } else {
                Some(body.chars().take(RESPONSE_SNIPPET_LIMIT).collect())
            };
            DeliveryReport {
                success: true,
                status: Some(status),
                response_snippet: snippet,
                error: None,
            }
        }
        Err(err) => DeliveryReport::failure(err.to_string()),
    }
}
