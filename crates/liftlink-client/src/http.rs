//! Typed HTTP client for the manifest server endpoints.
//!
//! [`ManifestApi`] is a thin wrapper over [`reqwest`]: one method per
//! endpoint, request/response shapes from `liftlink-models`, no state
//! beyond the base URL. All higher-level behavior (polling, merging,
//! optimistic display) lives in the synchronizer.

use std::time::Duration;

use liftlink_models::{LiftSubmission, StateSnapshot};

use crate::error::ClientError;

/// Per-request timeout. The observed design had none; expiry is treated
/// as an ordinary fetch failure.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Low-level client for the manifest server HTTP API.
#[derive(Clone)]
pub struct ManifestApi {
    http: reqwest::Client,
    base_url: String,
}

impl ManifestApi {
    /// Build a client for the server at `base_url` (e.g.
    /// `http://localhost:8000`). A trailing slash is tolerated.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The server base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/state` — fetch the authoritative state snapshot.
    pub async fn fetch_state(&self) -> Result<StateSnapshot, ClientError> {
        let res = self
            .http
            .get(format!("{}/api/state", self.base_url))
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    /// `POST /api/messages` — send a chat message to the pilot.
    pub async fn send_message(&self, text: &str) -> Result<(), ClientError> {
        self.http
            .post(format!("{}/api/messages", self.base_url))
            .form(&[("text", text)])
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// `POST /api/messages/read` — mark all inbound messages read.
    pub async fn mark_messages_read(&self) -> Result<(), ClientError> {
        self.http
            .post(format!("{}/api/messages/read", self.base_url))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// `POST /api/lift` — submit a lift record.
    pub async fn submit_lift(&self, body: &LiftSubmission) -> Result<(), ClientError> {
        self.http
            .post(format!("{}/api/lift", self.base_url))
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// `GET /api/quick` — fetch the server-side quick-message list.
    pub async fn fetch_quick(&self) -> Result<Vec<String>, ClientError> {
        let res = self
            .http
            .get(format!("{}/api/quick", self.base_url))
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    /// `POST /api/quick/add` — append a quick-message template.
    pub async fn add_quick(&self, text: &str) -> Result<(), ClientError> {
        self.http
            .post(format!("{}/api/quick/add", self.base_url))
            .form(&[("text", text)])
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// `POST /api/quick/remove` — remove a quick-message template by value.
    pub async fn remove_quick(&self, text: &str) -> Result<(), ClientError> {
        self.http
            .post(format!("{}/api/quick/remove", self.base_url))
            .form(&[("text", text)])
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_normalized() {
        let api = ManifestApi::new("http://localhost:8000/").unwrap();
        assert_eq!(api.base_url(), "http://localhost:8000");
    }

    #[test]
    fn bare_host_is_kept() {
        let api = ManifestApi::new("http://127.0.0.1:9").unwrap();
        assert_eq!(api.base_url(), "http://127.0.0.1:9");
    }
}
