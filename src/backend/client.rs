//! Typed client for the local backend REST API.
//!
//! All requests go to `http://localhost:8080` by default. Transport
//! failures map to `BackendError::Unavailable`, non-success HTTP statuses
//! and `success: false` bodies to `BackendError::Api` with the backend's
//! `error` message when one is present.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::backend::{
    AckResponse, ConfigResponse, LaunchResponse, OpenSessionsRequest, OpenSessionsResponse,
    ProfilesResponse, SaveConfigRequest, StatusResponse, ToggleResponse,
};
use crate::types::errors::BackendError;
use crate::types::profile::Profile;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Result of a successful `/api/browser/open` allocation.
#[derive(Debug, Clone)]
pub struct OpenGrant {
    pub profiles: Vec<Profile>,
    pub base_url: Option<String>,
}

/// Backend operations the control panel depends on.
///
/// Implemented by `HttpBackendClient` in production and by in-memory fakes
/// in tests.
#[async_trait]
pub trait LobbyBackend: Send + Sync {
    async fn status(&self) -> Result<StatusResponse, BackendError>;
    async fn profiles(&self) -> Result<ProfilesResponse, BackendError>;
    async fn load_config(&self) -> Result<HashMap<String, f64>, BackendError>;
    async fn save_config(&self, settings: &HashMap<String, f64>) -> Result<(), BackendError>;
    async fn open_sessions(&self, count: u32) -> Result<OpenGrant, BackendError>;
    async fn launch_url(&self) -> Result<String, BackendError>;
    async fn close_sessions(&self) -> Result<(), BackendError>;
    async fn controller_connect(&self) -> Result<(), BackendError>;
    async fn controller_disconnect(&self) -> Result<(), BackendError>;
    async fn toggle_movement(&self) -> Result<bool, BackendError>;
    async fn toggle_anti_afk(&self) -> Result<bool, BackendError>;
    async fn select_class(&self) -> Result<(), BackendError>;
}

/// `LobbyBackend` over HTTP via `reqwest`.
pub struct HttpBackendClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpBackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    pub fn localhost() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        let status = response.status();
        if !status.is_success() {
            // The backend puts the message in the body's `error` field.
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(BackendError::Api(message));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::MalformedResponse(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;
        Self::decode(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, BackendError> {
        let mut request = self.http.post(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;
        Self::decode(response).await
    }

    async fn post_ack(&self, path: &str) -> Result<(), BackendError> {
        let ack: AckResponse = self.post::<_, ()>(path, None).await?;
        require_success(ack.success, ack.error)
    }
}

fn require_success(success: bool, error: Option<String>) -> Result<(), BackendError> {
    if success {
        Ok(())
    } else {
        Err(BackendError::Api(
            error.unwrap_or_else(|| "Unknown error".to_string()),
        ))
    }
}

#[async_trait]
impl LobbyBackend for HttpBackendClient {
    async fn status(&self) -> Result<StatusResponse, BackendError> {
        self.get("/api/status").await
    }

    async fn profiles(&self) -> Result<ProfilesResponse, BackendError> {
        self.get("/api/profiles").await
    }

    async fn load_config(&self) -> Result<HashMap<String, f64>, BackendError> {
        let config: ConfigResponse = self.get("/api/config").await?;
        Ok(config.settings)
    }

    async fn save_config(&self, settings: &HashMap<String, f64>) -> Result<(), BackendError> {
        let body = SaveConfigRequest {
            settings: settings.clone(),
        };
        let ack: AckResponse = self.post("/api/config", Some(&body)).await?;
        require_success(ack.success, ack.error)
    }

    async fn open_sessions(&self, count: u32) -> Result<OpenGrant, BackendError> {
        let body = OpenSessionsRequest { count };
        let response: OpenSessionsResponse = self.post("/api/browser/open", Some(&body)).await?;
        require_success(response.success, response.error)?;
        Ok(OpenGrant {
            profiles: response.profiles,
            base_url: response.base_url,
        })
    }

    async fn launch_url(&self) -> Result<String, BackendError> {
        let response: LaunchResponse = self.post::<_, ()>("/api/browser/launch", None).await?;
        require_success(response.success, response.error)?;
        response
            .launch_url
            .ok_or_else(|| BackendError::MalformedResponse("missing launch_url".to_string()))
    }

    async fn close_sessions(&self) -> Result<(), BackendError> {
        self.post_ack("/api/browser/close").await
    }

    async fn controller_connect(&self) -> Result<(), BackendError> {
        self.post_ack("/api/controller/connect").await
    }

    async fn controller_disconnect(&self) -> Result<(), BackendError> {
        self.post_ack("/api/controller/disconnect").await
    }

    async fn toggle_movement(&self) -> Result<bool, BackendError> {
        let response: ToggleResponse = self.post::<_, ()>("/api/movement/toggle", None).await?;
        require_success(response.success, response.error)?;
        Ok(response.running)
    }

    async fn toggle_anti_afk(&self) -> Result<bool, BackendError> {
        let response: ToggleResponse = self.post::<_, ()>("/api/anti-afk/toggle", None).await?;
        require_success(response.success, response.error)?;
        Ok(response.running)
    }

    async fn select_class(&self) -> Result<(), BackendError> {
        self.post_ack("/api/class/select").await
    }
}
