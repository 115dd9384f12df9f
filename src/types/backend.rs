//! Wire types for the local backend REST API.
//!
//! Every mutating endpoint answers `{success, ...}` and carries an optional
//! `error` message; the client maps `success: false` to `BackendError::Api`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::profile::Profile;

/// `GET /api/status`
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

/// `GET /api/profiles`
#[derive(Debug, Clone, Deserialize)]
pub struct ProfilesResponse {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub profiles: Vec<Profile>,
}

/// `GET /api/config`
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigResponse {
    #[serde(default)]
    pub settings: HashMap<String, f64>,
}

/// `POST /api/config` request body. The full map is always transmitted;
/// there are no partial-save semantics.
#[derive(Debug, Clone, Serialize)]
pub struct SaveConfigRequest {
    pub settings: HashMap<String, f64>,
}

/// `POST /api/browser/open` request body.
#[derive(Debug, Clone, Serialize)]
pub struct OpenSessionsRequest {
    pub count: u32,
}

/// `POST /api/browser/open`
#[derive(Debug, Clone, Deserialize)]
pub struct OpenSessionsResponse {
    pub success: bool,
    #[serde(default)]
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `POST /api/browser/launch`
#[derive(Debug, Clone, Deserialize)]
pub struct LaunchResponse {
    pub success: bool,
    #[serde(default)]
    pub launch_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `POST /api/movement/toggle` and `POST /api/anti-afk/toggle`
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleResponse {
    pub success: bool,
    #[serde(default)]
    pub running: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Shape shared by the remaining mutating endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AckResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}
