use std::fmt;

// === BackendError ===

/// Errors related to the local backend REST API.
#[derive(Debug)]
pub enum BackendError {
    /// The backend could not be reached at all.
    Unavailable(String),
    /// The backend answered with a non-success status or `success: false`.
    Api(String),
    /// The response body did not match the expected shape.
    MalformedResponse(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Unavailable(msg) => write!(f, "Backend unavailable: {}", msg),
            BackendError::Api(msg) => write!(f, "Backend error: {}", msg),
            BackendError::MalformedResponse(msg) => {
                write!(f, "Malformed backend response: {}", msg)
            }
        }
    }
}

impl std::error::Error for BackendError {}

// === SessionError ===

/// Errors related to the session registry.
#[derive(Debug)]
pub enum SessionError {
    /// A session with the given name is already registered.
    Duplicate(String),
    /// No session with the given name is registered.
    NotFound(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Duplicate(name) => write!(f, "Session already exists: {}", name),
            SessionError::NotFound(name) => write!(f, "Session not found: {}", name),
        }
    }
}

impl std::error::Error for SessionError {}

// === SurfaceError ===

/// Errors related to browsing surface construction and navigation.
#[derive(Debug)]
pub enum SurfaceError {
    /// The surface could not be created.
    CreateFailed(String),
    /// A navigation command could not be issued.
    NavigationFailed(String),
    /// The surface's on-screen container could not be torn down.
    TeardownFailed(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::CreateFailed(msg) => write!(f, "Surface creation failed: {}", msg),
            SurfaceError::NavigationFailed(msg) => write!(f, "Navigation failed: {}", msg),
            SurfaceError::TeardownFailed(msg) => write!(f, "Surface teardown failed: {}", msg),
        }
    }
}

impl std::error::Error for SurfaceError {}

// === OrchestratorError ===

/// Errors surfaced by batch session operations.
#[derive(Debug)]
pub enum OrchestratorError {
    /// The requested session count is below 1.
    InvalidBotCount(u32),
    /// More sessions requested than identity profiles are available.
    InsufficientProfiles { requested: u32, available: u32 },
    /// The backend rejected or failed the request.
    Backend(BackendError),
    /// A registry operation failed.
    Session(SessionError),
    /// A surface could not be created.
    Surface(SurfaceError),
}

impl fmt::Display for OrchestratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrchestratorError::InvalidBotCount(count) => {
                write!(f, "Invalid bot count: must be at least 1, got {}", count)
            }
            OrchestratorError::InsufficientProfiles {
                requested,
                available,
            } => write!(
                f,
                "Cannot open {} sessions: only {} profiles available",
                requested, available
            ),
            OrchestratorError::Backend(e) => write!(f, "{}", e),
            OrchestratorError::Session(e) => write!(f, "{}", e),
            OrchestratorError::Surface(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for OrchestratorError {}

impl From<BackendError> for OrchestratorError {
    fn from(e: BackendError) -> Self {
        OrchestratorError::Backend(e)
    }
}

impl From<SessionError> for OrchestratorError {
    fn from(e: SessionError) -> Self {
        OrchestratorError::Session(e)
    }
}

impl From<SurfaceError> for OrchestratorError {
    fn from(e: SurfaceError) -> Self {
        OrchestratorError::Surface(e)
    }
}

// === SettingsError ===

/// Errors related to the backend-persisted settings map.
#[derive(Debug)]
pub enum SettingsError {
    /// Loading or saving through the backend failed.
    Backend(BackendError),
    /// The derived setting key is empty (label contained no word characters).
    EmptyKey(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Backend(e) => write!(f, "Settings backend error: {}", e),
            SettingsError::EmptyKey(label) => {
                write!(f, "Label '{}' produces an empty setting key", label)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<BackendError> for SettingsError {
    fn from(e: BackendError) -> Self {
        SettingsError::Backend(e)
    }
}

// === SupervisorError ===

/// Errors related to the backend process supervisor.
#[derive(Debug)]
pub enum SupervisorError {
    /// The backend process could not be spawned.
    SpawnFailed(String),
    /// The backend process could not be stopped.
    StopFailed(String),
}

impl fmt::Display for SupervisorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupervisorError::SpawnFailed(msg) => {
                write!(f, "Failed to spawn backend process: {}", msg)
            }
            SupervisorError::StopFailed(msg) => {
                write!(f, "Failed to stop backend process: {}", msg)
            }
        }
    }
}

impl std::error::Error for SupervisorError {}
