use lobbydeck::types::errors::{
    BackendError, OrchestratorError, SessionError, SettingsError, SurfaceError,
};

#[test]
fn test_backend_error_display() {
    let e = BackendError::Unavailable("connection refused".to_string());
    assert_eq!(e.to_string(), "Backend unavailable: connection refused");

    let e = BackendError::Api("No profiles left".to_string());
    assert_eq!(e.to_string(), "Backend error: No profiles left");

    let e = BackendError::MalformedResponse("missing field".to_string());
    assert_eq!(e.to_string(), "Malformed backend response: missing field");
}

#[test]
fn test_session_error_display() {
    let e = SessionError::Duplicate("alpha".to_string());
    assert_eq!(e.to_string(), "Session already exists: alpha");

    let e = SessionError::NotFound("bravo".to_string());
    assert_eq!(e.to_string(), "Session not found: bravo");
}

#[test]
fn test_surface_error_display() {
    let e = SurfaceError::CreateFailed("no window".to_string());
    assert_eq!(e.to_string(), "Surface creation failed: no window");

    let e = SurfaceError::NavigationFailed("closed".to_string());
    assert_eq!(e.to_string(), "Navigation failed: closed");
}

#[test]
fn test_orchestrator_error_display() {
    let e = OrchestratorError::InvalidBotCount(0);
    assert_eq!(e.to_string(), "Invalid bot count: must be at least 1, got 0");

    let e = OrchestratorError::InsufficientProfiles {
        requested: 5,
        available: 3,
    };
    assert_eq!(
        e.to_string(),
        "Cannot open 5 sessions: only 3 profiles available"
    );
}

#[test]
fn test_orchestrator_error_from_backend() {
    let e: OrchestratorError = BackendError::Api("boom".to_string()).into();
    assert!(matches!(e, OrchestratorError::Backend(_)));
    assert_eq!(e.to_string(), "Backend error: boom");
}

#[test]
fn test_orchestrator_error_from_session() {
    let e: OrchestratorError = SessionError::Duplicate("alpha".to_string()).into();
    assert!(matches!(e, OrchestratorError::Session(_)));
}

#[test]
fn test_settings_error_display() {
    let e = SettingsError::EmptyKey("(!!!)".to_string());
    assert_eq!(e.to_string(), "Label '(!!!)' produces an empty setting key");

    let e: SettingsError = BackendError::Unavailable("down".to_string()).into();
    assert!(e.to_string().starts_with("Settings backend error:"));
}

#[test]
fn test_errors_implement_std_error() {
    fn assert_error<E: std::error::Error>(_e: &E) {}
    assert_error(&BackendError::Api("x".to_string()));
    assert_error(&SessionError::NotFound("x".to_string()));
    assert_error(&SurfaceError::TeardownFailed("x".to_string()));
    assert_error(&OrchestratorError::InvalidBotCount(0));
}
