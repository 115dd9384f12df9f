use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use lobbydeck::backend::client::{LobbyBackend, OpenGrant};
use lobbydeck::services::activity_log::SharedLog;
use lobbydeck::services::automation::AutomationPanel;
use lobbydeck::types::backend::{ProfilesResponse, StatusResponse};
use lobbydeck::types::errors::BackendError;

/// Backend fake covering the controller surface. Toggle calls flip an
/// internal flag and report it back, like the real backend does.
#[derive(Default)]
struct ControllerBackend {
    fail_connect: bool,
    movement_running: AtomicBool,
    anti_afk_running: AtomicBool,
    movement_calls: AtomicUsize,
    anti_afk_calls: AtomicUsize,
    class_calls: AtomicUsize,
}

#[async_trait]
impl LobbyBackend for ControllerBackend {
    async fn status(&self) -> Result<StatusResponse, BackendError> {
        Ok(StatusResponse {
            status: "running".to_string(),
        })
    }

    async fn profiles(&self) -> Result<ProfilesResponse, BackendError> {
        Ok(ProfilesResponse {
            count: 0,
            profiles: Vec::new(),
        })
    }

    async fn load_config(&self) -> Result<HashMap<String, f64>, BackendError> {
        Ok(HashMap::new())
    }

    async fn save_config(&self, _settings: &HashMap<String, f64>) -> Result<(), BackendError> {
        Ok(())
    }

    async fn open_sessions(&self, _count: u32) -> Result<OpenGrant, BackendError> {
        Err(BackendError::Api("unsupported".to_string()))
    }

    async fn launch_url(&self) -> Result<String, BackendError> {
        Err(BackendError::Api("unsupported".to_string()))
    }

    async fn close_sessions(&self) -> Result<(), BackendError> {
        Ok(())
    }

    async fn controller_connect(&self) -> Result<(), BackendError> {
        if self.fail_connect {
            return Err(BackendError::Unavailable("no controller".to_string()));
        }
        Ok(())
    }

    async fn controller_disconnect(&self) -> Result<(), BackendError> {
        Ok(())
    }

    async fn toggle_movement(&self) -> Result<bool, BackendError> {
        self.movement_calls.fetch_add(1, Ordering::SeqCst);
        let running = !self.movement_running.load(Ordering::SeqCst);
        self.movement_running.store(running, Ordering::SeqCst);
        Ok(running)
    }

    async fn toggle_anti_afk(&self) -> Result<bool, BackendError> {
        self.anti_afk_calls.fetch_add(1, Ordering::SeqCst);
        let running = !self.anti_afk_running.load(Ordering::SeqCst);
        self.anti_afk_running.store(running, Ordering::SeqCst);
        Ok(running)
    }

    async fn select_class(&self) -> Result<(), BackendError> {
        self.class_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn panel(backend: &Arc<ControllerBackend>) -> AutomationPanel {
    AutomationPanel::new(backend.clone(), SharedLog::new())
}

#[tokio::test]
async fn test_automation_is_gated_until_connected() {
    let backend = Arc::new(ControllerBackend::default());
    let mut panel = panel(&backend);

    panel.toggle_movement().await.unwrap();
    panel.toggle_anti_afk().await.unwrap();
    panel.select_class().await.unwrap();

    assert_eq!(backend.movement_calls.load(Ordering::SeqCst), 0);
    assert_eq!(backend.anti_afk_calls.load(Ordering::SeqCst), 0);
    assert_eq!(backend.class_calls.load(Ordering::SeqCst), 0);

    let view = panel.view();
    assert_eq!(view.connect_label, "Connect Controller");
    assert!(!view.movement_enabled);
    assert!(!view.anti_afk_enabled);
    assert!(!view.class_select_enabled);
}

#[tokio::test]
async fn test_connect_enables_automation_controls() {
    let backend = Arc::new(ControllerBackend::default());
    let mut panel = panel(&backend);

    panel.toggle_controller().await.unwrap();

    assert!(panel.connected());
    let view = panel.view();
    assert_eq!(view.connect_label, "Disconnect");
    assert!(view.movement_enabled);
    assert!(view.anti_afk_enabled);
    assert!(view.class_select_enabled);
}

#[tokio::test]
async fn test_failed_connect_leaves_panel_disconnected() {
    let backend = Arc::new(ControllerBackend {
        fail_connect: true,
        ..Default::default()
    });
    let mut panel = panel(&backend);

    let result = panel.toggle_controller().await;

    assert!(result.is_err());
    assert!(!panel.connected());
    assert_eq!(panel.view().connect_label, "Connect Controller");
}

#[tokio::test]
async fn test_toggles_mirror_backend_reported_state() {
    let backend = Arc::new(ControllerBackend::default());
    let mut panel = panel(&backend);
    panel.toggle_controller().await.unwrap();

    panel.toggle_movement().await.unwrap();
    assert!(panel.movement_running());
    assert_eq!(panel.view().movement_label, "Stop Movement");

    panel.toggle_movement().await.unwrap();
    assert!(!panel.movement_running());
    assert_eq!(panel.view().movement_label, "Start Movement");

    panel.toggle_anti_afk().await.unwrap();
    assert!(panel.anti_afk_running());
    assert_eq!(panel.view().anti_afk_label, "Stop Anti-AFK");
}

#[tokio::test]
async fn test_disconnect_clears_running_flags() {
    let backend = Arc::new(ControllerBackend::default());
    let mut panel = panel(&backend);
    panel.toggle_controller().await.unwrap();
    panel.toggle_movement().await.unwrap();
    panel.toggle_anti_afk().await.unwrap();

    // Disconnect: the backend stops both loops when the link drops.
    panel.toggle_controller().await.unwrap();

    assert!(!panel.connected());
    assert!(!panel.movement_running());
    assert!(!panel.anti_afk_running());
    let view = panel.view();
    assert_eq!(view.movement_label, "Start Movement");
    assert_eq!(view.anti_afk_label, "Start Anti-AFK");
}

#[tokio::test]
async fn test_select_class_reaches_backend_when_connected() {
    let backend = Arc::new(ControllerBackend::default());
    let mut panel = panel(&backend);
    panel.toggle_controller().await.unwrap();

    panel.select_class().await.unwrap();

    assert_eq!(backend.class_calls.load(Ordering::SeqCst), 1);
}
