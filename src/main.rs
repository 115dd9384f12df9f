//! LobbyDeck — a desktop control panel for fleets of isolated,
//! identity-scoped browsing sessions.
//!
//! Entry point: opens the panel window and the orchestrator runtime.
//! When built without the `gui` feature, runs a console demo of the
//! session lifecycle against an in-memory backend.

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

#[cfg(feature = "gui")]
fn main() {
    init_tracing();
    lobbydeck::ui::panel_app::run();
}

#[cfg(not(feature = "gui"))]
fn main() {
    init_tracing();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║               LobbyDeck v{} — Demo Mode                   ║", env!("CARGO_PKG_VERSION"));
    println!("║      Session lifecycle against an in-memory backend          ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let runtime = tokio::runtime::Runtime::new().expect("Failed to start tokio runtime");
    runtime.block_on(async {
        demo_setting_keys();
        demo_lifecycle().await;
    });

    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("  ✅ Demo complete. Build with --features gui for the panel.");
    println!("═══════════════════════════════════════════════════════════════");
}

#[cfg(not(feature = "gui"))]
fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  📦 {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

#[cfg(not(feature = "gui"))]
fn demo_setting_keys() {
    use lobbydeck::services::settings::setting_key;
    section("Setting Keys");

    for label in ["Turn Speed (s)", "Hold W Duration", "Anti AFK Interval"] {
        println!("  \"{}\" -> {}", label, setting_key(label));
    }
    println!("  ✓ Setting key derivation OK");
    println!();
}

#[cfg(not(feature = "gui"))]
mod demo_support {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use lobbydeck::backend::client::{LobbyBackend, OpenGrant};
    use lobbydeck::types::backend::{ProfilesResponse, StatusResponse};
    use lobbydeck::types::errors::{BackendError, SurfaceError};
    use lobbydeck::types::profile::Profile;
    use lobbydeck::surface::{SessionContainer, Surface, SurfaceBinding, SurfaceFactory};

    /// In-memory backend handing out numbered demo profiles.
    pub struct DemoBackend;

    #[async_trait]
    impl LobbyBackend for DemoBackend {
        async fn status(&self) -> Result<StatusResponse, BackendError> {
            Ok(StatusResponse {
                status: "running".to_string(),
            })
        }

        async fn profiles(&self) -> Result<ProfilesResponse, BackendError> {
            Ok(ProfilesResponse {
                count: 5,
                profiles: Vec::new(),
            })
        }

        async fn load_config(
            &self,
        ) -> Result<std::collections::HashMap<String, f64>, BackendError> {
            let mut settings = std::collections::HashMap::new();
            settings.insert("turn_speed_s".to_string(), 1.5);
            settings.insert("anti_afk_interval".to_string(), 30.0);
            Ok(settings)
        }

        async fn save_config(
            &self,
            _settings: &std::collections::HashMap<String, f64>,
        ) -> Result<(), BackendError> {
            Ok(())
        }

        async fn open_sessions(&self, count: u32) -> Result<OpenGrant, BackendError> {
            let profiles = (1..=count)
                .map(|i| Profile {
                    name: format!("demo{}", i),
                    display_name: Some(format!("Demo {}", i)),
                })
                .collect();
            Ok(OpenGrant {
                profiles,
                base_url: None,
            })
        }

        async fn launch_url(&self) -> Result<String, BackendError> {
            Ok("https://example.com/play/demo-target".to_string())
        }

        async fn close_sessions(&self) -> Result<(), BackendError> {
            Ok(())
        }

        async fn controller_connect(&self) -> Result<(), BackendError> {
            Ok(())
        }

        async fn controller_disconnect(&self) -> Result<(), BackendError> {
            Ok(())
        }

        async fn toggle_movement(&self) -> Result<bool, BackendError> {
            Ok(true)
        }

        async fn toggle_anti_afk(&self) -> Result<bool, BackendError> {
            Ok(true)
        }

        async fn select_class(&self) -> Result<(), BackendError> {
            Ok(())
        }
    }

    struct PrintSurface {
        name: String,
        current: Arc<Mutex<String>>,
    }

    impl Surface for PrintSurface {
        fn navigate(&mut self, url: &str) -> Result<(), SurfaceError> {
            *self.current.lock().unwrap() = url.to_string();
            println!("    [{}] navigate -> {}", self.name, url);
            Ok(())
        }

        fn reload(&mut self) -> Result<(), SurfaceError> {
            println!("    [{}] reload", self.name);
            Ok(())
        }
    }

    struct PrintContainer {
        name: String,
    }

    impl SessionContainer for PrintContainer {
        fn remove(&mut self) -> Result<(), SurfaceError> {
            println!("    [{}] container removed", self.name);
            Ok(())
        }
    }

    /// Factory producing console-printing stand-ins for webview surfaces.
    pub struct PrintSurfaceFactory;

    impl SurfaceFactory for PrintSurfaceFactory {
        fn create(
            &mut self,
            profile: &Profile,
            initial_url: &str,
        ) -> Result<SurfaceBinding, SurfaceError> {
            let current = Arc::new(Mutex::new(initial_url.to_string()));
            println!("    [{}] surface created at {}", profile.name, initial_url);
            Ok(SurfaceBinding {
                surface: Box::new(PrintSurface {
                    name: profile.name.clone(),
                    current,
                }),
                container: Box::new(PrintContainer {
                    name: profile.name.clone(),
                }),
            })
        }
    }
}

#[cfg(not(feature = "gui"))]
async fn demo_lifecycle() {
    use std::sync::Arc;

    use lobbydeck::app::App;
    use lobbydeck::lobby::pacing::NoopPacer;
    use lobbydeck::services::activity_log::SharedLog;

    use crate::demo_support::{DemoBackend, PrintSurfaceFactory};

    section("Session Lifecycle");

    let log = SharedLog::new();
    let (signal_tx, _signal_rx) = tokio::sync::mpsc::unbounded_channel();
    let mut app = App::new(
        Arc::new(DemoBackend),
        Box::new(PrintSurfaceFactory),
        Arc::new(NoopPacer),
        signal_tx,
        None,
        log.clone(),
    );

    app.startup().await;
    println!("  {}", app.profiles.counter_text());

    app.orchestrator.open(3).await.expect("open failed");
    let view = app.orchestrator.view();
    println!(
        "  Opened {} sessions, primary button: \"{}\"",
        view.active_count, view.primary_button_label
    );

    app.orchestrator.launch().await.expect("launch failed");

    app.orchestrator.close("demo2");
    println!("  Closed demo2, {} remaining", app.orchestrator.view().active_count);

    app.orchestrator.close_all().await;
    let view = app.orchestrator.view();
    println!(
        "  Closed all: empty_state={}, primary button: \"{}\"",
        view.empty_state_visible, view.primary_button_label
    );

    println!("  Activity log entries: {}", log.snapshot().len());
    println!("  ✓ Lifecycle OK");
    println!();
}
