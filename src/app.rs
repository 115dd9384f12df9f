//! App core: wires the backend client, the orchestrator and the panel
//! services together and owns the startup sequence.

use std::sync::Arc;

use crate::backend::client::LobbyBackend;
use crate::backend::supervisor::BackendSupervisor;
use crate::lobby::orchestrator::Orchestrator;
use crate::lobby::pacing::Pacer;
use crate::lobby::registry::SessionRegistry;
use crate::services::activity_log::SharedLog;
use crate::services::automation::AutomationPanel;
use crate::services::profile_directory::ProfileDirectory;
use crate::services::settings::SettingsService;
use crate::surface::{SignalSender, SurfaceFactory};

/// Central struct holding the orchestrator and panel services.
pub struct App {
    pub log: SharedLog,
    pub orchestrator: Orchestrator,
    pub profiles: ProfileDirectory,
    pub settings: SettingsService,
    pub automation: AutomationPanel,
    supervisor: Option<BackendSupervisor>,
    backend: Arc<dyn LobbyBackend>,
}

impl App {
    /// Wires up the panel. The surface factory and pacer are injected so
    /// the same core runs under the real UI event loop, the console demo
    /// and the tests. `signals` is the sending side of the surface-event
    /// channel; the orchestrator uses it to requeue its own delayed
    /// retries.
    pub fn new(
        backend: Arc<dyn LobbyBackend>,
        factory: Box<dyn SurfaceFactory>,
        pacer: Arc<dyn Pacer>,
        signals: SignalSender,
        supervisor: Option<BackendSupervisor>,
        log: SharedLog,
    ) -> Self {
        let registry = SessionRegistry::new(log.clone());
        let orchestrator = Orchestrator::new(
            registry,
            backend.clone(),
            factory,
            pacer,
            signals,
            log.clone(),
        );
        let profiles = ProfileDirectory::new(backend.clone(), log.clone());
        let settings = SettingsService::new(backend.clone(), log.clone());
        let automation = AutomationPanel::new(backend.clone(), log.clone());
        Self {
            log,
            orchestrator,
            profiles,
            settings,
            automation,
            supervisor,
            backend,
        }
    }

    /// Startup sequence: verify the backend is reachable (restarting it
    /// once through the supervisor if not), then refresh the profile
    /// count and load the settings map. Every step degrades gracefully;
    /// the panel opens even with the backend down.
    pub async fn startup(&mut self) {
        if self.backend.status().await.is_err() {
            self.log.warning("Backend not responding");
            if let Some(supervisor) = self.supervisor.as_mut() {
                self.log.info("Restarting backend...");
                match supervisor.restart().await {
                    Ok(()) => match self.backend.status().await {
                        Ok(_) => self.log.success("Backend restarted"),
                        Err(e) => self
                            .log
                            .error(format!("Backend still unreachable: {}", e)),
                    },
                    Err(e) => self.log.error(format!("{}", e)),
                }
            }
        } else {
            self.log.info("Backend online");
        }

        let available = self.profiles.refresh().await;
        self.orchestrator.set_available_profiles(available);

        if let Err(e) = self.settings.load().await {
            self.log.warning(format!("Failed to load settings: {}", e));
        }
    }

    /// Shutdown sequence: tear down any live sessions and stop a
    /// supervised backend.
    pub async fn shutdown(&mut self) {
        self.orchestrator.close_all().await;
        if let Some(supervisor) = self.supervisor.as_mut() {
            if let Err(e) = supervisor.stop().await {
                self.log.warning(format!("{}", e));
            }
        }
    }

    /// Re-reads profile availability and propagates it to the
    /// orchestrator's open validation.
    pub async fn refresh_profiles(&mut self) -> u32 {
        let available = self.profiles.refresh().await;
        self.orchestrator.set_available_profiles(available);
        available
    }
}
