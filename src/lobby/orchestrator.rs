//! Session lifecycle orchestrator.
//!
//! Drives batch open, batch launch, single-session close and close-all
//! across the registry and the surface factory. Sole writer to the
//! registry: surface lifecycle events arrive as `SurfaceSignal` messages
//! and are applied here, never by the surfaces themselves.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::backend::client::LobbyBackend;
use crate::lobby::pacing::{PaceKind, Pacer};
use crate::lobby::projection;
use crate::lobby::registry::{Session, SessionRegistry};
use crate::services::activity_log::SharedLog;
use crate::surface::{SignalSender, SurfaceEvent, SurfaceFactory, SurfaceSignal};
use crate::types::errors::OrchestratorError;
use crate::types::session::SessionStatus;
use crate::types::view::{LobbyView, PanelMode};

/// Navigation target used when the backend grants sessions without a base
/// URL.
pub const DEFAULT_BASE_URL: &str = "https://xbox.com/en-US/play";

/// Embedder net error codes eligible for one automatic delayed reload:
/// NAME_NOT_RESOLVED (-105) and INTERNET_DISCONNECTED (-106). Everything
/// else stays `Failed` until manual action.
pub const RETRYABLE_LOAD_CODES: [i32; 2] = [-105, -106];

pub struct Orchestrator {
    registry: SessionRegistry,
    backend: Arc<dyn LobbyBackend>,
    factory: Box<dyn SurfaceFactory>,
    pacer: Arc<dyn Pacer>,
    signals: SignalSender,
    log: SharedLog,
    mode: PanelMode,
    available_profiles: u32,
    open_guard: CancellationToken,
}

impl Orchestrator {
    pub fn new(
        registry: SessionRegistry,
        backend: Arc<dyn LobbyBackend>,
        factory: Box<dyn SurfaceFactory>,
        pacer: Arc<dyn Pacer>,
        signals: SignalSender,
        log: SharedLog,
    ) -> Self {
        Self {
            registry,
            backend,
            factory,
            pacer,
            signals,
            log,
            mode: PanelMode::OpenSessions,
            available_profiles: 0,
            open_guard: CancellationToken::new(),
        }
    }

    /// Installs a fresh cancellation guard for the next batch open and
    /// returns a handle to it. The caller keeps the handle while `open`
    /// is in flight; cancelling it stops the creation loop before its
    /// next step, which is how a close-all issued mid-open preempts the
    /// remaining creations.
    pub fn begin_open(&mut self) -> CancellationToken {
        self.open_guard.cancel();
        self.open_guard = CancellationToken::new();
        self.open_guard.clone()
    }

    /// Last-known available-profile count, used to validate batch opens.
    /// Zero means unknown or none; in both cases the count check is
    /// skipped and the backend decides.
    pub fn set_available_profiles(&mut self, count: u32) {
        self.available_profiles = count;
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn mode(&self) -> PanelMode {
        self.mode
    }

    /// Current derived UI state.
    pub fn view(&self) -> LobbyView {
        projection::project(&self.registry, self.mode)
    }

    /// Batch open: allocate `count` profiles from the backend, tear down
    /// any previous session generation, then materialize one surface per
    /// profile in the order received, paced between creations.
    ///
    /// Validation failures reject before any backend call or registry
    /// mutation. A backend failure aborts with no partial state. Once
    /// creation starts, a single profile's failure is logged and the rest
    /// proceed.
    pub async fn open(&mut self, count: u32) -> Result<(), OrchestratorError> {
        if count < 1 {
            self.log.error("Invalid bot count: must be at least 1");
            return Err(OrchestratorError::InvalidBotCount(count));
        }
        if self.available_profiles > 0 && count > self.available_profiles {
            self.log.error(format!(
                "Cannot open {} sessions: only {} profiles available",
                count, self.available_profiles
            ));
            return Err(OrchestratorError::InsufficientProfiles {
                requested: count,
                available: self.available_profiles,
            });
        }

        self.log.info(format!(
            "Opening {} session{}...",
            count,
            if count == 1 { "" } else { "s" }
        ));
        let grant = self.backend.open_sessions(count).await?;

        let guard = self.open_guard.clone();
        if guard.is_cancelled() {
            self.log.warning("Session open cancelled");
            return Ok(());
        }
        // A new generation begins: clear the previous session set before
        // creating anything.
        self.registry.clear();

        if grant.profiles.is_empty() {
            self.log.error("No profiles provided for session creation");
            return Ok(());
        }
        let base_url = grant
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        for profile in grant.profiles {
            if guard.is_cancelled() {
                self.log.warning("Session open cancelled");
                return Ok(());
            }
            let name = profile.name.clone();
            let binding = match self.factory.create(&profile, &base_url) {
                Ok(binding) => binding,
                Err(e) => {
                    self.log
                        .error(format!("Failed to create session {}: {}", name, e));
                    continue;
                }
            };
            let mut session = Session::new(profile, binding);
            session.status = SessionStatus::Loading;
            if let Err(e) = self.registry.add(session) {
                self.log.error(format!("{}", e));
                continue;
            }
            self.log.info(format!("Session {} starting to load...", name));

            self.pacer.pace(PaceKind::SessionCreate).await;
        }

        if guard.is_cancelled() {
            self.log.warning("Session open cancelled");
            return Ok(());
        }
        self.mode = PanelMode::LaunchTarget;
        let created = self.registry.len();
        self.log.success(format!(
            "Created {} session{}",
            created,
            if created == 1 { "" } else { "s" }
        ));
        Ok(())
    }

    /// Batch launch: fetch the target URL from the backend, then navigate
    /// every session in insertion order, paced between navigations.
    /// Best-effort fan-out: one session's failure never aborts the rest.
    ///
    /// A successfully issued navigation leaves the session `Navigating`;
    /// the surface's own ready event promotes it to `Ready` once the page
    /// actually finishes loading.
    pub async fn launch(&mut self) -> Result<(), OrchestratorError> {
        let url = self.backend.launch_url().await?;
        self.log.info("Launching target in all sessions...");

        for name in self.registry.names() {
            if let Some(session) = self.registry.get_mut(&name) {
                session.status = SessionStatus::Navigating;
                match session.surface_mut().navigate(&url) {
                    Ok(()) => {
                        self.log.info(format!("Navigating {} to target", name));
                    }
                    Err(e) => {
                        session.status = SessionStatus::Failed;
                        self.log
                            .error(format!("Failed to navigate {}: {}", name, e));
                    }
                }
            }
            self.pacer.pace(PaceKind::Navigation).await;
        }
        Ok(())
    }

    /// Close a single session. Absent names are a logged no-op.
    pub fn close(&mut self, name: &str) {
        match self.registry.remove(name) {
            Ok(()) => {
                self.log.info(format!("Closed session {}", name));
                if self.registry.is_empty() {
                    self.mode = PanelMode::OpenSessions;
                }
            }
            Err(e) => self.log.warning(format!("{}", e)),
        }
    }

    /// Close everything: cancel an in-flight open, clear the registry,
    /// release backend browsing state. The UI resets to open mode even if
    /// individual teardowns or the backend notification fail.
    pub async fn close_all(&mut self) {
        self.open_guard.cancel();
        self.open_guard = CancellationToken::new();
        self.registry.clear();
        self.mode = PanelMode::OpenSessions;
        if let Err(e) = self.backend.close_sessions().await {
            self.log.error(format!("Failed to close sessions: {}", e));
        }
        self.log.info("All sessions closed");
    }

    /// Manual reload of a failed or crashed session.
    pub fn reload(&mut self, name: &str) {
        let log = self.log.clone();
        match self.registry.get_mut(name) {
            Some(session) => {
                session.status = SessionStatus::Loading;
                log.info(format!("Reloading session {}...", name));
                if let Err(e) = session.surface_mut().reload() {
                    session.status = SessionStatus::Failed;
                    log.error(format!("Failed to reload {}: {}", name, e));
                }
            }
            None => log.warning(format!("Session {} not found", name)),
        }
    }

    /// Applies one surface lifecycle event to the owning session.
    ///
    /// A load failure with a retryable code earns exactly one automatic
    /// reload after the retry delay; crashes never auto-retry because the
    /// surface process is presumed dead and silent recovery would mask
    /// repeated crashes. The retry delay runs on a detached timer task
    /// that reports back as `RetryDue` through the signal channel, so the
    /// signal consumer never stalls on it.
    pub async fn handle_signal(&mut self, signal: SurfaceSignal) {
        let log = self.log.clone();
        let name = signal.session;

        // A retry timer can fire after its session was closed or
        // recovered; unlike a live surface reporting on an unknown
        // session, that is not worth a warning.
        if matches!(signal.event, SurfaceEvent::RetryDue) {
            self.apply_due_retry(&name);
            return;
        }

        let Some(session) = self.registry.get_mut(&name) else {
            log.warning(format!("Event for unknown session {}", name));
            return;
        };

        match signal.event {
            SurfaceEvent::LoadingStarted => {
                session.status = SessionStatus::Loading;
                log.info(format!("Session {} starting to load...", name));
            }
            SurfaceEvent::Ready => {
                session.status = SessionStatus::Ready;
                session.retried = false;
                log.success(format!("Session {} ready", name));
            }
            SurfaceEvent::LoadFailed { code, description } => {
                session.status = SessionStatus::Failed;
                log.error(format!(
                    "Session {} failed to load: {} ({})",
                    name, description, code
                ));
                if RETRYABLE_LOAD_CODES.contains(&code) && !session.retried {
                    session.retried = true;
                    self.schedule_retry(name);
                }
            }
            SurfaceEvent::Crashed => {
                session.status = SessionStatus::Crashed;
                log.error(format!("Session {} crashed", name));
            }
            SurfaceEvent::RetryDue => {}
        }
    }

    /// Starts the delayed-reload timer for a transiently failed session.
    fn schedule_retry(&self, name: String) {
        let pacer = self.pacer.clone();
        let signals = self.signals.clone();
        tokio::spawn(async move {
            pacer.pace(PaceKind::LoadRetry).await;
            let _ = signals.send(SurfaceSignal {
                session: name,
                event: SurfaceEvent::RetryDue,
            });
        });
    }

    /// Applies a due retry. Skipped quietly when the session is gone or
    /// no longer `Failed` by the time the delay elapses.
    fn apply_due_retry(&mut self, name: &str) {
        let log = self.log.clone();
        let Some(session) = self.registry.get_mut(name) else {
            return;
        };
        if session.status != SessionStatus::Failed {
            return;
        }
        log.info(format!("Retrying session {}...", name));
        session.status = SessionStatus::Loading;
        if let Err(e) = session.surface_mut().reload() {
            session.status = SessionStatus::Failed;
            log.error(format!("Failed to reload {}: {}", name, e));
        }
    }
}
