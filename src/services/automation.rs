//! Remote-control automation pane.
//!
//! Mirrors the backend's controller link and its movement / anti-AFK
//! loops. All automation actions are gated on the controller link: until
//! connect succeeds, toggles and class selection are disabled no-ops.
//! Disconnecting clears the local running flags because the backend stops
//! both loops when the link drops.

use std::sync::Arc;

use crate::backend::client::LobbyBackend;
use crate::services::activity_log::SharedLog;
use crate::types::errors::BackendError;
use crate::types::view::AutomationView;

const CONNECT_LABEL: &str = "Connect Controller";
const DISCONNECT_LABEL: &str = "Disconnect";

pub struct AutomationPanel {
    backend: Arc<dyn LobbyBackend>,
    log: SharedLog,
    connected: bool,
    movement_running: bool,
    anti_afk_running: bool,
}

impl AutomationPanel {
    pub fn new(backend: Arc<dyn LobbyBackend>, log: SharedLog) -> Self {
        Self {
            backend,
            log,
            connected: false,
            movement_running: false,
            anti_afk_running: false,
        }
    }

    pub fn connected(&self) -> bool {
        self.connected
    }

    pub fn movement_running(&self) -> bool {
        self.movement_running
    }

    pub fn anti_afk_running(&self) -> bool {
        self.anti_afk_running
    }

    /// Connects or disconnects the controller link depending on the
    /// current state. A failed request leaves local state untouched.
    pub async fn toggle_controller(&mut self) -> Result<(), BackendError> {
        if self.connected {
            self.backend.controller_disconnect().await?;
            self.connected = false;
            self.movement_running = false;
            self.anti_afk_running = false;
            self.log.info("Controller disconnected");
        } else {
            self.backend.controller_connect().await?;
            self.connected = true;
            self.log.success("Controller connected");
        }
        Ok(())
    }

    /// Toggles the movement loop. The backend reports the resulting state,
    /// which replaces the local flag.
    pub async fn toggle_movement(&mut self) -> Result<(), BackendError> {
        if !self.connected {
            self.log.warning("Connect the controller first");
            return Ok(());
        }
        self.movement_running = self.backend.toggle_movement().await?;
        self.log.info(if self.movement_running {
            "Movement started"
        } else {
            "Movement stopped"
        });
        Ok(())
    }

    /// Toggles the anti-AFK loop.
    pub async fn toggle_anti_afk(&mut self) -> Result<(), BackendError> {
        if !self.connected {
            self.log.warning("Connect the controller first");
            return Ok(());
        }
        self.anti_afk_running = self.backend.toggle_anti_afk().await?;
        self.log.info(if self.anti_afk_running {
            "Anti-AFK started"
        } else {
            "Anti-AFK stopped"
        });
        Ok(())
    }

    /// Runs the backend's class-selection sequence.
    pub async fn select_class(&mut self) -> Result<(), BackendError> {
        if !self.connected {
            self.log.warning("Connect the controller first");
            return Ok(());
        }
        self.backend.select_class().await?;
        self.log.success("Class selected");
        Ok(())
    }

    /// Button labels and enablement for the pane.
    pub fn view(&self) -> AutomationView {
        AutomationView {
            connect_label: if self.connected {
                DISCONNECT_LABEL
            } else {
                CONNECT_LABEL
            },
            movement_label: if self.movement_running {
                "Stop Movement"
            } else {
                "Start Movement"
            },
            anti_afk_label: if self.anti_afk_running {
                "Stop Anti-AFK"
            } else {
                "Start Anti-AFK"
            },
            movement_enabled: self.connected,
            anti_afk_enabled: self.connected,
            class_select_enabled: self.connected,
        }
    }
}
