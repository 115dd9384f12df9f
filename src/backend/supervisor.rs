//! Backend process supervisor.
//!
//! Host-level control channel, separate from the REST API: spawns the
//! backend command, reports process liveness, and restarts it on request.
//! Exit codes and API-level health stay out of scope here.

use std::time::Duration;

use tokio::process::{Child, Command};

use crate::types::errors::SupervisorError;

/// Delay after a restart before callers should re-check API health.
pub const RESTART_SETTLE: Duration = Duration::from_secs(3);

pub struct BackendSupervisor {
    program: String,
    args: Vec<String>,
    child: Option<Child>,
}

impl BackendSupervisor {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            child: None,
        }
    }

    /// Spawns the backend process. A previously spawned child is stopped
    /// first.
    pub async fn start(&mut self) -> Result<(), SupervisorError> {
        if self.child.is_some() {
            self.stop().await?;
        }
        let child = Command::new(&self.program)
            .args(&self.args)
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SupervisorError::SpawnFailed(e.to_string()))?;
        tracing::info!(program = %self.program, "backend process spawned");
        self.child = Some(child);
        Ok(())
    }

    /// Whether the spawned process is still alive. False when never
    /// started or already exited.
    pub fn is_running(&mut self) -> bool {
        match self.child.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }

    pub async fn stop(&mut self) -> Result<(), SupervisorError> {
        if let Some(mut child) = self.child.take() {
            child
                .kill()
                .await
                .map_err(|e| SupervisorError::StopFailed(e.to_string()))?;
        }
        Ok(())
    }

    /// Kill and respawn, then wait for the settle delay so the API has a
    /// chance to come up before the caller probes it.
    pub async fn restart(&mut self) -> Result<(), SupervisorError> {
        self.stop().await?;
        self.start().await?;
        tokio::time::sleep(RESTART_SETTLE).await;
        Ok(())
    }
}
