//! Session registry: the single source of truth for the live session set.
//!
//! Insertion-ordered and keyed by profile name. Only the orchestrator
//! writes here; the UI projector reads. Removal always tears the surface
//! and container down first, so no orphaned UI nodes or leaked surfaces
//! survive a delete.

use crate::services::activity_log::SharedLog;
use crate::surface::{SurfaceBinding, SessionContainer, Surface};
use crate::types::errors::SessionError;
use crate::types::profile::Profile;
use crate::types::session::SessionStatus;

/// Runtime pairing of a profile with a live browsing surface and its
/// on-screen container.
pub struct Session {
    pub name: String,
    pub profile: Profile,
    pub status: SessionStatus,
    /// Set once the single automatic reload after a transient load
    /// failure has been spent.
    pub retried: bool,
    surface: Box<dyn Surface>,
    container: Box<dyn SessionContainer>,
}

impl Session {
    pub fn new(profile: Profile, binding: SurfaceBinding) -> Self {
        Self {
            name: profile.name.clone(),
            profile,
            status: SessionStatus::Created,
            retried: false,
            surface: binding.surface,
            container: binding.container,
        }
    }

    pub fn surface_mut(&mut self) -> &mut dyn Surface {
        self.surface.as_mut()
    }

    /// Blank the surface to stop any in-flight load, then remove the
    /// container. Failures are logged and do not prevent deletion.
    fn teardown(&mut self, log: &SharedLog) {
        if let Err(e) = self.surface.blank() {
            log.warning(format!("Error blanking session {}: {}", self.name, e));
        }
        if let Err(e) = self.container.remove() {
            log.error(format!("Error closing session {}: {}", self.name, e));
        }
    }
}

/// In-memory ordered collection of active sessions.
pub struct SessionRegistry {
    sessions: Vec<Session>,
    log: SharedLog,
}

impl SessionRegistry {
    pub fn new(log: SharedLog) -> Self {
        Self {
            sessions: Vec::new(),
            log,
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.sessions.iter().position(|s| s.name == name)
    }

    /// Registers a session. Fails without side effects if the name is
    /// already present.
    pub fn add(&mut self, session: Session) -> Result<(), SessionError> {
        if self.position(&session.name).is_some() {
            return Err(SessionError::Duplicate(session.name));
        }
        self.sessions.push(session);
        Ok(())
    }

    /// Tears down and deletes the named session. Reports `NotFound` if
    /// absent; other sessions are never affected.
    pub fn remove(&mut self, name: &str) -> Result<(), SessionError> {
        let idx = self
            .position(name)
            .ok_or_else(|| SessionError::NotFound(name.to_string()))?;
        let mut session = self.sessions.remove(idx);
        session.teardown(&self.log);
        Ok(())
    }

    /// Removes all sessions in insertion order. A single teardown failure
    /// is logged and does not abort the remaining teardowns.
    pub fn clear(&mut self) {
        for mut session in self.sessions.drain(..) {
            session.teardown(&self.log);
        }
    }

    /// Read-only ordered view for the UI projector.
    pub fn all(&self) -> &[Session] {
        &self.sessions
    }

    pub fn get(&self, name: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|s| s.name == name)
    }

    /// Session names in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.sessions.iter().map(|s| s.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
