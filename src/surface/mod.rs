//! Isolated browsing surfaces.
//!
//! A surface is an embeddable web-rendering context bound to one storage
//! partition, so cookies and local storage for distinct profiles never
//! leak into one another. The factory only constructs surfaces and wires
//! their lifecycle events into a signal channel; retry and failure policy
//! live in the orchestrator.

#[cfg(feature = "gui")]
pub mod webview;

use tokio::sync::mpsc::UnboundedSender;

use crate::types::errors::SurfaceError;
use crate::types::profile::Profile;

pub const BLANK_URL: &str = "about:blank";

/// Lifecycle event emitted by a browsing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    LoadingStarted,
    Ready,
    LoadFailed { code: i32, description: String },
    Crashed,
    /// The delay before a scheduled automatic reload has elapsed. Emitted
    /// by the orchestrator's own retry timer, not by a surface.
    RetryDue,
}

/// A surface event tagged with the session it belongs to. Delivered over a
/// channel and consumed by the orchestrator, which is the sole writer to
/// the session registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceSignal {
    pub session: String,
    pub event: SurfaceEvent,
}

pub type SignalSender = UnboundedSender<SurfaceSignal>;

/// Handle to a live browsing surface.
pub trait Surface: Send {
    fn navigate(&mut self, url: &str) -> Result<(), SurfaceError>;
    fn reload(&mut self) -> Result<(), SurfaceError>;

    /// Blank the navigation target, stopping any in-flight load
    /// deterministically before teardown.
    fn blank(&mut self) -> Result<(), SurfaceError> {
        self.navigate(BLANK_URL)
    }
}

/// Handle to the on-screen grouping element holding a surface.
pub trait SessionContainer: Send {
    fn remove(&mut self) -> Result<(), SurfaceError>;
}

/// Surface plus its container, created together and torn down together.
pub struct SurfaceBinding {
    pub surface: Box<dyn Surface>,
    pub container: Box<dyn SessionContainer>,
}

/// Constructs browsing surfaces bound to per-profile storage partitions.
///
/// Creation returns a handle synchronously; the initial navigation runs
/// asynchronously and reports through the factory's signal channel.
pub trait SurfaceFactory: Send {
    fn create(&mut self, profile: &Profile, initial_url: &str)
        -> Result<SurfaceBinding, SurfaceError>;
}
