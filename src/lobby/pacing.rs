//! Explicit pacing policy for batch operations.
//!
//! The delays between successive session creations and navigations are
//! admission control: they keep many heavy surface initializations from
//! landing on the embedding host at once. Modeling them as an injected
//! trait keeps the rate-limiting intent testable without wall clocks.

use std::time::Duration;

use async_trait::async_trait;

/// Delay between successive surface creations during batch open.
pub const SESSION_CREATE_PACING: Duration = Duration::from_millis(1000);
/// Delay between successive navigations during batch launch.
pub const NAVIGATION_PACING: Duration = Duration::from_millis(2000);
/// Delay before the single automatic reload of a transiently failed load.
pub const LOAD_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Which pacing gap is being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaceKind {
    SessionCreate,
    Navigation,
    LoadRetry,
}

#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pace(&self, kind: PaceKind);
}

/// Production pacer: fixed interval per gap kind, slept on the tokio timer.
pub struct FixedIntervalPacer {
    session_create: Duration,
    navigation: Duration,
    load_retry: Duration,
}

impl FixedIntervalPacer {
    pub fn new(session_create: Duration, navigation: Duration, load_retry: Duration) -> Self {
        Self {
            session_create,
            navigation,
            load_retry,
        }
    }
}

impl Default for FixedIntervalPacer {
    fn default() -> Self {
        Self::new(SESSION_CREATE_PACING, NAVIGATION_PACING, LOAD_RETRY_DELAY)
    }
}

#[async_trait]
impl Pacer for FixedIntervalPacer {
    async fn pace(&self, kind: PaceKind) {
        let interval = match kind {
            PaceKind::SessionCreate => self.session_create,
            PaceKind::Navigation => self.navigation,
            PaceKind::LoadRetry => self.load_retry,
        };
        tokio::time::sleep(interval).await;
    }
}

/// Pacer that returns immediately. Used by tests and the console demo.
pub struct NoopPacer;

#[async_trait]
impl Pacer for NoopPacer {
    async fn pace(&self, _kind: PaceKind) {}
}
