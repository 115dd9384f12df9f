/// Per-session lifecycle state.
///
/// `Created -> Loading -> {Ready, Failed, Crashed}`. `Navigating` is the
/// transient sub-state a session passes through during a batch launch.
/// Close is terminal and modeled as removal from the registry rather than
/// a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Created,
    Loading,
    Navigating,
    Ready,
    Failed,
    Crashed,
}

impl SessionStatus {
    /// Whether the session requires manual intervention (reload or close).
    pub fn needs_attention(self) -> bool {
        matches!(self, SessionStatus::Failed | SessionStatus::Crashed)
    }

    /// Status text shown in the session header.
    pub fn label(self) -> &'static str {
        match self {
            SessionStatus::Created => "Created",
            SessionStatus::Loading => "Loading...",
            SessionStatus::Navigating => "Launching...",
            SessionStatus::Ready => "Ready",
            SessionStatus::Failed => "Failed",
            SessionStatus::Crashed => "Crashed",
        }
    }
}
