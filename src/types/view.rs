//! Derived UI state. Everything here is computed from registry or panel
//! state by `lobby::projection` and `services::automation`; nothing holds
//! independent state.

/// Semantic mode of the primary action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelMode {
    /// No live session generation: the primary action opens sessions.
    #[default]
    OpenSessions,
    /// Sessions are open: the primary action launches into the target.
    LaunchTarget,
}

/// Everything the lobby pane needs to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbyView {
    pub active_count: usize,
    pub close_button_enabled: bool,
    pub empty_state_visible: bool,
    pub primary_button_label: &'static str,
}

/// Constraints for the bot-count slider, derived from the available
/// profile count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderConstraints {
    pub max: u32,
    pub value: u32,
    pub disabled: bool,
}

/// Button states for the automation control pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomationView {
    pub connect_label: &'static str,
    pub movement_label: &'static str,
    pub anti_afk_label: &'static str,
    pub movement_enabled: bool,
    pub anti_afk_enabled: bool,
    pub class_select_enabled: bool,
}
