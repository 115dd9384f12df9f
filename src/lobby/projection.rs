//! UI state projector.
//!
//! Pure functions from registry / directory state to what the panel
//! renders. Invoked after every registry mutation; never mutates anything.

use crate::lobby::registry::SessionRegistry;
use crate::types::view::{LobbyView, PanelMode, SliderConstraints};

pub const OPEN_SESSIONS_LABEL: &str = "Open Sessions";
pub const LAUNCH_LABEL: &str = "Launch Game";

/// Size of the profile pool shown in the availability counter.
pub const PROFILE_POOL_SIZE: u32 = 20;

/// Derives the lobby pane state from the live session set.
///
/// The primary button only shows the launch label while sessions exist;
/// an emptied registry always falls back to the open label, whatever mode
/// the orchestrator was left in.
pub fn project(registry: &SessionRegistry, mode: PanelMode) -> LobbyView {
    let active_count = registry.len();
    let primary_button_label = if active_count > 0 && mode == PanelMode::LaunchTarget {
        LAUNCH_LABEL
    } else {
        OPEN_SESSIONS_LABEL
    };
    LobbyView {
        active_count,
        close_button_enabled: active_count > 0,
        empty_state_visible: active_count == 0,
        primary_button_label,
    }
}

/// Bot-count slider constraints for the given availability: max is at
/// least 1, the current value is clamped to max, and the slider is
/// disabled while no profiles are available.
pub fn slider_constraints(available: u32, current: u32) -> SliderConstraints {
    let max = available.max(1);
    SliderConstraints {
        max,
        value: current.clamp(1, max),
        disabled: available == 0,
    }
}

/// Availability counter text shown above the slider.
pub fn profiles_counter(available: u32) -> String {
    format!("Available Profiles: {}/{}", available, PROFILE_POOL_SIZE)
}
