use rstest::rstest;

use lobbydeck::lobby::projection::{
    profiles_counter, project, slider_constraints, LAUNCH_LABEL, OPEN_SESSIONS_LABEL,
};
use lobbydeck::lobby::registry::{Session, SessionRegistry};
use lobbydeck::services::activity_log::SharedLog;
use lobbydeck::surface::{SessionContainer, Surface, SurfaceBinding};
use lobbydeck::types::errors::SurfaceError;
use lobbydeck::types::profile::Profile;
use lobbydeck::types::view::PanelMode;

struct NullSurface;

impl Surface for NullSurface {
    fn navigate(&mut self, _url: &str) -> Result<(), SurfaceError> {
        Ok(())
    }

    fn reload(&mut self) -> Result<(), SurfaceError> {
        Ok(())
    }
}

struct NullContainer;

impl SessionContainer for NullContainer {
    fn remove(&mut self) -> Result<(), SurfaceError> {
        Ok(())
    }
}

fn registry_with(names: &[&str]) -> SessionRegistry {
    let mut registry = SessionRegistry::new(SharedLog::new());
    for name in names {
        let profile = Profile {
            name: name.to_string(),
            display_name: None,
        };
        registry
            .add(Session::new(
                profile,
                SurfaceBinding {
                    surface: Box::new(NullSurface),
                    container: Box::new(NullContainer),
                },
            ))
            .unwrap();
    }
    registry
}

#[test]
fn test_empty_registry_shows_empty_state() {
    let registry = registry_with(&[]);
    let view = project(&registry, PanelMode::OpenSessions);
    assert_eq!(view.active_count, 0);
    assert!(view.empty_state_visible);
    assert!(!view.close_button_enabled);
    assert_eq!(view.primary_button_label, OPEN_SESSIONS_LABEL);
}

#[test]
fn test_launch_label_requires_sessions_and_launch_mode() {
    let registry = registry_with(&["alpha", "bravo"]);
    let view = project(&registry, PanelMode::LaunchTarget);
    assert_eq!(view.active_count, 2);
    assert!(view.close_button_enabled);
    assert!(!view.empty_state_visible);
    assert_eq!(view.primary_button_label, LAUNCH_LABEL);
}

#[test]
fn test_open_mode_keeps_open_label_despite_sessions() {
    let registry = registry_with(&["alpha"]);
    let view = project(&registry, PanelMode::OpenSessions);
    assert_eq!(view.primary_button_label, OPEN_SESSIONS_LABEL);
}

#[test]
fn test_launch_mode_with_empty_registry_falls_back_to_open_label() {
    // A stale mode must never show a launch button with nothing to launch.
    let registry = registry_with(&[]);
    let view = project(&registry, PanelMode::LaunchTarget);
    assert_eq!(view.primary_button_label, OPEN_SESSIONS_LABEL);
    assert!(view.empty_state_visible);
}

#[rstest]
#[case(0, 1, 1, 1, true)]
#[case(1, 1, 1, 1, false)]
#[case(5, 3, 5, 3, false)]
#[case(3, 10, 3, 3, false)]
#[case(20, 0, 20, 1, false)]
fn test_slider_constraints(
    #[case] available: u32,
    #[case] current: u32,
    #[case] expected_max: u32,
    #[case] expected_value: u32,
    #[case] expected_disabled: bool,
) {
    let slider = slider_constraints(available, current);
    assert_eq!(slider.max, expected_max);
    assert_eq!(slider.value, expected_value);
    assert_eq!(slider.disabled, expected_disabled);
}

#[test]
fn test_profiles_counter_text() {
    assert_eq!(profiles_counter(0), "Available Profiles: 0/20");
    assert_eq!(profiles_counter(14), "Available Profiles: 14/20");
}
