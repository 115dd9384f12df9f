use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use lobbydeck::lobby::registry::{Session, SessionRegistry};
use lobbydeck::services::activity_log::SharedLog;
use lobbydeck::surface::{SessionContainer, Surface, SurfaceBinding};
use lobbydeck::types::errors::{SessionError, SurfaceError};
use lobbydeck::types::profile::Profile;
use lobbydeck::types::session::SessionStatus;

/// Records navigations and removals so teardown order can be asserted.
#[derive(Clone, Default)]
struct Trace {
    navigations: Arc<Mutex<Vec<(String, String)>>>,
    removals: Arc<Mutex<Vec<String>>>,
    removal_failures: Arc<AtomicUsize>,
}

struct TraceSurface {
    name: String,
    trace: Trace,
}

impl Surface for TraceSurface {
    fn navigate(&mut self, url: &str) -> Result<(), SurfaceError> {
        self.trace
            .navigations
            .lock()
            .unwrap()
            .push((self.name.clone(), url.to_string()));
        Ok(())
    }

    fn reload(&mut self) -> Result<(), SurfaceError> {
        Ok(())
    }
}

struct TraceContainer {
    name: String,
    trace: Trace,
    fail: bool,
}

impl SessionContainer for TraceContainer {
    fn remove(&mut self) -> Result<(), SurfaceError> {
        if self.fail {
            self.trace.removal_failures.fetch_add(1, Ordering::SeqCst);
            return Err(SurfaceError::TeardownFailed("stub".to_string()));
        }
        self.trace.removals.lock().unwrap().push(self.name.clone());
        Ok(())
    }
}

fn session(name: &str, trace: &Trace) -> Session {
    session_with_failing_teardown(name, trace, false)
}

fn session_with_failing_teardown(name: &str, trace: &Trace, fail: bool) -> Session {
    let profile = Profile {
        name: name.to_string(),
        display_name: None,
    };
    Session::new(
        profile,
        SurfaceBinding {
            surface: Box::new(TraceSurface {
                name: name.to_string(),
                trace: trace.clone(),
            }),
            container: Box::new(TraceContainer {
                name: name.to_string(),
                trace: trace.clone(),
                fail,
            }),
        },
    )
}

#[test]
fn test_new_session_starts_created() {
    let trace = Trace::default();
    let s = session("alpha", &trace);
    assert_eq!(s.status, SessionStatus::Created);
    assert!(!s.retried);
}

#[test]
fn test_add_and_get() {
    let trace = Trace::default();
    let mut registry = SessionRegistry::new(SharedLog::new());
    registry.add(session("alpha", &trace)).unwrap();
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("alpha").unwrap().name, "alpha");
    assert!(registry.get("bravo").is_none());
}

#[test]
fn test_add_duplicate_rejected_without_side_effects() {
    let trace = Trace::default();
    let mut registry = SessionRegistry::new(SharedLog::new());
    registry.add(session("alpha", &trace)).unwrap();

    let result = registry.add(session("alpha", &trace));
    assert!(matches!(result, Err(SessionError::Duplicate(_))));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_remove_tears_down_surface_and_container() {
    let trace = Trace::default();
    let mut registry = SessionRegistry::new(SharedLog::new());
    registry.add(session("alpha", &trace)).unwrap();
    registry.add(session("bravo", &trace)).unwrap();

    registry.remove("alpha").unwrap();

    // The surface is blanked before the container goes away.
    let navigations = trace.navigations.lock().unwrap();
    assert_eq!(
        *navigations,
        vec![("alpha".to_string(), "about:blank".to_string())]
    );
    assert_eq!(*trace.removals.lock().unwrap(), vec!["alpha".to_string()]);
    assert_eq!(registry.names(), vec!["bravo".to_string()]);
}

#[test]
fn test_remove_unknown_reports_not_found() {
    let trace = Trace::default();
    let mut registry = SessionRegistry::new(SharedLog::new());
    registry.add(session("alpha", &trace)).unwrap();

    let result = registry.remove("charlie");
    assert!(matches!(result, Err(SessionError::NotFound(_))));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_clear_tears_down_in_insertion_order() {
    let trace = Trace::default();
    let mut registry = SessionRegistry::new(SharedLog::new());
    for name in ["alpha", "bravo", "charlie"] {
        registry.add(session(name, &trace)).unwrap();
    }

    registry.clear();

    assert!(registry.is_empty());
    assert_eq!(
        *trace.removals.lock().unwrap(),
        vec!["alpha".to_string(), "bravo".to_string(), "charlie".to_string()]
    );
}

#[test]
fn test_clear_continues_past_teardown_failure() {
    let trace = Trace::default();
    let mut registry = SessionRegistry::new(SharedLog::new());
    registry.add(session("alpha", &trace)).unwrap();
    registry
        .add(session_with_failing_teardown("bravo", &trace, true))
        .unwrap();
    registry.add(session("charlie", &trace)).unwrap();

    registry.clear();

    assert!(registry.is_empty());
    assert_eq!(trace.removal_failures.load(Ordering::SeqCst), 1);
    assert_eq!(
        *trace.removals.lock().unwrap(),
        vec!["alpha".to_string(), "charlie".to_string()]
    );
}

#[test]
fn test_names_preserve_insertion_order() {
    let trace = Trace::default();
    let mut registry = SessionRegistry::new(SharedLog::new());
    for name in ["delta", "alpha", "charlie"] {
        registry.add(session(name, &trace)).unwrap();
    }
    assert_eq!(
        registry.names(),
        vec!["delta".to_string(), "alpha".to_string(), "charlie".to_string()]
    );
}

#[test]
fn test_get_mut_allows_status_updates() {
    let trace = Trace::default();
    let mut registry = SessionRegistry::new(SharedLog::new());
    registry.add(session("alpha", &trace)).unwrap();

    registry.get_mut("alpha").unwrap().status = SessionStatus::Ready;
    assert_eq!(registry.get("alpha").unwrap().status, SessionStatus::Ready);
}
