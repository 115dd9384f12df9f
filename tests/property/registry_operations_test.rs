//! Property-based tests for session registry operations.
//!
//! For any interleaving of adds, removes and clears, the registry must
//! stay consistent with a simple ordered-set model: names are unique,
//! insertion order is preserved, and every removal tears the session's
//! container down exactly once.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use proptest::prelude::*;

use lobbydeck::lobby::registry::{Session, SessionRegistry};
use lobbydeck::services::activity_log::SharedLog;
use lobbydeck::surface::{SessionContainer, Surface, SurfaceBinding};
use lobbydeck::types::errors::SurfaceError;
use lobbydeck::types::profile::Profile;

struct NullSurface;

impl Surface for NullSurface {
    fn navigate(&mut self, _url: &str) -> Result<(), SurfaceError> {
        Ok(())
    }

    fn reload(&mut self) -> Result<(), SurfaceError> {
        Ok(())
    }
}

struct CountingContainer {
    removals: Arc<AtomicUsize>,
}

impl SessionContainer for CountingContainer {
    fn remove(&mut self) -> Result<(), SurfaceError> {
        self.removals.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn session(name: String, removals: &Arc<AtomicUsize>) -> Session {
    Session::new(
        Profile {
            name,
            display_name: None,
        },
        SurfaceBinding {
            surface: Box::new(NullSurface),
            container: Box::new(CountingContainer {
                removals: removals.clone(),
            }),
        },
    )
}

#[derive(Debug, Clone)]
enum RegistryOp {
    Add(u8),
    Remove(u8),
    Clear,
}

fn arb_ops() -> impl Strategy<Value = Vec<RegistryOp>> {
    prop::collection::vec(
        prop_oneof![
            4 => (0..12u8).prop_map(RegistryOp::Add),
            3 => (0..12u8).prop_map(RegistryOp::Remove),
            1 => Just(RegistryOp::Clear),
        ],
        1..80,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(40))]

    #[test]
    fn registry_matches_ordered_set_model(ops in arb_ops()) {
        let removals = Arc::new(AtomicUsize::new(0));
        let mut registry = SessionRegistry::new(SharedLog::new());
        let mut model: Vec<String> = Vec::new();
        let mut torn_down: usize = 0;

        for op in &ops {
            match op {
                RegistryOp::Add(n) => {
                    let name = format!("session{}", n);
                    let result = registry.add(session(name.clone(), &removals));
                    if model.contains(&name) {
                        prop_assert!(result.is_err(), "duplicate {} accepted", name);
                    } else {
                        prop_assert!(result.is_ok());
                        model.push(name);
                    }
                }
                RegistryOp::Remove(n) => {
                    let name = format!("session{}", n);
                    let result = registry.remove(&name);
                    if let Some(idx) = model.iter().position(|m| m == &name) {
                        prop_assert!(result.is_ok());
                        model.remove(idx);
                        torn_down += 1;
                    } else {
                        prop_assert!(result.is_err(), "removed absent {}", name);
                    }
                }
                RegistryOp::Clear => {
                    torn_down += model.len();
                    model.clear();
                    registry.clear();
                }
            }

            prop_assert_eq!(registry.len(), model.len());
            prop_assert_eq!(registry.names(), model.clone());
            prop_assert_eq!(
                removals.load(Ordering::SeqCst),
                torn_down,
                "teardown count diverged after {:?}",
                op
            );
        }

        // Draining the registry tears down exactly the remaining sessions.
        registry.clear();
        prop_assert_eq!(removals.load(Ordering::SeqCst), torn_down + model.len());
        prop_assert!(registry.is_empty());
    }
}
