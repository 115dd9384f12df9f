//! LobbyDeck — a desktop control panel for fleets of isolated,
//! identity-scoped browsing sessions driven by a local backend.
//!
//! This library crate exposes all modules for use by the binary and
//! integration tests.

pub mod app;
pub mod backend;
pub mod lobby;
pub mod services;
pub mod surface;
pub mod types;

#[cfg(feature = "gui")]
pub mod ui;
