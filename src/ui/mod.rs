#[cfg(feature = "gui")]
pub mod panel_app;
