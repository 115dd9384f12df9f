pub mod activity_log;
pub mod automation;
pub mod profile_directory;
pub mod settings;
