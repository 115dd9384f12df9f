pub mod backend;
pub mod errors;
pub mod profile;
pub mod session;
pub mod view;
