//! Category whitelist: persisted registry and tag validation

pub mod ports;
pub mod registry;
pub mod validator;

pub use ports::ConfigStore;
pub use registry::CategoryRegistry;
pub use validator::TagValidator;
