pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, LogFormat};
pub use error::StatsError;
pub use types::*;
