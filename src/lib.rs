pub mod config;
pub mod core;
pub mod domain;
pub mod sources;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::lambda::LambdaConfig;
pub use config::toml_config::TomlConfig;
pub use crate::core::{aggregator::Aggregator, handler::handle_request};
pub use utils::error::{IntelError, Result};
