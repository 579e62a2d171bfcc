pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{LocalStorage, ReleaseClient};
pub use config::toml_config::TomlConfig;
pub use crate::core::{engine::CardEngine, pipeline::CardPipeline};
pub use utils::error::{CardError, Result};
