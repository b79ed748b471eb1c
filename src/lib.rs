pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod web;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::toml_config::TomlConfig;

pub use crate::core::{ApodService, CredentialValidator, RequestExecutor};
pub use domain::model::{ApodRecord, Credential, RateLimitInfo, Retrieval, DEMO_KEY};
pub use domain::ports::{ApodSource, ConfigProvider, Renderer};
pub use utils::error::{ExplorerError, Result};
