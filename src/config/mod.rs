pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, validate_socket_addr, validate_url};
#[cfg(feature = "cli")]
use {
    crate::utils::validation::Validate,
    clap::Parser,
    serde::{Deserialize, Serialize},
    std::path::PathBuf,
    std::time::Duration,
};

pub const DEFAULT_API_ENDPOINT: &str = "https://api.nasa.gov/planetary/apod";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const MAX_TIMEOUT_SECS: u64 = 60;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "apod-explorer")]
#[command(about = "Serves NASA's Astronomy Picture of the Day through a small local web front-end")]
pub struct CliConfig {
    #[arg(long, env = "APOD_API_ENDPOINT", default_value = DEFAULT_API_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, env = "APOD_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, default_value = DEFAULT_BIND_ADDRESS)]
    pub bind: String,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, help = "Upstream request timeout in seconds")]
    pub timeout_secs: u64,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set, help = "Ask the API for HD image URLs")]
    pub hd: bool,

    #[arg(long, help = "Load settings from a TOML file instead of flags")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Never prompt for an API key on stdin")]
    pub no_prompt: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn high_definition(&self) -> bool {
        self.hd
    }

    fn bind_address(&self) -> &str {
        &self.bind
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

/// Checks shared by every configuration source.
pub fn validate_provider(config: &dyn ConfigProvider) -> Result<()> {
    validate_url("api_endpoint", config.api_endpoint())?;
    validate_socket_addr("bind", config.bind_address())?;
    validate_range(
        "timeout_secs",
        config.request_timeout().as_secs(),
        1,
        MAX_TIMEOUT_SECS,
    )?;
    Ok(())
}
