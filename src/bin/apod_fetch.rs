use apod_explorer::config::cli::acquire_api_key;
use apod_explorer::config::{DEFAULT_API_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use apod_explorer::utils::{logger, validation::Validate};
use apod_explorer::web::{HtmlRenderer, JsonRenderer};
use apod_explorer::{
    ApodService, ApodSource, ConfigProvider, CredentialValidator, Renderer, RequestExecutor,
    TomlConfig,
};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// 單次查詢：取得一天的 APOD 並輸出到 stdout
#[derive(Debug, Parser)]
#[command(name = "apod-fetch")]
#[command(about = "Fetch a single Astronomy Picture of the Day record and print it")]
struct FetchArgs {
    /// Date as YYYY-MM-DD; today when omitted
    date: Option<String>,

    #[arg(long, env = "APOD_API_ENDPOINT", default_value = DEFAULT_API_ENDPOINT)]
    api_endpoint: String,

    #[arg(long, env = "APOD_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    hd: bool,

    #[arg(long, help = "Read endpoint, key, timeout and hd from a TOML file")]
    config: Option<PathBuf>,

    #[arg(long, help = "Print an HTML page instead of JSON")]
    html: bool,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = FetchArgs::parse();
    logger::init_cli_logger(args.verbose);

    let (endpoint, key, timeout, hd) = match &args.config {
        Some(path) => {
            let config = TomlConfig::from_file(path)?;
            config.validate()?;
            (
                config.api_endpoint().to_string(),
                config.api_key().map(str::to_string),
                config.request_timeout(),
                config.high_definition(),
            )
        }
        None => (
            args.api_endpoint.clone(),
            args.api_key.clone(),
            Duration::from_secs(args.timeout_secs),
            args.hd,
        ),
    };

    let executor = RequestExecutor::new(&endpoint, timeout)?;
    let raw_key = acquire_api_key(key.as_deref(), false)?;
    let credential = CredentialValidator::new(&executor).resolve(&raw_key).await;
    let service = ApodService::new(executor, credential, hd);

    let retrieval = service.fetch(args.date.as_deref()).await?;
    tracing::info!(
        "📊 Rate limit: {} of {} calls remaining",
        retrieval.rate_limit.remaining,
        retrieval.rate_limit.limit
    );

    let renderer: &dyn Renderer = if args.html {
        &HtmlRenderer
    } else {
        &JsonRenderer
    };
    println!("{}", renderer.render(&retrieval.record)?);

    Ok(())
}
