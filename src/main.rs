use apod_explorer::config::cli::acquire_api_key;
use apod_explorer::utils::error::ExplorerError;
use apod_explorer::utils::{logger, validation::Validate};
use apod_explorer::web::{self, AppState};
use apod_explorer::{
    ApodService, CliConfig, ConfigProvider, CredentialValidator, RequestExecutor, TomlConfig,
};
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Low Nasa Orbit: bring NASA to people!");
    tracing::info!("APOD Astronomy Picture of the Day!");

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ apod-explorer failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(e.severity().exit_code());
    }
}

async fn run(cli: CliConfig) -> Result<(), ExplorerError> {
    // 載入配置：指定檔案時以檔案為準
    let config: Box<dyn ConfigProvider> = match &cli.config {
        Some(path) => {
            tracing::info!("📄 Loading configuration from {}", path.display());
            let file_config = TomlConfig::from_file(path)?;
            file_config.validate()?;
            Box::new(file_config)
        }
        None => {
            cli.validate()?;
            Box::new(cli.clone())
        }
    };
    if cli.verbose {
        tracing::debug!(
            "Config: endpoint={} bind={} timeout={:?} hd={}",
            config.api_endpoint(),
            config.bind_address(),
            config.request_timeout(),
            config.high_definition()
        );
    }

    let executor = RequestExecutor::new(config.api_endpoint(), config.request_timeout())?;

    // 取得並驗證 API key
    let raw_key = acquire_api_key(config.api_key(), !cli.no_prompt)?;
    let credential = CredentialValidator::new(&executor).resolve(&raw_key).await;
    tracing::info!("🔑 The key to be used is: {:?}", credential);

    let service = ApodService::new(executor, credential, config.high_definition());
    let state = AppState::new(Arc::new(service.clone()));

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    web::serve(listener, state, shutdown_signal()).await?;

    service.executor().counter().log_stats();
    tracing::info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
