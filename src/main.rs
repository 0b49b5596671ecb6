use anyhow::Context;
use clap::Parser;
use threat_intel_aggregator::config::cli::write_output;
use threat_intel_aggregator::utils::monitor::SystemMonitor;
use threat_intel_aggregator::utils::{logger, validation::Validate};
use threat_intel_aggregator::{Aggregator, CliConfig, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting threat-intel aggregator");

    if let Some(path) = config.config.clone() {
        tracing::info!("📁 Loading configuration from: {}", path.display());
        let file = TomlConfig::from_file(&path)
            .with_context(|| format!("failed to load config file '{}'", path.display()))?;
        config.apply_file_defaults(&file);
    }

    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let mut monitor = SystemMonitor::new(config.monitor);
    if monitor.is_enabled() {
        tracing::info!("🔍 System monitoring enabled");
    }

    let aggregator = Aggregator::from_config(&config)?;
    monitor.log_stats("Startup");

    let envelope = aggregator.aggregate().await;
    monitor.log_stats("Aggregation");

    let json = if config.pretty {
        serde_json::to_string_pretty(&envelope)
    } else {
        serde_json::to_string(&envelope)
    }
    .context("failed to serialize response envelope")?;

    match &config.output {
        Some(path) => {
            write_output(path, &json)?;
            tracing::info!("📁 Output saved to: {}", path.display());
        }
        None => println!("{}", json),
    }

    monitor.log_stats("Finished");
    Ok(())
}
