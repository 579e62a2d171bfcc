use clap::Parser;
use installer_card::core::ConfigProvider;
use installer_card::utils::error::{CardError, ErrorSeverity};
use installer_card::utils::{logger, validation::Validate};
use installer_card::{CardEngine, CardPipeline, CliConfig, LocalStorage, TomlConfig};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    match cli.log_format.as_str() {
        "json" => logger::init_json_logger(cli.verbose),
        _ => logger::init_cli_logger(cli.verbose),
    }

    tracing::debug!(
        "CLI config: org={} repo={} tag={:?} dest_dir={} api_base={} token={}",
        cli.org,
        cli.repo,
        cli.release_tag,
        cli.dest_dir,
        cli.api_base,
        if cli.token().is_some() { "set" } else { "unset" }
    );

    let dry_run = cli.dry_run;
    let result = match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(&path) {
                Ok(config) => generate(config, dry_run).await,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            }
        }
        None => generate(cli, dry_run).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Card generation failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(exit_code(&e));
    }
}

async fn generate<C>(config: C, dry_run: bool) -> Result<(), CardError>
where
    C: ConfigProvider + Validate,
{
    // 驗證配置
    config.validate()?;

    let storage = LocalStorage::new(config.dest_dir());
    let pipeline = CardPipeline::new(storage, config)?;
    let engine = CardEngine::new(pipeline);

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - the card is printed, not written");
        let (file_name, markdown) = engine.preview().await?;
        tracing::info!("Would write: {}", file_name);
        print!("{}", markdown);
        return Ok(());
    }

    let output_path = engine.run().await?;
    println!("Generated: {}", output_path);
    Ok(())
}

fn exit_code(e: &CardError) -> i32 {
    match e.severity() {
        ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2, // 網路錯誤，重跑可能成功
        ErrorSeverity::Critical => 3,
    }
}
