use budget_sim::config::toml_config::TomlConfig;
use budget_sim::core::ConfigProvider;
use budget_sim::utils::error::ErrorSeverity;
use budget_sim::utils::{logger, validation::Validate};
use budget_sim::{BudgetSession, CliConfig, CsvWorkbook, SessionEngine, TerminalSurface};
use clap::Parser;

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting budget-sim CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 載入 TOML 配置（CLI 旗標優先）
    if let Some(path) = config.config_file.clone() {
        tracing::info!("📁 Loading configuration from: {}", path);
        match TomlConfig::from_file(&path) {
            Ok(file_config) => {
                if let Err(e) = file_config.validate_config() {
                    tracing::error!("❌ Configuration validation failed: {}", e);
                    eprintln!("❌ {}", e.user_friendly_message());
                    eprintln!("💡 {}", e.recovery_suggestion());
                    std::process::exit(exit_code(e.severity()));
                }
                config = config.merged_with(file_config);
            }
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        }
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(exit_code(e.severity()));
    }

    // 建立工作簿來源並載入一次
    let workbook = CsvWorkbook::new(config.workbook_path().to_string());
    let session = BudgetSession::open(&workbook, &config);

    let load_exit = session.load_error().map(|e| {
        tracing::error!(
            "❌ Workbook load failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        exit_code(e.severity())
    });

    let surface = TerminalSurface::new(config.output_format());
    let mut engine = SessionEngine::new(session, surface);

    if let Err(e) = engine.run() {
        tracing::error!(
            "❌ Session failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let code = exit_code(e.severity());
        if code > 0 {
            std::process::exit(code);
        }
    }

    if let Some(code) = load_exit {
        if code > 0 {
            std::process::exit(code);
        }
    }

    tracing::info!("✅ Session ended");
    Ok(())
}
