use clap::Parser;
use ev_charging_etl::utils::logger;
use ev_charging_etl::{app, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-etl")]
#[command(about = "EV charging station ETL driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "ev-etl.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    /// Override the minimum connector count from the config
    #[arg(long, allow_negative_numbers = true)]
    min_connectors: Option<i64>,

    /// Override the output path from the config
    #[arg(long)]
    output_path: Option<String>,

    /// Show the request that would be made without sending it
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(e.exit_code());
        }
    };

    let verbose = args.verbose || config.verbose_logging();
    if args.log_json || config.json_logging() {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("📁 Loaded configuration from: {}", args.config);

    if let Some(min) = args.min_connectors {
        config.filter.min_connectors = min;
        tracing::info!("🔧 Minimum connector count overridden to: {}", min);
    }
    if let Some(path) = args.output_path {
        tracing::info!("🔧 Output path overridden to: {}", path);
        config.load.output_path = path;
    }

    let exit_code = app::run(config, args.dry_run).await;
    std::process::exit(exit_code);
}
