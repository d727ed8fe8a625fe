use clap::Parser;
use ev_charging_etl::utils::logger;
use ev_charging_etl::{app, CliConfig};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse().with_env_defaults();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting ev-etl");
    tracing::debug!("CLI config: {:?}", config);

    let dry_run = config.dry_run;
    let exit_code = app::run(config, dry_run).await;
    std::process::exit(exit_code);
}
