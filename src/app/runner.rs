use crate::adapters::{http, LocalStorage};
use crate::core::{etl::EtlEngine, pipeline::StationPipeline, ConfigProvider, PayloadKind};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::Validate;

/// Validates `config`, runs the pipeline once and returns the process exit code.
pub async fn run<C>(config: C, dry_run: bool) -> i32
where
    C: ConfigProvider + Validate,
{
    if let Err(e) = config.validate() {
        report_failure("Configuration validation failed", &e);
        return e.exit_code();
    }

    if dry_run {
        return match print_dry_run(&config) {
            Ok(()) => 0,
            Err(e) => {
                report_failure("Dry run failed", &e);
                e.exit_code()
            }
        };
    }

    let pipeline = StationPipeline::new(LocalStorage::default(), config);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(summary) => {
            let marker = match summary.source {
                PayloadKind::Json => "⚠️",
                _ => "✅",
            };
            println!("{} {}", marker, summary);
            0
        }
        Err(e) => {
            report_failure("ETL process failed", &e);
            e.exit_code()
        }
    }
}

pub fn report_failure(context: &str, e: &EtlError) {
    tracing::error!("❌ {}: {} (Category: {:?})", context, e, e.category());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
}

fn print_dry_run<C: ConfigProvider>(config: &C) -> Result<()> {
    println!("🔍 Dry Run Analysis:");
    println!("  Request: GET {}", http::redacted_stations_url(config)?);
    println!("  Timeout: {:?}", config.timeout());
    println!(
        "  Filter: '{}' connectors >= {} ({:?})",
        config.connector_pattern(),
        config.min_connectors(),
        config.key_detection()
    );
    println!("  Output: {}", config.output_path());
    Ok(())
}
