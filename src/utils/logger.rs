use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Library plus the `ev-etl` and `toml-etl` binary targets.
const QUIET_DIRECTIVES: &str = "ev_charging_etl=info,ev_etl=info,toml_etl=info";
const VERBOSE_DIRECTIVES: &str = "ev_charging_etl=debug,ev_etl=debug,toml_etl=debug,info";

fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_DIRECTIVES
    } else {
        QUIET_DIRECTIVES
    }
}

fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// JSON lines on stdout, for runs driven by a scheduler that collects logs.
pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_cover_binary_targets() {
        for verbose in [false, true] {
            let directives = default_directives(verbose);
            for target in ["ev_charging_etl=", "ev_etl=", "toml_etl="] {
                assert!(directives.contains(target), "{} missing from {}", target, directives);
            }
            assert!(EnvFilter::try_new(directives).is_ok());
        }
        assert!(default_directives(true).contains("ev_etl=debug"));
        assert!(default_directives(false).contains("toml_etl=info"));
    }
}
