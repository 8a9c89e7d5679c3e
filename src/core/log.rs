use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Logs go to stderr so stdout only carries the conversion result.
///
/// `--verbose` turns on debug output for this crate. Without it `RUST_LOG`
/// alone decides what is logged, and nothing is by default.
pub fn init_logging(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = EnvFilter::new(filter_directives(verbose, rust_log.as_deref()));

    let registry = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(env_filter);

    if verbose {
        let app_filter = Targets::new().with_target("exrate", LevelFilter::DEBUG);
        registry.with(app_filter).init();
    } else {
        registry.init();
    }
}

fn filter_directives(verbose: bool, rust_log: Option<&str>) -> String {
    match rust_log {
        Some(directives) if !directives.trim().is_empty() => directives.to_string(),
        _ if verbose => "debug".to_string(),
        _ => "off".to_string(),
    }
}
