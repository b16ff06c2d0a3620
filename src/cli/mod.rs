pub mod introspect;
pub mod serve;

/// Initialize tracing with the config's log level as the default directive.
/// RUST_LOG overrides it.
pub fn init_tracing(log_level: Option<&str>) {
    let directive = log_level.unwrap_or("info");
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directive));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
