use tracing_subscriber::EnvFilter;

pub fn init_logging() {
    // RUST_LOG wins; otherwise info for everything
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
