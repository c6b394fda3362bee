use {
    tracing::Level,
    tracing_subscriber::FmtSubscriber,
};

/// Installs the global subscriber. Function runtime log sink adds timestamps on its own.
pub fn init_logger() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_ansi(false)
        .without_time()
        .init();
}
