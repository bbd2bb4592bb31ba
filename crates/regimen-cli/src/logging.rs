use tracing_subscriber::EnvFilter;

/// Installs the stderr log subscriber.
///
/// Each `-v` raises the level (info, debug, trace). Without `-v`, `RUST_LOG`
/// is honored and falls back to warnings only.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    };
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
