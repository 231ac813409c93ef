use tracing_subscriber::EnvFilter;

/// Initialize tracing for the binaries.
///
/// Verbosity 0 -> warn, 1 -> info, 2 -> debug, 3+ -> trace. `RUST_LOG`
/// overrides it when set.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("timetable_tool={level},cli={level},http={level}")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
