use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the tracing subscriber once for the whole process.
/// Respects `RUST_LOG` when set; otherwise logs at `info` with the
/// mongodb driver capped at `warn` to keep topology chatter out of
/// request logs. Writes compact output to stdout.
pub fn init_logging_default() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,mongodb=warn"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(|| io::stdout())
        .try_init();
}
