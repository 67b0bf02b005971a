use std::backtrace::Backtrace;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `ragdocs_web=debug`.
pub const LOG_ENV: &str = "RAGDOCS_LOG";
const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber. An explicit `--log-level` wins over
/// `RAGDOCS_LOG`; logs go to stderr so command output stays clean.
pub fn init(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|err| {
            eprintln!("Warning: invalid --log-level `{level}` ({err}); using `{DEFAULT_FILTER}`");
            EnvFilter::new(DEFAULT_FILTER)
        }),
        None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Route panics through `tracing`, tagged with the command that was running.
pub fn setup_panic_hook(command: &'static str) {
    std::panic::set_hook(Box::new(move |info| {
        let payload = info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("non-string panic payload");
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown location".to_string());

        tracing::error!(
            command,
            %location,
            "ragdocs {command} panicked: {message}\n{}",
            Backtrace::capture()
        );
    }));
}
