use tracing_appender::non_blocking::WorkerGuard;

/// Environment variable selecting the log level (`error`, `warn`, `info`, `debug` or `trace`)
pub const LOG_ENV_VAR: &str = "MAZEPATH_LOG";
/// Directory the log files are written to
pub const LOG_DIR: &str = "logs";

/// Send `tracing` output to `logs/<file_name>`, since the terminal is taken by the UI.
/// Logs are flushed when the returned guard is dropped, so keep it alive until exit.
pub fn init(file_name: &str) -> WorkerGuard {
    let level = std::env::var(LOG_ENV_VAR)
        .ok()
        .and_then(|s| s.trim().parse::<tracing::Level>().ok())
        .unwrap_or(tracing::Level::INFO);

    let file_appender = tracing_appender::rolling::never(LOG_DIR, file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(level)
        .init();
    guard
}
