use cacao_core::config::LogConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// # Summary
/// Installs the global tracing subscriber.
///
/// # Logic
/// 1. `RUST_LOG` wins; otherwise `log.level` from config.
/// 2. Always log to stdout. When `log.dir` is set, also write a daily
///    rolling file through a non-blocking writer.
///
/// # Returns
/// The file writer guard; keep it alive until shutdown so buffered lines
/// are flushed.
pub fn init(config: &LogConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match &config.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "cacao.log");
            let (file_writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stdout.and(file_writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
            None
        }
    }
}
