use std::fs;
use std::io;
use std::path::Path;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer};

const DEFAULT_DIRECTIVE: &str = "coop_migrate=info";
const LOG_FILE_PREFIX: &str = "migration.log";

/// A ready-to-install subscriber and the guard flushing its file writer
pub struct LogSetup {
    pub subscriber: Box<dyn Subscriber + Send + Sync>,
    pub guard: Option<WorkerGuard>,
    /// Why the file layer was left out, if it was
    pub file_error: Option<io::Error>,
}

/// Initializes logging: human-readable on stderr, JSON lines in a daily
/// rolling file under `log_dir`.
///
/// The returned guard flushes the file writer when dropped; hold it for the
/// life of the process. Without a writable log directory only the console
/// layer is installed.
pub fn init_logging(log_dir: &Path) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let setup = build_subscriber(filter, log_dir);
    setup.subscriber.init();

    if let Some(e) = setup.file_error {
        tracing::warn!(log_dir = %log_dir.display(), error = %e, "File logging disabled");
    }
    setup.guard
}

pub fn build_subscriber(filter: EnvFilter, log_dir: &Path) -> LogSetup {
    match fs::create_dir_all(log_dir) {
        Ok(()) => {
            let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
            let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
            let file_layer = fmt::layer().json().with_writer(non_blocking_writer);

            let subscriber = tracing_subscriber::registry()
                .with(filter)
                .with(file_layer)
                .with(console_layer());
            LogSetup {
                subscriber: Box::new(subscriber),
                guard: Some(guard),
                file_error: None,
            }
        }
        Err(e) => {
            let subscriber = tracing_subscriber::registry().with(filter).with(console_layer());
            LogSetup {
                subscriber: Box::new(subscriber),
                guard: None,
                file_error: Some(e),
            }
        }
    }
}

fn console_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer().with_writer(io::stderr).with_target(false)
}
