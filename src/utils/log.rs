use std::fs::File;
use std::io::stderr;
use std::path::PathBuf;
use std::sync::{LazyLock, Mutex};

use chrono::Local;
use miette::{Context, IntoDiagnostic};
use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::NonBlocking;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, reload, reload::Handle,
    util::SubscriberInitExt,
};

const LOG_DIR: &str = "/tmp/arbiter_logs";

/// A reloadable per-layer filter, type-erased so both layers can live in one
/// static regardless of their subscriber type parameters.
pub trait LogHandle: Send + Sync {
    fn set_filter(&self, new_filter: EnvFilter) -> miette::Result<()>;
}

impl<S> LogHandle for Handle<EnvFilter, S>
where
    S: tracing::Subscriber + Send + Sync + 'static,
{
    fn set_filter(&self, new_filter: EnvFilter) -> miette::Result<()> {
        self.modify(|current| *current = new_filter)
            .into_diagnostic()
    }
}

pub struct LogHandles {
    console_handle: Mutex<Box<dyn LogHandle>>,
    file_handle: Mutex<Box<dyn LogHandle>>,
}

/// Timestamped log file under [`LOG_DIR`], wrapped in a non-blocking writer.
/// The flush guard is leaked; logging stays alive for the whole process.
fn file_writer() -> NonBlocking {
    let dir = PathBuf::from(LOG_DIR);
    if !dir.exists() {
        std::fs::create_dir(&dir).expect("Failed to create log directory");
    }
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let path = dir.join(format!("arbiter_{timestamp}.log"));
    let log_file = File::create(&path)
        .unwrap_or_else(|_| panic!("Failed to create log file: {}", path.display()));

    let (writer, guard) = tracing_appender::non_blocking(log_file);
    std::mem::forget(guard);
    writer
}

static LOG_HANDLES: LazyLock<LogHandles> = LazyLock::new(|| {
    #[cfg(feature = "dev-tools")]
    color_backtrace::install();

    // Console layer, INFO by default, reloadable.
    let console_filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();
    let (console_filter, console_handle) = reload::Layer::new(console_filter);
    let console_layer = fmt::layer()
        .without_time()
        .with_writer(stderr)
        .with_filter(console_filter);

    // File layer starts OFF; toggle_file_logging flips it on.
    let file_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::OFF.into())
        .from_env_lossy();
    let (file_filter, file_handle) = reload::Layer::new(file_filter);
    let file_layer = fmt::layer()
        .with_writer(file_writer())
        .with_ansi(false)
        .with_filter(file_filter);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    LogHandles {
        console_handle: Mutex::new(Box::new(console_handle)),
        file_handle: Mutex::new(Box::new(file_handle)),
    }
});

pub fn set_log_level(level: Level) -> miette::Result<()> {
    let new_filter = EnvFilter::new(level.to_string());

    LOG_HANDLES
        .console_handle
        .lock()
        .unwrap()
        .set_filter(new_filter)
        .with_context(|| format!("Failed to modify log filter to level: {level}"))
}

pub fn toggle_file_logging(enable: bool) -> miette::Result<()> {
    let new_filter = if enable {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("off")
    };

    LOG_HANDLES
        .file_handle
        .lock()
        .unwrap()
        .set_filter(new_filter)
        .context("Failed to modify log filter")
}

/// Initialize tracing and backtrace
pub fn init() {
    LazyLock::force(&LOG_HANDLES);
}
