use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use tokio::task_local;
use tracing::Instrument;
use tracing::Level;
use tracing::info_span;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::exception::DevPulseResult;
use crate::exception::Exception;
use crate::exception::Severity;

pub mod id_generator;

task_local! {
    static CURRENT_ACTION_ID: String
}

pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(false) // generally cloud log console doesn't support color
                .with_line_number(true)
                .with_thread_ids(true)
                .with_filter(LevelFilter::INFO),
        )
        .init();
}

/// Log to a file instead of stdout, the terminal UI owns the screen.
pub fn init_with_file(path: &Path) -> DevPulseResult<()> {
    let file = OpenOptions::new().create(true).append(true).open(path).map_err(|err| {
        exception!(
            message = format!("failed to open log file, path={}", path.to_string_lossy()),
            source = err
        )
    })?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(false)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_writer(Arc::new(file))
                .with_filter(LevelFilter::INFO),
        )
        .init();
    Ok(())
}

macro_rules! log_event {
    (level = $level:ident, error_code = $error_code:expr, $($arg:tt)+) => {
        match $level {
            ::tracing::Level::TRACE => {},
            ::tracing::Level::DEBUG => {},
            ::tracing::Level::INFO => {},
            ::tracing::Level::WARN => {
                match $error_code {
                    Some(ref error_code) => ::tracing::warn!(error_code, $($arg)+),
                    None => ::tracing::warn!($($arg)+),
                }
            },
            ::tracing::Level::ERROR => {
                match $error_code {
                    Some(ref error_code) => ::tracing::error!(error_code, $($arg)+),
                    None => ::tracing::error!($($arg)+),
                }
            }
        }
    };
}

pub async fn start_action<T>(action: &str, ref_id: Option<String>, task: T)
where
    T: Future<Output = DevPulseResult<()>>,
{
    let action_id = id_generator::random_id();
    let action_span = info_span!("action", action, action_id, ref_id);
    CURRENT_ACTION_ID
        .scope(
            action_id,
            async {
                let result = task.await;
                if let Err(e) = result {
                    log_exception(&e);
                }
            }
            .instrument(action_span),
        )
        .await;
}

pub(crate) fn log_exception(e: &Exception) {
    let level = match e.severity {
        Severity::Warn => Level::WARN,
        Severity::Error => Level::ERROR,
    };
    let message = &e.message;
    log_event!(
        level = level,
        error_code = e.code,
        backtrace = e.to_string(),
        "{message}"
    );
}

pub fn current_action_id() -> Option<String> {
    CURRENT_ACTION_ID
        .try_with(|current_action_id| Some(current_action_id.clone()))
        .unwrap_or(None)
}
