//! Logging Infrastructure
//!
//! `RUST_LOG` overrides the default filter. With a log directory, output goes
//! to a daily rolling file instead of stdout.

use std::path::Path;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "storefront_server=info,tower_http=info";

/// Log file prefix, rotated daily as `storefront-server.YYYY-MM-DD`
const LOG_FILE_PREFIX: &str = "storefront-server";

/// Initialize the global subscriber
///
/// Falls back to stdout when `log_dir` cannot be created.
pub fn init_logger(log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        match std::fs::create_dir_all(log_path) {
            Ok(()) => {
                let file_appender = tracing_appender::rolling::daily(log_path, LOG_FILE_PREFIX);
                subscriber.with_ansi(false).with_writer(file_appender).init();
                return;
            }
            Err(e) => eprintln!("Cannot create log directory {dir}: {e}, logging to stdout"),
        }
    }

    subscriber.init();
}
