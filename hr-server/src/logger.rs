//! Logging Infrastructure
//!
//! `RUST_LOG` controls filtering; `LOG_FORMAT=json` switches to JSON lines
//! for log shippers.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "hr_server=info,tower_http=info,security=info";

/// Initialize the global subscriber
pub fn init_logger() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
