//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins over `logging.level`. The interactive player owns the
//! terminal, so it only logs when `logging.file` is set; `scan` logs to stderr.

use std::error::Error;
use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// `from_env` is the raw `RUST_LOG` value. Unparsable directives fall through
/// to the next source.
fn env_filter(from_env: Option<&str>, settings: &LoggingSettings) -> EnvFilter {
    from_env
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(&settings.level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Install the global subscriber. Call once, before any work starts.
pub fn init(settings: &LoggingSettings, interactive: bool) -> Result<(), Box<dyn Error>> {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = env_filter(from_env.as_deref(), settings);
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match (&settings.file, interactive) {
        (Some(path), _) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        (None, false) => builder.with_writer(std::io::stderr).try_init(),
        (None, true) => builder.with_writer(std::io::sink).try_init(),
    };

    result.map_err(|e| -> Box<dyn Error> { e })
}
