use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use std::{
    fs,
    io::{stderr, IsTerminal},
};
use tracing::debug;
use tracing_appender::rolling;
use tracing_subscriber::{
    fmt::{self, format::debug_fn},
    prelude::*,
    registry, EnvFilter,
};

use crate::settings::consts::{
    APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, DEFAULT_LOG_LEVEL, FILE_LOG_DIRECTIVES, LOG_FILE,
};

/// Console layer on stderr filtered by `RUST_LOG`, JSON layer in the data directory recording
/// every qrgen event.
///
/// stdout is left to the interactive menu and to `generate`, which prints the written path.
pub fn init_logger() -> Result<()> {
    let project_dirs = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
        .ok_or_else(|| anyhow!("Could not determine project directories"))?;

    let directory = project_dirs.data_dir();
    fs::create_dir_all(directory).with_context(|| {
        format!("Failed to create log directory: {}", directory.display())
    })?;

    let env_filter = console_filter();

    let file_appender = rolling::never(directory, LOG_FILE);

    let console_layer = fmt::layer()
        .with_writer(stderr)
        .with_ansi(IsTerminal::is_terminal(&stderr()))
        .with_level(true)
        .with_target(false)
        .without_time()
        .compact()
        .fmt_fields({
            debug_fn(move |writer, field, value| {
                // paths and levels travel as fields, keep them on the console line
                match field.name() {
                    "message" => write!(writer, "{:?}", value),
                    name => write!(writer, " {name}={:?}", value),
                }
            })
        })
        .with_filter(env_filter);

    let json_layer = fmt::layer()
        .json()
        .with_writer(file_appender)
        .with_target(true)
        .with_level(true)
        .flatten_event(true)
        .with_filter(file_filter());

    registry().with(console_layer).with(json_layer).init();

    debug!(log_file = %directory.join(LOG_FILE).display(), "Logger initialised");
    Ok(())
}

fn console_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

fn file_filter() -> EnvFilter {
    EnvFilter::new(FILE_LOG_DIRECTIVES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_file_filter_records_our_traces() {
        assert_eq!(file_filter().max_level_hint(), Some(LevelFilter::TRACE));
        let directives = file_filter().to_string();
        assert!(directives.contains("qrgen_core=trace"));
        assert!(directives.contains("qrgen_cli=trace"));
    }
}
