use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use env_logger::{Builder, Target};
use log::LevelFilter;

use crate::error::{FlowLogError, Result};

/// Where log lines end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Append to a log file, created if missing.
    File(PathBuf),
    Stderr,
}

pub fn parse_level(level: &str) -> Result<LevelFilter> {
    LevelFilter::from_str(level.trim())
        .map_err(|_| FlowLogError::Config(format!("Unknown log level '{}'", level)))
}

/// Install the process-wide `env_logger` backend.
///
/// Lines are laid out as `<timestamp> - <target> - <LEVEL> - <message>`.
/// `RUST_LOG` still overrides `level` when set.
pub fn init_logging(target: &LogTarget, level: LevelFilter) -> Result<()> {
    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {} - {}",
                buf.timestamp_millis(),
                record.target(),
                record.level(),
                record.args()
            )
        });

    match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    FlowLogError::Config(format!(
                        "Cannot open log file '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        LogTarget::Stderr => {
            builder.target(Target::Stderr);
        }
    }

    builder
        .try_init()
        .map_err(|e| FlowLogError::Config(format!("Logger already initialised: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_level(" WARN ").unwrap(), LevelFilter::Warn);
        assert!(matches!(parse_level("loud"), Err(FlowLogError::Config(_))));
    }
}
