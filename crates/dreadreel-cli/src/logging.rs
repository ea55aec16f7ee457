use anyhow::Result;
use std::io;
use std::io::IsTerminal;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc, writer::BoxMakeWriter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Filter directives for a verbosity count.
/// 0 = info, 1 = debug without the hyper connection chatter, 2+ = trace.
fn default_directives(verbose_level: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose_level {
        0 => "info",
        1 => "debug,hyper::proto::h1=warn,hyper::client::pool=warn",
        _ => "trace",
    }
}

fn build_filter(verbose_level: u8, quiet: bool) -> EnvFilter {
    let directives = default_directives(verbose_level, quiet);
    if quiet {
        // --quiet wins over RUST_LOG
        return EnvFilter::new(directives);
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
}

/// Daily-rotating appender: `dreadreel.log` rotates to `dreadreel.<date>`
fn rolling_appender(log_path: &Path) -> Result<RollingFileAppender> {
    let log_dir = log_path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Log file path has no parent directory"))?;
    std::fs::create_dir_all(log_dir)?;

    let log_filename = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid log filename"))?;
    let log_prefix = log_filename.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(log_filename);

    Ok(RollingFileAppender::new(Rotation::DAILY, log_dir, log_prefix))
}

pub fn init_logging(verbose_level: u8, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let json = std::env::var("RUST_LOG_JSON")
        .map(|v| v == "true")
        .unwrap_or_else(|_| !io::stdout().is_terminal());

    let (writer, ansi) = match log_file {
        Some(path) => (BoxMakeWriter::new(rolling_appender(path)?), false),
        None => (BoxMakeWriter::new(io::stderr), io::stderr().is_terminal()),
    };

    let registry = Registry::default().with(build_filter(verbose_level, quiet));

    if json {
        registry
            .with(fmt::layer().json().with_timer(ChronoUtc::rfc_3339()).with_writer(writer))
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(ansi)
                    .with_writer(writer),
            )
            .try_init()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_by_verbosity() {
        assert_eq!(default_directives(0, false), "info");
        assert!(default_directives(1, false).starts_with("debug,"));
        assert_eq!(default_directives(3, false), "trace");
        assert_eq!(default_directives(2, true), "error");
    }

    #[test]
    fn test_rolling_appender_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("dreadreel.log");
        rolling_appender(&path).unwrap();
        assert!(dir.path().join("logs").is_dir());
    }
}
