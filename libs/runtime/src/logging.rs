use crate::config::{LoggingConfig, Section};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_subscriber::filter::Targets;

// -------- level helpers --------
fn parse_tracing_level(s: &str) -> Option<tracing::Level> {
    match s.to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        "off" | "none" => None,
        _ => Some(Level::INFO),
    }
}

fn level_filter(s: &str) -> LevelFilter {
    parse_tracing_level(s)
        .map(LevelFilter::from_level)
        .unwrap_or(LevelFilter::OFF)
}

/// File level falls back to the console level when left empty.
fn file_level_filter(section: &Section) -> LevelFilter {
    if section.file_level.trim().is_empty() {
        level_filter(&section.console_level)
    } else {
        level_filter(&section.file_level)
    }
}

// -------- path resolution helpers --------

/// Resolve a log file path against `base_dir` (home_dir).
/// Absolute paths are kept as-is; relative paths are joined with `base_dir`.
fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

// -------- filters --------

/// Console filter: "default" drives the fallback level, every other key is a
/// target prefix with its own level.
fn build_console_targets(cfg: &LoggingConfig) -> Targets {
    let default = cfg
        .get("default")
        .map(|s| level_filter(&s.console_level))
        .unwrap_or(LevelFilter::INFO);

    cfg.iter()
        .filter(|(k, _)| k.as_str() != "default")
        .fold(Targets::new().with_default(default), |targets, (name, s)| {
            targets.with_target(name.clone(), level_filter(&s.console_level))
        })
}

fn build_file_targets(cfg: &LoggingConfig) -> Targets {
    let default = cfg
        .get("default")
        .map(file_level_filter)
        .unwrap_or(LevelFilter::OFF);

    cfg.iter()
        .filter(|(k, _)| k.as_str() != "default")
        .fold(Targets::new().with_default(default), |targets, (name, s)| {
            targets.with_target(name.clone(), file_level_filter(s))
        })
}

/// Daily-rolling appender for the "default" section's file, if configured.
fn build_file_appender(
    cfg: &LoggingConfig,
    base_dir: &Path,
) -> Option<tracing_appender::rolling::RollingFileAppender> {
    let section = cfg.get("default")?;
    if section.file.trim().is_empty() {
        return None;
    }

    let log_path = resolve_log_path(&section.file, base_dir);
    let dir = log_path.parent().unwrap_or(base_dir).to_path_buf();
    let file_name = log_path.file_name()?.to_owned();

    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!(
            "Failed to create log directory '{}': {}",
            dir.to_string_lossy(),
            e
        );
        return None;
    }

    Some(tracing_appender::rolling::daily(dir, file_name))
}

// -------- public init --------

/// Initialize logging from a configuration.
/// - `cfg`: LoggingConfig containing the logging sections
/// - `base_dir`: base directory used to resolve relative log file paths (usually server.home_dir)
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry};

    // Bridge `log` → `tracing` *before* installing the subscriber
    let _ = tracing_log::LogTracer::init();

    if cfg.is_empty() {
        init_default_logging();
        return;
    }

    let ansi = std::io::stdout().is_terminal();
    let console_layer = fmt::layer()
        .with_ansi(ansi)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(build_console_targets(cfg));

    let file_layer = build_file_appender(cfg, base_dir).map(|appender| {
        fmt::layer()
            .json()
            .with_ansi(false)
            .with_target(true)
            .with_level(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_writer(appender)
            .with_filter(build_file_targets(cfg))
    });

    let _ = Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

fn init_default_logging() {
    use tracing_subscriber::fmt;
    let _ = fmt()
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .try_init();
}

// =================== tests ===================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_logging_config;
    use tempfile::tempdir;

    fn section(console: &str, file: &str, file_level: &str) -> Section {
        Section {
            console_level: console.into(),
            file: file.into(),
            file_level: file_level.into(),
        }
    }

    #[test]
    fn test_logging_level_parsing() {
        assert_eq!(parse_tracing_level("trace"), Some(Level::TRACE));
        assert_eq!(parse_tracing_level("DEBUG"), Some(Level::DEBUG));
        assert_eq!(parse_tracing_level("Info"), Some(Level::INFO));
        assert_eq!(parse_tracing_level("warn"), Some(Level::WARN));
        assert_eq!(parse_tracing_level("ERROR"), Some(Level::ERROR));
        assert_eq!(parse_tracing_level("off"), None);
        assert_eq!(parse_tracing_level("none"), None);
        assert_eq!(parse_tracing_level("invalid"), Some(Level::INFO)); // defaults to INFO
    }

    #[test]
    fn test_file_level_falls_back_to_console() {
        assert_eq!(file_level_filter(&section("warn", "x.log", "")), LevelFilter::WARN);
        assert_eq!(
            file_level_filter(&section("warn", "x.log", "trace")),
            LevelFilter::TRACE
        );
        assert_eq!(file_level_filter(&section("off", "x.log", "")), LevelFilter::OFF);
    }

    #[test]
    fn test_console_targets_respect_sections() {
        let mut cfg = default_logging_config();
        cfg.insert("sea_orm".into(), section("warn", "", ""));

        let targets = build_console_targets(&cfg);
        assert!(targets.would_enable("social::domain", &Level::INFO));
        assert!(!targets.would_enable("social::domain", &Level::DEBUG));
        assert!(targets.would_enable("sea_orm::driver", &Level::WARN));
        assert!(!targets.would_enable("sea_orm::driver", &Level::INFO));
    }

    #[test]
    fn test_file_paths_resolved_against_home_dir() {
        let tmp = tempdir().unwrap();
        let base_dir = tmp.path();

        let resolved = resolve_log_path("logs/test.log", base_dir);
        assert!(resolved.starts_with(base_dir));
        assert!(resolved.ends_with("logs/test.log"));

        let abs = base_dir.join("abs.log");
        let kept = resolve_log_path(abs.to_str().unwrap(), Path::new("/elsewhere"));
        assert_eq!(kept, abs);
    }

    #[test]
    fn test_file_appender_creates_parent_dir() {
        let tmp = tempdir().unwrap();
        let mut cfg = LoggingConfig::new();
        cfg.insert("default".into(), section("info", "nested/dir/app.log", "debug"));

        let appender = build_file_appender(&cfg, tmp.path());
        assert!(appender.is_some());
        assert!(tmp.path().join("nested/dir").exists());
    }

    #[test]
    fn test_file_appender_disabled_without_file() {
        let tmp = tempdir().unwrap();
        let mut cfg = LoggingConfig::new();
        cfg.insert("default".into(), section("info", "  ", ""));
        assert!(build_file_appender(&cfg, tmp.path()).is_none());
    }
}
