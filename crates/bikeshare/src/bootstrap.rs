use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use bikeshare_core::error::BikeshareError;
use bikeshare_data::reader::available_cities;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a CLI level name to an [`EnvFilter`] directive. Unknown names pass
/// through unchanged.
pub fn filter_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" => "error".to_string(),
        _ => log_level.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Output goes to stderr, or to `log_file` (appended, no ANSI colours) when
/// one is given. An unparseable level falls back to `warn`.
pub fn setup_logging(log_level: &str, log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(filter_directive(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, stderr_layer) = match log_file {
        Some(path) => {
            let file = File::options().create(true).append(true).open(path)?;
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            (Some(layer), None)
        }
        None => {
            let layer = fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr);
            (None, Some(layer))
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;

    Ok(())
}

// ── Data-dir discovery ─────────────────────────────────────────────────────────

/// Default places searched for city files, in order: the working directory,
/// then `<platform data dir>/bikeshare`.
pub fn default_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd);
    }
    if let Some(data) = dirs::data_dir() {
        candidates.push(data.join("bikeshare"));
    }
    candidates
}

/// First candidate that holds at least one city file.
pub fn discover_data_dir(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates
        .iter()
        .find(|dir| !available_cities(dir).is_empty())
        .cloned()
}

/// Pick the data directory for this run.
///
/// An explicit `--data-dir` must exist. Without one the default candidates
/// are searched; when none has a city file the working directory is used and
/// loading reports the missing file.
pub fn resolve_data_dir(explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(dir) = explicit {
        if !dir.is_dir() {
            return Err(BikeshareError::DataPathNotFound(dir.to_path_buf()).into());
        }
        return Ok(dir.to_path_buf());
    }

    let candidates = default_candidates();
    match discover_data_dir(&candidates) {
        Some(dir) => Ok(dir),
        None => {
            let fallback = candidates
                .into_iter()
                .next()
                .unwrap_or_else(|| PathBuf::from("."));
            tracing::warn!(
                "No city files found; using {} as data directory",
                fallback.display()
            );
            Ok(fallback)
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ── filter_directive ──────────────────────────────────────────────────────

    #[test]
    fn test_filter_directive_maps_level_names() {
        assert_eq!(filter_directive("DEBUG"), "debug");
        assert_eq!(filter_directive("info"), "info");
        assert_eq!(filter_directive("WARNING"), "warn");
        assert_eq!(filter_directive("ERROR"), "error");
        assert_eq!(filter_directive("trace"), "trace");
    }

    // ── discover_data_dir ─────────────────────────────────────────────────────

    #[test]
    fn test_discover_data_dir_returns_none_when_empty() {
        let a = TempDir::new().expect("tempdir");
        let b = TempDir::new().expect("tempdir");
        let candidates = vec![a.path().to_path_buf(), b.path().to_path_buf()];
        assert!(discover_data_dir(&candidates).is_none());
    }

    #[test]
    fn test_discover_data_dir_skips_dirs_without_city_files() {
        let empty = TempDir::new().expect("tempdir");
        let data = TempDir::new().expect("tempdir");
        std::fs::write(data.path().join("washington.csv"), "").expect("write csv");
        std::fs::write(empty.path().join("boston.csv"), "").expect("write csv");

        let candidates = vec![empty.path().to_path_buf(), data.path().to_path_buf()];
        assert_eq!(
            discover_data_dir(&candidates),
            Some(data.path().to_path_buf())
        );
    }

    #[test]
    fn test_discover_data_dir_prefers_first_match() {
        let first = TempDir::new().expect("tempdir");
        let second = TempDir::new().expect("tempdir");
        std::fs::write(first.path().join("chicago.csv"), "").expect("write csv");
        std::fs::write(second.path().join("chicago.csv"), "").expect("write csv");

        let candidates = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        assert_eq!(
            discover_data_dir(&candidates),
            Some(first.path().to_path_buf())
        );
    }

    // ── resolve_data_dir ──────────────────────────────────────────────────────

    #[test]
    fn test_resolve_data_dir_accepts_existing_explicit_dir() {
        let tmp = TempDir::new().expect("tempdir");
        let dir = resolve_data_dir(Some(tmp.path())).expect("existing dir");
        assert_eq!(dir, tmp.path());
    }

    #[test]
    fn test_resolve_data_dir_rejects_missing_explicit_dir() {
        let tmp = TempDir::new().expect("tempdir");
        let missing = tmp.path().join("nope");
        let err = resolve_data_dir(Some(missing.as_path())).unwrap_err();
        assert!(err.to_string().contains("Data path not found"));
    }

    // ── setup_logging ─────────────────────────────────────────────────────────

    #[test]
    fn test_setup_logging_creates_log_file() {
        let tmp = TempDir::new().expect("tempdir");
        let log = tmp.path().join("bikeshare.log");
        // A global subscriber may already be set by another test; only the
        // file creation is asserted.
        let _ = setup_logging("INFO", Some(&log));
        assert!(log.is_file());
    }
}
