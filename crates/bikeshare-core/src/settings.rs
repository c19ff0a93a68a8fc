use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Default number of raw rows shown per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Interactive exploration of US bikeshare trip data
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bikeshare",
    about = "Interactive exploration of US bikeshare trip data",
    version
)]
pub struct Settings {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path (logs go to stderr when omitted)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Raw rows shown per page (1-100)
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u16).range(1..=100))]
    pub page_size: u16,
}

impl Settings {
    /// Parse the process arguments and apply derived overrides.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os().collect())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list.
    pub fn load_from_args(args: Vec<OsString>) -> Self {
        Self::resolve(Settings::parse_from(args))
    }

    /// Fallible variant used where a usage error must not exit the process.
    pub fn try_load_from_args(args: Vec<OsString>) -> Result<Self, clap::Error> {
        Settings::try_parse_from(args).map(Self::resolve)
    }

    pub fn page_size(&self) -> usize {
        usize::from(self.page_size)
    }

    /// `--debug` overrides the log level.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}
