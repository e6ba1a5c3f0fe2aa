use std::path::PathBuf;

/// Default catalog file list
pub const DEFAULT_RESTAURANT_FILES: [&str; 3] =
    ["sushiro.json", "katsu_midori.json", "yijia_suki_mala.json"];

/// Calculator configuration
///
/// # Environment variables
///
/// Every field can be overridden from the environment (a `.env` file is
/// loaded first when present):
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | KAITEN_CONFIG_DIR | config | directory with restaurant JSON files |
/// | KAITEN_RESTAURANT_FILES | sushiro.json,katsu_midori.json,yijia_suki_mala.json | comma-separated catalog files |
/// | KAITEN_SESSION_FILE | kaiten-calculator-session.json | saved session path |
/// | LOG_LEVEL | info | tracing level |
/// | LOG_DIR | (unset) | rolling log directory |
///
/// # Example
///
/// ```ignore
/// KAITEN_CONFIG_DIR=/srv/kaiten/config LOG_LEVEL=debug cargo test
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the restaurant documents
    pub config_dir: PathBuf,
    /// Restaurant documents to load, in display order
    pub restaurant_files: Vec<String>,
    /// Where the session snapshot is written
    pub session_file: PathBuf,
    /// tracing level filter
    pub log_level: String,
    /// Daily rolling log directory; stdout when unset
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from the environment
    ///
    /// Unset variables fall back to defaults.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            config_dir: std::env::var("KAITEN_CONFIG_DIR")
                .unwrap_or_else(|_| "config".into())
                .into(),
            restaurant_files: std::env::var("KAITEN_RESTAURANT_FILES")
                .ok()
                .map(|v| parse_file_list(&v))
                .filter(|files| !files.is_empty())
                .unwrap_or_else(default_restaurant_files),
            session_file: std::env::var("KAITEN_SESSION_FILE")
                .unwrap_or_else(|_| "kaiten-calculator-session.json".into())
                .into(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
        }
    }

    /// Override the file locations
    ///
    /// Mostly used by tests
    pub fn with_overrides(
        config_dir: impl Into<PathBuf>,
        session_file: impl Into<PathBuf>,
    ) -> Self {
        let mut config = Self::from_env();
        config.config_dir = config_dir.into();
        config.session_file = session_file.into();
        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn default_restaurant_files() -> Vec<String> {
    DEFAULT_RESTAURANT_FILES.iter().map(|f| f.to_string()).collect()
}

/// Split a comma-separated file list, dropping blanks
fn parse_file_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(String::from)
        .collect()
}
