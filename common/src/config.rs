use once_cell::sync::OnceCell;
use std::{env, path::Path};

#[derive(Debug, Clone)]
pub struct Config {
    /// Name shown in the progress log lines of the binary.
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    /// Directory the `grade-export` binary writes documents into when no
    /// `--out-dir` is given.
    pub export_dir: String,
}

static CONFIG: OnceCell<Config> = OnceCell::new();

impl Config {
    /// Loads `env_path` (if it exists) into the process environment and
    /// initializes the global config from it. Later calls return the first value.
    pub fn init(env_path: &str) -> &'static Self {
        CONFIG.get_or_init(|| Self::from_env_file(env_path))
    }

    /// The global config, or `None` before [`Config::init`] has run.
    pub fn get() -> Option<&'static Self> {
        CONFIG.get()
    }

    /// Builds a config from `env_path` plus the current environment without
    /// touching the global instance. Variables already set in the process win
    /// over the file.
    pub fn from_env_file(env_path: &str) -> Self {
        if Path::new(env_path).exists() {
            dotenvy::from_filename(env_path).ok();
        }
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Config {
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "grade-export".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "logs/export.log".into()),
            export_dir: env::var("EXPORT_DIR").unwrap_or_else(|_| "exports".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::tempdir;

    fn clear_vars() {
        for key in ["PROJECT_NAME", "LOG_LEVEL", "LOG_FILE", "EXPORT_DIR"] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_when_unset() {
        clear_vars();
        let config = Config::from_env();
        assert_eq!(config.project_name, "grade-export");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_file, "logs/export.log");
        assert_eq!(config.export_dir, "exports");
    }

    #[test]
    #[serial]
    fn test_reads_env_file() {
        clear_vars();
        let dir = tempdir().unwrap();
        let env_path = dir.path().join(".env");
        fs::write(&env_path, "LOG_LEVEL=debug\nEXPORT_DIR=/tmp/reports\n").unwrap();

        let config = Config::from_env_file(env_path.to_str().unwrap());
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.export_dir, "/tmp/reports");
        assert_eq!(config.project_name, "grade-export");
        clear_vars();
    }

    #[test]
    #[serial]
    fn test_process_env_wins_over_file() {
        clear_vars();
        env::set_var("LOG_LEVEL", "warn");
        let dir = tempdir().unwrap();
        let env_path = dir.path().join(".env");
        fs::write(&env_path, "LOG_LEVEL=trace\n").unwrap();

        let config = Config::from_env_file(env_path.to_str().unwrap());
        assert_eq!(config.log_level, "warn");
        clear_vars();
    }

    #[test]
    #[serial]
    fn test_get_returns_initialized_config() {
        clear_vars();
        env::set_var("PROJECT_NAME", "cohort-reports");
        let initialized = Config::init("/definitely/not/here/.env");
        let fetched = Config::get().expect("initialized");

        assert!(std::ptr::eq(initialized, fetched));
        assert!(std::ptr::eq(fetched, Config::init("/another/.env")));
        clear_vars();
    }

    #[test]
    #[serial]
    fn test_missing_env_file_is_ignored() {
        clear_vars();
        let config = Config::from_env_file("/definitely/not/here/.env");
        assert_eq!(config.export_dir, "exports");
    }
}
