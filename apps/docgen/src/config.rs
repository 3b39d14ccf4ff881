use std::path::PathBuf;

use anyhow::{Context, Result};

/// Harness configuration loaded from environment variables.
/// Nothing is required; every variable has a default.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the input CSV files when no explicit path is given.
    pub data_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            data_dir: optional_env("DOCGEN_DATA_DIR")?
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            rust_log: optional_env("RUST_LOG")?.unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Path of `file_name` under the data directory, unless `explicit` overrides it.
    pub fn data_file(&self, explicit: Option<PathBuf>, file_name: &str) -> PathBuf {
        explicit.unwrap_or_else(|| self.data_dir.join(file_name))
    }
}

fn optional_env(key: &str) -> Result<Option<String>> {
    match std::env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => {
            Err(e).with_context(|| format!("Environment variable '{key}' is not valid unicode"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dir: &str) -> Config {
        Config {
            data_dir: PathBuf::from(dir),
            rust_log: "info".to_string(),
        }
    }

    #[test]
    fn test_data_file_defaults_under_data_dir() {
        let cfg = config("/data");
        assert_eq!(
            cfg.data_file(None, "offers.csv"),
            PathBuf::from("/data/offers.csv")
        );
    }

    #[test]
    fn test_data_file_explicit_wins() {
        let cfg = config("/data");
        assert_eq!(
            cfg.data_file(Some(PathBuf::from("other.csv")), "offers.csv"),
            PathBuf::from("other.csv")
        );
    }
}
