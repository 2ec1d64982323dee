//! Runtime configuration read from the environment.

use std::path::PathBuf;

use crate::ports::FALLBACK_CONFIDENCE;
use crate::GynaiError;

/// Path of the model artifact.
pub const MODEL_PATH_ENV: &str = "GYNAI_MODEL_PATH";
/// Override for the fallback confidence.
pub const FALLBACK_CONFIDENCE_ENV: &str = "GYNAI_FALLBACK_CONFIDENCE";
/// Refuse artifacts that are not pinned by a manifest.
pub const REQUIRE_MANIFEST_ENV: &str = "GYNAI_REQUIRE_MODEL_MANIFEST";
/// `stderr` (default) or `file`.
pub const LOG_MODE_ENV: &str = "GYNAI_LOG_MODE";
/// Log file used when `GYNAI_LOG_MODE=file`.
pub const LOG_FILE_ENV: &str = "GYNAI_LOG_FILE";

const DEFAULT_MODEL_PATH: &str = "models/pcos_model.json";
const DEFAULT_LOG_FILE: &str = "gynai.log";

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogMode {
    Stderr,
    File(PathBuf),
}

/// Pipeline configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub model_path: PathBuf,
    pub fallback_confidence: f64,
    pub require_manifest: bool,
    pub log_mode: LogMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            fallback_confidence: FALLBACK_CONFIDENCE,
            require_manifest: false,
            log_mode: LogMode::Stderr,
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "true" | "TRUE" | "yes" | "YES")
}

impl Config {
    /// Read configuration from process environment variables.
    ///
    /// # Errors
    /// Returns `GynaiError::Config` for unparseable values.
    pub fn from_env() -> Result<Self, GynaiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    ///
    /// # Errors
    /// Returns `GynaiError::Config` for unparseable values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GynaiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(MODEL_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            config.model_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup(FALLBACK_CONFIDENCE_ENV) {
            let value: f64 = raw.trim().parse().map_err(|_| {
                GynaiError::Config(format!("{FALLBACK_CONFIDENCE_ENV} is not a number: {raw:?}"))
            })?;
            if !(0.0..=1.0).contains(&value) {
                return Err(GynaiError::Config(format!(
                    "{FALLBACK_CONFIDENCE_ENV} must be within [0, 1], got {value}"
                )));
            }
            config.fallback_confidence = value;
        }

        config.require_manifest = lookup(REQUIRE_MANIFEST_ENV)
            .map(|v| parse_bool(&v))
            .unwrap_or(false);

        config.log_mode = match lookup(LOG_MODE_ENV).as_deref() {
            None | Some("stderr") | Some("auto") => LogMode::Stderr,
            Some("file") => LogMode::File(PathBuf::from(
                lookup(LOG_FILE_ENV).unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
            )),
            Some(other) => {
                return Err(GynaiError::Config(format!(
                    "{LOG_MODE_ENV} must be 'stderr' or 'file', got {other:?}"
                )))
            }
        };

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).expect("Should parse");
        assert_eq!(config, Config::default());
        assert_eq!(config.fallback_confidence, 0.75);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            (MODEL_PATH_ENV, "/srv/model.json"),
            (FALLBACK_CONFIDENCE_ENV, "0.6"),
            (REQUIRE_MANIFEST_ENV, "yes"),
            (LOG_MODE_ENV, "file"),
            (LOG_FILE_ENV, "/tmp/gynai.log"),
        ]))
        .expect("Should parse");

        assert_eq!(config.model_path, PathBuf::from("/srv/model.json"));
        assert!((config.fallback_confidence - 0.6).abs() < f64::EPSILON);
        assert!(config.require_manifest);
        assert_eq!(config.log_mode, LogMode::File(PathBuf::from("/tmp/gynai.log")));
    }

    #[test]
    fn test_invalid_values() {
        assert!(Config::from_lookup(lookup(&[(FALLBACK_CONFIDENCE_ENV, "high")])).is_err());
        assert!(Config::from_lookup(lookup(&[(FALLBACK_CONFIDENCE_ENV, "1.5")])).is_err());
        assert!(Config::from_lookup(lookup(&[(LOG_MODE_ENV, "syslog")])).is_err());
        let config = Config::from_lookup(lookup(&[(REQUIRE_MANIFEST_ENV, "nope")]))
            .expect("Should parse");
        assert!(!config.require_manifest);
    }
}
