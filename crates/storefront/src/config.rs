//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `DM_DATA_DIR` - Directory holding the durable cart and session slots
//!   (default: `.digital-market`)
//! - `DM_CATALOG_PATH` - JSON catalog file replacing the built-in catalog
//! - `DM_LATENCY_SCALE` - Multiplier for simulated network latency
//!   (default: 1.0, `0` disables delays)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".digital-market";
const MAX_LATENCY_SCALE: f64 = 100.0;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory for the file-backed durable store
    pub data_dir: PathBuf,
    /// Catalog file overriding the built-in catalog
    pub catalog_path: Option<PathBuf>,
    /// Simulated latency for each mock service call
    pub latency: LatencyProfile,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<SecretString>,
    /// Sentry environment name (e.g. "development")
    pub sentry_environment: Option<String>,
}

/// Simulated network delay per mock service operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub list_products: Duration,
    pub get_product: Duration,
    pub login: Duration,
    pub signup: Duration,
    pub create_order: Duration,
}

impl LatencyProfile {
    /// Delays approximating a slow remote backend.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            list_products: Duration::from_millis(500),
            get_product: Duration::from_millis(300),
            login: Duration::from_millis(800),
            signup: Duration::from_millis(1000),
            create_order: Duration::from_millis(1500),
        }
    }

    /// No delays at all.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            list_products: Duration::ZERO,
            get_product: Duration::ZERO,
            login: Duration::ZERO,
            signup: Duration::ZERO,
            create_order: Duration::ZERO,
        }
    }

    /// Every delay multiplied by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        let scale = |d: Duration| d.mul_f64(factor);
        Self {
            list_products: scale(self.list_products),
            get_product: scale(self.get_product),
            login: scale(self.login),
            signup: scale(self.signup),
            create_order: scale(self.create_order),
        }
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self::standard()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup("DM_DATA_DIR")
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);
        let catalog_path = lookup("DM_CATALOG_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let latency = match lookup("DM_LATENCY_SCALE") {
            Some(raw) => LatencyProfile::standard().scaled(parse_latency_scale(&raw)?),
            None => LatencyProfile::standard(),
        };

        Ok(Self {
            data_dir,
            catalog_path,
            latency,
            sentry_dsn: lookup("SENTRY_DSN")
                .filter(|v| !v.is_empty())
                .map(SecretString::from),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Configuration for tests and embedding: in-place data dir, no delays.
    #[must_use]
    pub fn instant(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            catalog_path: None,
            latency: LatencyProfile::instant(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a non-negative, finite latency multiplier.
fn parse_latency_scale(raw: &str) -> Result<f64, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("DM_LATENCY_SCALE".to_owned(), reason);

    let factor = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| invalid(e.to_string()))?;

    if !factor.is_finite() || !(0.0..=MAX_LATENCY_SCALE).contains(&factor) {
        return Err(invalid(format!(
            "must be between 0 and {MAX_LATENCY_SCALE} (got {raw})"
        )));
    }
    Ok(factor)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".digital-market"));
        assert!(config.catalog_path.is_none());
        assert_eq!(config.latency, LatencyProfile::standard());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_latency_scale_zero_disables_delays() {
        let config = config_from(&[("DM_LATENCY_SCALE", "0")]).unwrap();
        assert_eq!(config.latency, LatencyProfile::instant());
    }

    #[test]
    fn test_latency_scale_halves() {
        let config = config_from(&[("DM_LATENCY_SCALE", "0.5")]).unwrap();
        assert_eq!(config.latency.create_order, Duration::from_millis(750));
    }

    #[test]
    fn test_latency_scale_rejects_garbage() {
        for raw in ["fast", "-1", "inf", "NaN", "1e9"] {
            let err = config_from(&[("DM_LATENCY_SCALE", raw)]).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "DM_LATENCY_SCALE"));
        }
    }

    #[test]
    fn test_paths_and_sentry() {
        let config = config_from(&[
            ("DM_DATA_DIR", "/tmp/dm"),
            ("DM_CATALOG_PATH", "catalog.json"),
            ("SENTRY_DSN", "https://key@sentry.example.com/1"),
        ])
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/dm"));
        assert_eq!(config.catalog_path, Some(PathBuf::from("catalog.json")));
        assert_eq!(
            config.sentry_dsn.as_ref().map(|s| s.expose_secret().to_owned()),
            Some("https://key@sentry.example.com/1".to_owned())
        );
    }

    #[test]
    fn test_debug_redacts_sentry_dsn() {
        let config = config_from(&[("SENTRY_DSN", "https://topsecretkey@sentry.example.com/1")]).unwrap();
        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("topsecretkey"));
    }
}
