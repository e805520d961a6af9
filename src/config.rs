/// Detection parameters and service configuration.
///
/// Two layers live here: `DetectionConfig`, the per-request detection
/// parameters with their validation, and `ServiceConfig`, the service-level
/// settings loaded once at startup from an optional TOML file with
/// environment overrides for the listen address.

use std::env;
use std::fs;

use serde::Deserialize;

use crate::model::ConfigError;

// ---------------------------------------------------------------------------
// Detection parameters
// ---------------------------------------------------------------------------

/// Smallest window that still yields a meaningful standard deviation.
pub const MIN_WINDOW_LEN: usize = 3;

/// Default window length for ad hoc calls.
pub const DEFAULT_WINDOW_LEN: usize = 10;

/// Default stride for ad hoc calls.
pub const DEFAULT_STRIDE: usize = 1;

/// Default z-score threshold, calibrated against the population-σ formula.
pub const DEFAULT_THRESHOLD: f64 = 2.5;

/// Recommended window for the documented 10-minute cadence: 36 points = 6 h.
pub const CADENCE_WINDOW_LEN: usize = 36;

/// Recommended stride for the documented 10-minute cadence: 18 points = 3 h.
pub const CADENCE_STRIDE: usize = 18;

/// Parameters of one detection pass.
///
/// Validated as a whole before any scoring; an invalid combination rejects
/// the whole request, never a partial result.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Window length W, in observations.
    pub window_len: usize,
    /// Step between consecutive window starts, in observations.
    pub stride: usize,
    /// Z-score magnitude above which a point is flagged.
    pub threshold: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            window_len: DEFAULT_WINDOW_LEN,
            stride: DEFAULT_STRIDE,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl DetectionConfig {
    /// Reject invalid parameters before scoring begins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_len < MIN_WINDOW_LEN {
            return Err(ConfigError::WindowTooShort(self.window_len));
        }
        if self.stride < 1 {
            return Err(ConfigError::StrideTooSmall(self.stride));
        }
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(ConfigError::ThresholdNotPositive(self.threshold));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Service configuration
// ---------------------------------------------------------------------------

/// Settings loaded at startup. Every section and field is optional in the
/// file; omitted values take the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    /// Defaults applied to detection requests that omit parameters.
    pub detection: DetectionConfig,
    pub log: LogConfig,
}

/// Listen address for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Logger settings, consumed by `logging::init_logger`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Minimum level: "debug", "info", "warn" or "error".
    pub level: String,
    /// Optional log file path; console output is always on.
    pub file: Option<String>,
    /// Include timestamps in console output (daemon-style logs).
    pub console_timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            console_timestamps: false,
        }
    }
}

impl ServiceConfig {
    /// Load configuration.
    ///
    /// Reads the TOML file named by `ANOMON_CONFIG` (default `anomon.toml`)
    /// if it exists, then applies `HOST`/`PORT` environment overrides. A
    /// missing file means defaults; a malformed file or port is an error.
    pub fn load() -> Result<Self, String> {
        let path = env::var("ANOMON_CONFIG").unwrap_or_else(|_| "anomon.toml".to_string());
        let mut config = match fs::read_to_string(&path) {
            Ok(text) => Self::parse(&text).map_err(|err| format!("{}: {}", path, err))?,
            Err(_) => ServiceConfig::default(),
        };

        if let Ok(host) = env::var("HOST") {
            config.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| format!("PORT must be a number, got {:?}", port))?;
        }

        Ok(config)
    }

    /// Parse a TOML configuration document.
    pub fn parse(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|err| err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Detection parameter validation -------------------------------------

    #[test]
    fn test_default_detection_config_is_valid() {
        let config = DetectionConfig::default();
        assert_eq!(config.window_len, 10);
        assert_eq!(config.stride, 1);
        assert_eq!(config.threshold, 2.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimum_window_len_is_accepted() {
        let config = DetectionConfig {
            window_len: MIN_WINDOW_LEN,
            ..DetectionConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_window_len_below_minimum_is_rejected() {
        let config = DetectionConfig {
            window_len: 2,
            ..DetectionConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::WindowTooShort(2)));
    }

    #[test]
    fn test_zero_stride_is_rejected() {
        let config = DetectionConfig {
            stride: 0,
            ..DetectionConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::StrideTooSmall(0)));
    }

    #[test]
    fn test_nonpositive_threshold_is_rejected() {
        for threshold in [0.0, -2.5] {
            let config = DetectionConfig {
                threshold,
                ..DetectionConfig::default()
            };
            assert_eq!(
                config.validate(),
                Err(ConfigError::ThresholdNotPositive(threshold)),
                "threshold {} should be rejected",
                threshold
            );
        }
    }

    #[test]
    fn test_nan_threshold_is_rejected() {
        let config = DetectionConfig {
            threshold: f64::NAN,
            ..DetectionConfig::default()
        };
        assert!(config.validate().is_err(), "NaN threshold must not validate");
    }

    #[test]
    fn test_cadence_settings_validate() {
        let config = DetectionConfig {
            window_len: CADENCE_WINDOW_LEN,
            stride: CADENCE_STRIDE,
            threshold: DEFAULT_THRESHOLD,
        };
        assert!(config.validate().is_ok());
    }

    // --- Service configuration parsing ---------------------------------------

    #[test]
    fn test_empty_document_yields_defaults() {
        let config = ServiceConfig::parse("").expect("empty config should parse");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.detection, DetectionConfig::default());
        assert_eq!(config.log.level, "info");
        assert_eq!(config.log.file, None);
    }

    #[test]
    fn test_partial_document_keeps_other_defaults() {
        let config = ServiceConfig::parse(
            "[server]\n\
             port = 9100\n\
             \n\
             [detection]\n\
             window_len = 36\n\
             stride = 18\n",
        )
        .expect("partial config should parse");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.detection.window_len, 36);
        assert_eq!(config.detection.stride, 18);
        assert_eq!(config.detection.threshold, 2.5);
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(ServiceConfig::parse("[server\nport = 9100").is_err());
    }
}
