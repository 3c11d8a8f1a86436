use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, ScanError};

pub const DEFAULT_MIN_RESPONSE_TIME: f64 = 20.0;
pub const DEFAULT_MAX_RESPONSE_TIME: f64 = 22.0;
pub const DEFAULT_REQUEST_TIMEOUT: f64 = 60.0;
pub const DEFAULT_CONNECT_TIMEOUT: f64 = 10.0;

/// Run configuration. Built once at startup and shared read-only with every probe task.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    /// Cookie threaded through to every probe request.
    pub cookie: Option<String>,
    /// Attach `cookie` as a `Cookie` header. Off unless asked for.
    pub send_cookie: bool,
    /// Inclusive lower bound of the vulnerable window, in seconds.
    pub min_response_time: f64,
    /// Exclusive upper bound of the vulnerable window, in seconds.
    pub max_response_time: f64,
    /// Report non-vulnerable responses as informational verdicts.
    pub verbose: bool,
    pub request_timeout_secs: f64,
    pub connect_timeout_secs: f64,
    /// Cap on simultaneous probes. `None` launches every pair at once.
    pub concurrency: Option<usize>,
    /// Stop launching payloads for a URL once one of them was found vulnerable.
    pub early_exit: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            cookie: None,
            send_cookie: false,
            min_response_time: DEFAULT_MIN_RESPONSE_TIME,
            max_response_time: DEFAULT_MAX_RESPONSE_TIME,
            verbose: false,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT,
            concurrency: None,
            early_exit: false,
        }
    }
}

impl RunConfig {
    /// Load a base configuration from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| ScanError::config("config", path, e))?;
        serde_json::from_str(&data)
            .map_err(|e| ScanError::invalid(format!("{}: {}", path.display(), e)))
    }

    pub fn validate(&self) -> Result<()> {
        let times = [
            ("min response time", self.min_response_time),
            ("max response time", self.max_response_time),
            ("request timeout", self.request_timeout_secs),
            ("connect timeout", self.connect_timeout_secs),
        ];
        for (name, value) in times {
            if !value.is_finite() || value < 0.0 {
                return Err(ScanError::invalid(format!("{} must be a non-negative number, got {}", name, value)));
            }
        }
        if self.min_response_time >= self.max_response_time {
            return Err(ScanError::invalid(format!(
                "min response time {}s must be lower than max response time {}s; \
                 raise -r/--max-response-time or lower -m/--min-response-time",
                self.min_response_time, self.max_response_time
            )));
        }
        if self.request_timeout_secs == 0.0 || self.connect_timeout_secs == 0.0 {
            return Err(ScanError::invalid("timeouts must be greater than zero"));
        }
        if self.concurrency == Some(0) {
            return Err(ScanError::invalid("concurrency must be at least 1"));
        }
        if self.request_timeout_secs <= self.max_response_time {
            tracing::warn!(
                timeout = self.request_timeout_secs,
                max = self.max_response_time,
                "request timeout does not exceed the max response time; slow responses will surface as errors"
            );
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.connect_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = RunConfig::default();
        assert_eq!(cfg.min_response_time, 20.0);
        assert_eq!(cfg.max_response_time, 22.0);
        assert!(cfg.concurrency.is_none());
        assert!(!cfg.early_exit);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_window() {
        let cfg = RunConfig { min_response_time: 22.0, max_response_time: 22.0, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(ScanError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_bad_numbers() {
        let cfg = RunConfig { max_response_time: f64::NAN, ..Default::default() };
        assert!(cfg.validate().is_err());
        let cfg = RunConfig { min_response_time: -1.0, ..Default::default() };
        assert!(cfg.validate().is_err());
        let cfg = RunConfig { concurrency: Some(0), ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_window_error_names_flags() {
        let cfg = RunConfig { max_response_time: 20.0, ..Default::default() };
        let msg = cfg.validate().unwrap_err().to_string();
        assert!(msg.contains("-r/--max-response-time"));
        assert!(msg.contains("-m/--min-response-time"));
        assert!(msg.contains("20"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"max_response_time": 30.0, "concurrency": 8}}"#).unwrap();
        let cfg = RunConfig::from_json_file(f.path()).unwrap();
        assert_eq!(cfg.max_response_time, 30.0);
        assert_eq!(cfg.min_response_time, 20.0);
        assert_eq!(cfg.concurrency, Some(8));
    }

    #[test]
    fn test_malformed_json_is_invalid_config() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "not json").unwrap();
        assert!(matches!(RunConfig::from_json_file(f.path()), Err(ScanError::InvalidConfig(_))));
    }
}
