use serde::Serialize;

use crate::config::RunConfig;
use crate::probe::ProbeOutcome;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VerdictLevel {
    /// Vulnerable response or transport error.
    Alert,
    /// Non-vulnerable response, shown in verbose mode.
    Info,
    /// Non-vulnerable response, not shown.
    Silent,
}

impl VerdictLevel {
    pub fn color_code(&self) -> &str {
        match self {
            VerdictLevel::Alert => "\x1b[1;31m", // Bold Red
            VerdictLevel::Info => "\x1b[1;32m",  // Bold Green
            VerdictLevel::Silent => "",
        }
    }

    pub fn reset_color() -> &'static str {
        "\x1b[0m"
    }
}

/// Classified result of exactly one probe.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Verdict {
    pub target: String,
    pub vulnerable: bool,
    pub level: VerdictLevel,
    pub status: Option<u16>,
    pub elapsed_secs: Option<f64>,
    pub error: Option<String>,
    pub message: String,
}

impl Verdict {
    pub fn is_visible(&self) -> bool {
        self.level != VerdictLevel::Silent
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// `min <= elapsed < max`
pub fn within_window(elapsed_secs: f64, config: &RunConfig) -> bool {
    elapsed_secs >= config.min_response_time && elapsed_secs < config.max_response_time
}

pub fn is_vulnerable(status: u16, elapsed_secs: f64, config: &RunConfig) -> bool {
    status == 200 && within_window(elapsed_secs, config)
}

/// Turn a probe outcome into a verdict. Pure: depends on nothing but the
/// outcome and the configuration.
pub fn classify(outcome: &ProbeOutcome, config: &RunConfig) -> Verdict {
    let target = outcome.target.clone();
    match &outcome.result {
        Err(e) => Verdict {
            message: format!("URL {} - Error: {}", target, e),
            target,
            vulnerable: false,
            level: VerdictLevel::Alert,
            status: None,
            elapsed_secs: None,
            error: Some(e.description.clone()),
        },
        Ok(timing) => {
            let vulnerable = is_vulnerable(timing.status, timing.elapsed_secs, config);
            let (level, message) = if vulnerable {
                (VerdictLevel::Alert, format!("URL {} - {:.2} seconds - Vulnerable", target, timing.elapsed_secs))
            } else if config.verbose {
                (VerdictLevel::Info, format!("URL {} - {:.2} seconds", target, timing.elapsed_secs))
            } else {
                (VerdictLevel::Silent, format!("URL {} - {:.2} seconds", target, timing.elapsed_secs))
            };
            Verdict {
                target,
                vulnerable,
                level,
                status: Some(timing.status),
                elapsed_secs: Some(timing.elapsed_secs),
                error: None,
                message,
            }
        }
    }
}
