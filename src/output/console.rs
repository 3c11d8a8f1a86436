use std::time::Duration;

use crate::classify::{Verdict, VerdictLevel};
use crate::concurrent::DispatchSummary;

/// Console line for a verdict, `None` for silent ones.
pub fn format_verdict(v: &Verdict, color: bool) -> Option<String> {
    if !v.is_visible() {
        return None;
    }
    if color {
        Some(format!("{}{}{}", v.level.color_code(), v.message, VerdictLevel::reset_color()))
    } else {
        Some(v.message.clone())
    }
}

pub fn format_summary(s: &DispatchSummary, wall: Duration) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{}\n", "-".repeat(60)));
    out.push_str(&format!("[*] Pairs: {} planned, {} dispatched, {} skipped\n", s.planned, s.dispatched, s.skipped));
    out.push_str(&format!("[!] Vulnerable: {}\n", s.vulnerable));
    out.push_str(&format!("[!] Errors: {}\n", s.errors));
    if s.panicked > 0 {
        out.push_str(&format!("[!] Crashed probes: {}\n", s.panicked));
    }
    out.push_str(&format!("[~] Duration: {:.2}s", wall.as_secs_f64()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::config::RunConfig;
    use crate::probe::ProbeOutcome;

    #[test]
    fn test_alert_colored_red() {
        let v = classify(&ProbeOutcome::response("http://t/x", 21.0, 200), &RunConfig::default());
        let line = format_verdict(&v, true).unwrap();
        assert!(line.starts_with("\x1b[1;31m"));
        assert!(line.ends_with("\x1b[0m"));
        assert_eq!(format_verdict(&v, false).unwrap(), "URL http://t/x - 21.00 seconds - Vulnerable");
    }

    #[test]
    fn test_silent_not_printed() {
        let v = classify(&ProbeOutcome::response("http://t/x", 1.0, 200), &RunConfig::default());
        assert!(format_verdict(&v, true).is_none());
    }

    #[test]
    fn test_summary_lists_counts() {
        let s = DispatchSummary { planned: 4, dispatched: 3, skipped: 1, completed: 3, vulnerable: 1, errors: 2, panicked: 0 };
        let text = format_summary(&s, Duration::from_millis(1500));
        assert!(text.contains("4 planned, 3 dispatched, 1 skipped"));
        assert!(text.contains("Vulnerable: 1"));
        assert!(text.contains("1.50s"));
        assert!(!text.contains("Crashed"));
    }
}
