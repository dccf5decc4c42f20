//! JSON reporter
//!
//! Outputs the full FrequencyReport as pretty-printed JSON.
//! The bundle carries no timestamp, so identical input gives identical bytes.

use crate::models::FrequencyReport;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &FrequencyReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::{empty_report, test_report};

    #[test]
    fn test_json_render_valid() {
        let report = test_report();
        let json_str = render(&report).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["total"], 20);
        assert_eq!(parsed["statistics"]["mode"], "Park");
        assert_eq!(parsed["frequency_table"][0]["label"], "Park");
        assert_eq!(parsed["frequency_table"][0]["count"], 10);
        assert_eq!(parsed["outliers"][0]["label"], "Zoo");
    }

    #[test]
    fn test_json_parses_back_into_report() {
        let report = test_report();
        let json_str = render(&report).expect("render JSON");
        let back: FrequencyReport = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(back.frequency_table, report.frequency_table);
        assert_eq!(back.outliers, report.outliers);
    }

    #[test]
    fn test_json_empty_report() {
        let json_str = render(&empty_report()).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["outliers"].as_array().expect("outliers array").len(), 0);
        assert!(parsed["statistics"]["mode"].is_null());
    }
}
