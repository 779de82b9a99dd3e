//! Builds the bounded text block that grounds the assistant in the
//! currently loaded data. The block is prepended as a system message to
//! every chat request; the caps keep prompt size bounded while leaving
//! enough detail to answer data-specific questions.

use serde_json::Value;

use crate::config::ChatConfig;
use crate::models::{Record, SleepSession, VitalSeries};

/// Which data domain the dashboard is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveTab {
    #[default]
    Records,
    Sleep,
    Vitals,
}

/// Caps applied when summarizing loaded data.
#[derive(Debug, Clone, Copy)]
pub struct ContextLimits {
    pub max_record_rows: usize,
    pub max_series: usize,
    pub max_points: usize,
}

impl Default for ContextLimits {
    fn default() -> Self {
        Self {
            max_record_rows: 50,
            max_series: 12,
            max_points: 50,
        }
    }
}

impl From<&ChatConfig> for ContextLimits {
    fn from(config: &ChatConfig) -> Self {
        Self {
            max_record_rows: config.max_record_rows,
            max_series: config.max_series,
            max_points: config.max_points,
        }
    }
}

/// Summarize the active tab's loaded data as one bounded text block.
pub fn build_context(
    tab: ActiveTab,
    records: &[Record],
    sessions: &[SleepSession],
    series: &[VitalSeries],
    limits: ContextLimits,
) -> String {
    match tab {
        ActiveTab::Records => records_context(records, limits),
        ActiveTab::Sleep => sleep_context(sessions),
        ActiveTab::Vitals => vitals_context(series, limits),
    }
}

fn records_context(records: &[Record], limits: ContextLimits) -> String {
    if records.is_empty() {
        return "No health records are currently loaded.".to_string();
    }

    let mut types: Vec<&str> = Vec::new();
    for record in records {
        if let Some(t) = record.record_type() {
            if !types.contains(&t) {
                types.push(t);
            }
        }
    }

    let mut out = format!(
        "Loaded {} health records across {} distinct types: {}.\n",
        records.len(),
        types.len(),
        types.join(", ")
    );
    out.push_str(&format!(
        "Sample rows (up to {}):\n",
        limits.max_record_rows
    ));
    for record in records.iter().take(limits.max_record_rows) {
        out.push_str(&format!(
            "- {} value={} start={}\n",
            record.record_type().unwrap_or("unknown"),
            field_text(record, "value"),
            field_text(record, "startDate"),
        ));
    }
    out
}

fn sleep_context(sessions: &[SleepSession]) -> String {
    if sessions.is_empty() {
        return "No sleep sessions are currently loaded.".to_string();
    }

    let mut out = format!("Loaded {} sleep sessions.\n", sessions.len());
    for session in sessions {
        out.push_str(&format!(
            "Session {} to {}: {:.0} min in bed, {:.0} min asleep, {:.0} min awake, {} awakenings.\n",
            session.start_date,
            session.end_date,
            session.duration / 60.0,
            session.asleep_duration / 60.0,
            session.awake_duration / 60.0,
            session.awakenings,
        ));
        for segment in &session.segments {
            out.push_str(&format!(
                "  {} {:.0} min ({} to {})\n",
                segment.stage,
                segment.duration / 60.0,
                segment.start_date,
                segment.end_date,
            ));
        }
    }
    out
}

fn vitals_context(series: &[VitalSeries], limits: ContextLimits) -> String {
    if series.is_empty() {
        return "No vital-sign series are currently loaded.".to_string();
    }

    let mut out = format!("Loaded {} vital-sign series.\n", series.len());
    for s in series.iter().take(limits.max_series) {
        let unit = s.unit.as_deref().unwrap_or("");
        out.push_str(&format!(
            "{} ({} points{}{}):\n",
            s.label,
            s.points.len(),
            if unit.is_empty() { "" } else { ", " },
            unit,
        ));
        let recent = s.points.iter().rev().take(limits.max_points);
        for point in recent.collect::<Vec<_>>().into_iter().rev() {
            out.push_str(&format!("  {} {}\n", point.timestamp.to_rfc3339(), point.value));
        }
        if let Some(secondary) = &s.secondary {
            out.push_str("  Secondary readings:\n");
            let recent = secondary.iter().rev().take(limits.max_points);
            for point in recent.collect::<Vec<_>>().into_iter().rev() {
                out.push_str(&format!(
                    "    {} {}\n",
                    point.timestamp.to_rfc3339(),
                    point.value
                ));
            }
        }
    }
    out
}

fn field_text(record: &Record, key: &str) -> String {
    match record.0.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(value) => value.to_string(),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use crate::models::VitalPoint;

    fn record(i: usize) -> Record {
        serde_json::from_value(json!({
            "type": "HKQuantityTypeIdentifierStepCount",
            "value": i.to_string(),
            "startDate": "2024-01-01 08:00:00 -0700",
        }))
        .expect("record")
    }

    fn point(day: u32, value: f64) -> VitalPoint {
        VitalPoint {
            timestamp: Utc.with_ymd_and_hms(2024, 1, day, 8, 0, 0).unwrap(),
            value,
            unit: None,
            source: None,
        }
    }

    #[test]
    fn records_context_caps_sample_rows() {
        let records: Vec<Record> = (0..80).map(record).collect();
        let context = build_context(
            ActiveTab::Records,
            &records,
            &[],
            &[],
            ContextLimits::default(),
        );
        assert!(context.contains("Loaded 80 health records"));
        assert!(context.contains("1 distinct types"));
        assert_eq!(context.matches("- HKQuantityTypeIdentifier").count(), 50);
    }

    #[test]
    fn vitals_context_caps_series_and_points() {
        let series: Vec<VitalSeries> = (0..15)
            .map(|i| VitalSeries {
                label: format!("Series {i}"),
                unit: None,
                points: (1..=28).map(|d| point(d, f64::from(d))).collect(),
                secondary: None,
            })
            .collect();
        let context = build_context(
            ActiveTab::Vitals,
            &[],
            &[],
            &series,
            ContextLimits {
                max_record_rows: 50,
                max_series: 12,
                max_points: 10,
            },
        );
        assert!(context.contains("Series 0"));
        assert!(context.contains("Series 11"));
        assert!(!context.contains("Series 12"));
        // Truncation keeps the most recent points.
        assert!(context.contains("2024-01-28"));
        assert!(!context.contains("2024-01-18T"));
    }

    #[test]
    fn vitals_secondary_points_are_capped_too() {
        let series = vec![VitalSeries {
            label: "Blood Pressure".to_string(),
            unit: Some("mmHg".to_string()),
            points: (1..=5).map(|d| point(d, 120.0)).collect(),
            secondary: Some((1..=20).map(|d| point(d, 80.0)).collect()),
        }];
        let context = build_context(
            ActiveTab::Vitals,
            &[],
            &[],
            &series,
            ContextLimits {
                max_record_rows: 50,
                max_series: 12,
                max_points: 3,
            },
        );
        assert!(context.contains("Secondary readings"));
        assert!(context.contains("2024-01-20"));
        assert!(!context.contains("2024-01-17"));
    }

    #[test]
    fn sleep_context_includes_full_segment_detail() {
        let sessions: Vec<SleepSession> = serde_json::from_value(json!([{
            "startDate": "2024-01-20T22:58:00-07:00",
            "endDate": "2024-01-21T06:58:00-07:00",
            "duration": 28800.0,
            "asleepDuration": 27000.0,
            "awakeDuration": 1800.0,
            "awakenings": 2,
            "segments": [
                {"stage": "Core", "startDate": "a", "endDate": "b", "duration": 10800.0},
                {"stage": "REM", "startDate": "b", "endDate": "c", "duration": 5400.0}
            ]
        }]))
        .expect("sessions");
        let context = build_context(
            ActiveTab::Sleep,
            &[],
            &sessions,
            &[],
            ContextLimits::default(),
        );
        assert!(context.contains("Loaded 1 sleep sessions"));
        assert!(context.contains("Core 180 min"));
        assert!(context.contains("REM 90 min"));
        assert!(context.contains("2 awakenings"));
    }

    #[test]
    fn empty_domains_produce_explicit_empty_blocks() {
        let limits = ContextLimits::default();
        assert!(build_context(ActiveTab::Records, &[], &[], &[], limits)
            .contains("No health records"));
        assert!(
            build_context(ActiveTab::Sleep, &[], &[], &[], limits).contains("No sleep sessions")
        );
        assert!(build_context(ActiveTab::Vitals, &[], &[], &[], limits)
            .contains("No vital-sign series"));
    }
}
