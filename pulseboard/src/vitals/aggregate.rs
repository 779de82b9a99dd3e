//! Groups raw records into ordered vital-sign series.
//!
//! Output order is the first-seen order of raw type identifiers, so the
//! same input always produces the same series and point ordering.

use std::collections::HashMap;

use crate::models::{Record, VitalPoint, VitalSeries};
use crate::vitals::display::{display_name, normalize_unit, override_unit};

/// Declarative rule merging two raw series into one synthetic series.
///
/// The primary type's readings become the series points and the secondary
/// type's readings ride along as the secondary sequence. A rule fires when
/// either half is present; the raw pair never surfaces as separate series.
#[derive(Debug, Clone, Copy)]
pub struct PairRule {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
}

pub const PAIR_RULES: &[PairRule] = &[PairRule {
    primary: "HKQuantityTypeIdentifierBloodPressureSystolic",
    secondary: "HKQuantityTypeIdentifierBloodPressureDiastolic",
    label: "Blood Pressure",
    unit: "mmHg",
}];

/// Aggregate a flat sequence of raw records into display-ready series.
///
/// Records without a resolvable type or a finite numeric value contribute
/// nothing; points without a parseable timestamp are dropped. Each group is
/// sorted by ascending timestamp. The merged series from a [`PairRule`]
/// takes the first-seen position of whichever half appeared first.
pub fn aggregate_vitals(records: &[Record]) -> Vec<VitalSeries> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<VitalPoint>> = HashMap::new();
    let mut units: HashMap<String, String> = HashMap::new();

    for record in records {
        let Some(raw_type) = record.record_type() else {
            continue;
        };
        let Some(value) = record.numeric_value() else {
            continue;
        };

        if !groups.contains_key(raw_type) {
            order.push(raw_type.to_string());
            groups.insert(raw_type.to_string(), Vec::new());
        }

        let unit = match override_unit(raw_type) {
            Some(fixed) => Some(fixed.to_string()),
            None => record.unit().and_then(normalize_unit),
        };
        if let Some(unit) = &unit {
            units.entry(raw_type.to_string()).or_insert_with(|| unit.clone());
        }

        let Some(timestamp) = record.timestamp() else {
            continue;
        };
        if let Some(points) = groups.get_mut(raw_type) {
            points.push(VitalPoint {
                timestamp,
                value,
                unit,
                source: record.source().map(str::to_string),
            });
        }
    }

    for points in groups.values_mut() {
        points.sort_by_key(|p| p.timestamp);
    }

    let mut series = Vec::new();
    let mut fired = vec![false; PAIR_RULES.len()];

    for raw_type in &order {
        if let Some(idx) = PAIR_RULES
            .iter()
            .position(|rule| rule.primary == raw_type || rule.secondary == raw_type)
        {
            if !fired[idx] {
                fired[idx] = true;
                let rule = &PAIR_RULES[idx];
                let primary = groups.remove(rule.primary).unwrap_or_default();
                let secondary = groups.remove(rule.secondary).unwrap_or_default();
                if primary.is_empty() && secondary.is_empty() {
                    continue;
                }
                series.push(VitalSeries {
                    label: rule.label.to_string(),
                    unit: Some(rule.unit.to_string()),
                    points: primary,
                    secondary: (!secondary.is_empty()).then_some(secondary),
                });
            }
            continue;
        }

        let Some(points) = groups.remove(raw_type) else {
            continue;
        };
        if points.is_empty() {
            continue;
        }
        series.push(VitalSeries {
            label: display_name(raw_type),
            unit: units.remove(raw_type),
            points,
            secondary: None,
        });
    }

    series
}
