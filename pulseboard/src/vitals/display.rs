//! Display-name and unit normalization tables for vital-sign types.

/// Types whose unit is fixed regardless of what individual records claim.
const UNIT_OVERRIDES: &[(&str, &str)] = &[
    ("HKQuantityTypeIdentifierHeartRate", "bpm"),
    ("HKQuantityTypeIdentifierRestingHeartRate", "bpm"),
    ("HKQuantityTypeIdentifierWalkingHeartRateAverage", "bpm"),
    ("HKQuantityTypeIdentifierBloodPressureSystolic", "mmHg"),
    ("HKQuantityTypeIdentifierBloodPressureDiastolic", "mmHg"),
    ("HKQuantityTypeIdentifierRespiratoryRate", "breaths/min"),
];

/// Raw unit spellings seen in exports, mapped to display forms.
const UNIT_SYNONYMS: &[(&str, &str)] = &[
    ("count/min", "bpm"),
    ("bpm", "bpm"),
    ("mmhg", "mmHg"),
    ("mg/dl", "mg/dL"),
    ("mmol/l", "mmol/L"),
    ("degf", "°F"),
    ("degc", "°C"),
    ("ml/min·kg", "mL/min·kg"),
];

const DISPLAY_NAMES: &[(&str, &str)] = &[
    ("HKQuantityTypeIdentifierHeartRate", "Heart Rate"),
    ("HKQuantityTypeIdentifierRestingHeartRate", "Resting Heart Rate"),
    ("HKQuantityTypeIdentifierWalkingHeartRateAverage", "Walking Heart Rate"),
    ("HKQuantityTypeIdentifierBloodGlucose", "Blood Glucose"),
    ("HKQuantityTypeIdentifierRespiratoryRate", "Respiratory Rate"),
    ("HKQuantityTypeIdentifierAppleSleepingWristTemperature", "Wrist Temperature"),
    ("HKQuantityTypeIdentifierOxygenSaturation", "Blood Oxygen"),
    ("HKQuantityTypeIdentifierBodyMass", "Body Weight"),
];

const TYPE_PREFIXES: &[&str] = &[
    "HKQuantityTypeIdentifier",
    "HKCategoryTypeIdentifier",
    "HKCharacteristicTypeIdentifier",
    "HKDataType",
];

/// Fixed unit for a raw type, if the override table names one.
pub fn override_unit(raw_type: &str) -> Option<&'static str> {
    UNIT_OVERRIDES
        .iter()
        .find(|(t, _)| *t == raw_type)
        .map(|(_, unit)| *unit)
}

/// Normalize a record's own unit string. Known synonyms map to their
/// display form; unknown non-empty units pass through trimmed.
pub fn normalize_unit(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_lowercase();
    UNIT_SYNONYMS
        .iter()
        .find(|(from, _)| *from == lower)
        .map(|(_, to)| to.to_string())
        .or_else(|| Some(trimmed.to_string()))
}

/// Friendly label for a raw type identifier: lookup table first, else the
/// identifier with known prefixes stripped and camel-case split on word
/// boundaries.
pub fn display_name(raw_type: &str) -> String {
    if let Some((_, name)) = DISPLAY_NAMES.iter().find(|(t, _)| *t == raw_type) {
        return name.to_string();
    }

    let stripped = TYPE_PREFIXES
        .iter()
        .find_map(|prefix| raw_type.strip_prefix(prefix))
        .unwrap_or(raw_type);
    de_camel_case(stripped)
}

fn de_camel_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            // Boundary after a lowercase/digit, or between an acronym and
            // the next word (e.g. "VO2MaxValue" -> "VO2 Max Value").
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_lower)
            {
                out.push(' ');
            }
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_table_wins_for_known_types() {
        assert_eq!(
            override_unit("HKQuantityTypeIdentifierHeartRate"),
            Some("bpm")
        );
        assert_eq!(override_unit("HKQuantityTypeIdentifierBodyMass"), None);
    }

    #[test]
    fn unit_synonyms_normalize_case_insensitively() {
        assert_eq!(normalize_unit("count/min"), Some("bpm".to_string()));
        assert_eq!(normalize_unit("mmHg"), Some("mmHg".to_string()));
        assert_eq!(normalize_unit("degF"), Some("°F".to_string()));
        assert_eq!(normalize_unit("lb"), Some("lb".to_string()));
        assert_eq!(normalize_unit("  "), None);
    }

    #[test]
    fn display_name_prefers_lookup_table() {
        assert_eq!(display_name("HKQuantityTypeIdentifierHeartRate"), "Heart Rate");
        assert_eq!(
            display_name("HKQuantityTypeIdentifierAppleSleepingWristTemperature"),
            "Wrist Temperature"
        );
    }

    #[test]
    fn unknown_types_strip_prefix_and_split_camel_case() {
        assert_eq!(display_name("HKQuantityTypeIdentifierStepCount"), "Step Count");
        assert_eq!(
            display_name("HKCategoryTypeIdentifierSleepAnalysis"),
            "Sleep Analysis"
        );
        assert_eq!(
            display_name("HKQuantityTypeIdentifierVO2Max"),
            "VO2 Max"
        );
        assert_eq!(display_name("Workout"), "Workout");
    }
}
