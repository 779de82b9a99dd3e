//! Sleep sessions as delivered by the upstream API.
//!
//! Sessions arrive pre-aggregated: ordered stage segments under a parent
//! session with duration breakdowns already computed. This layer only
//! deserializes them; segment durations are not re-validated against the
//! session duration.

use serde::{Deserialize, Serialize};

/// One stage-labeled sub-interval within a sleep session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SleepSegment {
    /// Stage label: `Awake`, `Core`, `Deep`, `REM`, `Asleep`, or `Unspecified`.
    pub stage: String,
    pub start_date: String,
    pub end_date: String,
    /// Segment duration in seconds.
    pub duration: f64,
}

/// One contiguous sleep period composed of ordered stage segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SleepSession {
    pub start_date: String,
    pub end_date: String,
    /// Total in-bed duration in seconds.
    pub duration: f64,
    /// Seconds spent in any non-Awake stage.
    pub asleep_duration: f64,
    /// Seconds spent awake within the session.
    pub awake_duration: f64,
    /// Count of awake periods long enough to count as awakenings.
    pub awakenings: u32,
    pub segments: Vec<SleepSegment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_deserializes_upstream_wire_format() {
        let json = r#"{
            "startDate": "2024-01-20T22:58:00-07:00",
            "endDate": "2024-01-21T06:58:00-07:00",
            "duration": 28800.0,
            "asleepDuration": 27000.0,
            "awakeDuration": 1800.0,
            "awakenings": 2,
            "segments": [
                {"stage": "Core", "startDate": "2024-01-20T22:58:00-07:00",
                 "endDate": "2024-01-21T01:58:00-07:00", "duration": 10800.0},
                {"stage": "Awake", "startDate": "2024-01-21T01:58:00-07:00",
                 "endDate": "2024-01-21T02:28:00-07:00", "duration": 1800.0}
            ]
        }"#;
        let session: SleepSession = serde_json::from_str(json).expect("deserialize");
        assert_eq!(session.awakenings, 2);
        assert_eq!(session.segments.len(), 2);
        assert_eq!(session.segments[0].stage, "Core");
        assert_eq!(session.asleep_duration, 27000.0);
    }
}
