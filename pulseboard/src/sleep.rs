//! Display statistics derived from loaded sleep sessions.

use serde::Serialize;

use crate::models::SleepSession;

/// Aggregate statistics across a set of sleep sessions.
///
/// Durations are in seconds. Stage totals are keyed by stage label in
/// first-seen order across the sessions' segments.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SleepStats {
    pub session_count: usize,
    pub mean_asleep_secs: f64,
    pub mean_awake_secs: f64,
    pub mean_awakenings: f64,
    /// Mean of per-session asleep/in-bed ratios, as a percentage.
    pub mean_efficiency_pct: f64,
    pub stage_totals: Vec<(String, f64)>,
}

impl SleepStats {
    /// `None` for an empty session list: a valid empty state, not an error.
    pub fn from_sessions(sessions: &[SleepSession]) -> Option<Self> {
        if sessions.is_empty() {
            return None;
        }
        let n = sessions.len() as f64;

        let mut asleep_sum = 0.0;
        let mut awake_sum = 0.0;
        let mut awakenings_sum = 0.0;
        let mut efficiency_sum = 0.0;
        let mut stage_totals: Vec<(String, f64)> = Vec::new();

        for session in sessions {
            asleep_sum += session.asleep_duration;
            awake_sum += session.awake_duration;
            awakenings_sum += f64::from(session.awakenings);
            if session.duration > 0.0 {
                efficiency_sum += session.asleep_duration / session.duration * 100.0;
            }

            for segment in &session.segments {
                match stage_totals.iter_mut().find(|(stage, _)| *stage == segment.stage) {
                    Some((_, total)) => *total += segment.duration,
                    None => stage_totals.push((segment.stage.clone(), segment.duration)),
                }
            }
        }

        Some(Self {
            session_count: sessions.len(),
            mean_asleep_secs: asleep_sum / n,
            mean_awake_secs: awake_sum / n,
            mean_awakenings: awakenings_sum / n,
            mean_efficiency_pct: efficiency_sum / n,
            stage_totals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SleepSegment;

    fn segment(stage: &str, duration: f64) -> SleepSegment {
        SleepSegment {
            stage: stage.to_string(),
            start_date: String::new(),
            end_date: String::new(),
            duration,
        }
    }

    fn session(
        duration: f64,
        asleep: f64,
        awake: f64,
        awakenings: u32,
        segments: Vec<SleepSegment>,
    ) -> SleepSession {
        SleepSession {
            start_date: String::new(),
            end_date: String::new(),
            duration,
            asleep_duration: asleep,
            awake_duration: awake,
            awakenings,
            segments,
        }
    }

    #[test]
    fn empty_sessions_yield_no_stats() {
        assert_eq!(SleepStats::from_sessions(&[]), None);
    }

    #[test]
    fn means_average_across_sessions() {
        let sessions = vec![
            session(28800.0, 27000.0, 1800.0, 2, vec![]),
            session(25200.0, 25200.0, 0.0, 0, vec![]),
        ];
        let stats = SleepStats::from_sessions(&sessions).expect("stats");
        assert_eq!(stats.session_count, 2);
        assert_eq!(stats.mean_asleep_secs, 26100.0);
        assert_eq!(stats.mean_awake_secs, 900.0);
        assert_eq!(stats.mean_awakenings, 1.0);
        // (27000/28800 + 1.0) / 2 * 100
        assert!((stats.mean_efficiency_pct - 96.875).abs() < 1e-9);
    }

    #[test]
    fn stage_totals_accumulate_in_first_seen_order() {
        let sessions = vec![
            session(
                10800.0,
                9000.0,
                1800.0,
                1,
                vec![segment("Core", 5400.0), segment("Awake", 1800.0), segment("Deep", 3600.0)],
            ),
            session(
                7200.0,
                7200.0,
                0.0,
                0,
                vec![segment("Deep", 3600.0), segment("Core", 3600.0)],
            ),
        ];
        let stats = SleepStats::from_sessions(&sessions).expect("stats");
        assert_eq!(
            stats.stage_totals,
            vec![
                ("Core".to_string(), 9000.0),
                ("Awake".to_string(), 1800.0),
                ("Deep".to_string(), 7200.0),
            ]
        );
    }

    #[test]
    fn zero_duration_session_contributes_zero_efficiency() {
        let sessions = vec![session(0.0, 0.0, 0.0, 0, vec![])];
        let stats = SleepStats::from_sessions(&sessions).expect("stats");
        assert_eq!(stats.mean_efficiency_pct, 0.0);
    }
}
