//! Derived vital-sign time series. Never stored; rebuilt from raw records
//! on every load by the aggregator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One numeric observation within a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VitalPoint {
    #[schema(value_type = String)]
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// A time-ordered sequence of observations for one vital-sign type.
///
/// `secondary` exists only for paired vitals (blood pressure carries the
/// diastolic readings there).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VitalSeries {
    /// Friendly display label (e.g. `Heart Rate`, `Blood Pressure`).
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub points: Vec<VitalPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<Vec<VitalPoint>>,
}
