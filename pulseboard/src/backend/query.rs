//! Query construction for the upstream health API.

use crate::error::{PulseboardError, Result};

/// Fixed validation message surfaced when no export path is given.
pub const FILE_PATH_REQUIRED: &str = "File path is required";

/// Filter state for one upstream request.
///
/// Built either from dashboard filter inputs or from forwarded browser
/// query parameters; validated locally before any network call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordQuery {
    pub file_path: String,
    pub types: Vec<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl RecordQuery {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            ..Self::default()
        }
    }

    /// Set the type filter from a comma-separated input string.
    pub fn with_types_csv(mut self, csv: &str) -> Self {
        self.types = csv.split(',').map(str::to_string).collect();
        self
    }

    pub fn with_range(mut self, start: Option<String>, end: Option<String>) -> Self {
        self.start = start.filter(|s| !s.trim().is_empty());
        self.end = end.filter(|s| !s.trim().is_empty());
        self
    }

    /// Local validation, performed before any request goes out.
    pub fn validate(&self) -> Result<()> {
        if self.file_path.trim().is_empty() {
            return Err(PulseboardError::Validation(FILE_PATH_REQUIRED.to_string()));
        }
        Ok(())
    }

    /// Query pairs in deterministic order: `file_path` first, then one
    /// repeated `types` pair per non-empty entry, then `start`/`end`.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("file_path", self.file_path.trim().to_string())];
        for t in &self.types {
            let t = t.trim();
            if !t.is_empty() {
                pairs.push(("types", t.to_string()));
            }
        }
        if let Some(start) = &self.start {
            pairs.push(("start", start.trim().to_string()));
        }
        if let Some(end) = &self.end {
            pairs.push(("end", end.trim().to_string()));
        }
        pairs
    }
}
