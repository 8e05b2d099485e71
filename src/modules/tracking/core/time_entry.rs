use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: String,
    pub project_id: String,
    pub start_time: i64,
    pub end_time: i64,
    pub duration_ms: i64,
    #[serde(default)]
    pub is_manual: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl TimeEntry {
    /// Builds an entry whose duration is derived from its span.
    pub fn new(
        id: impl Into<String>,
        project_id: impl Into<String>,
        start_time: i64,
        end_time: i64,
        is_manual: bool,
        description: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            start_time,
            end_time,
            duration_ms: end_time.saturating_sub(start_time),
            is_manual,
            description,
        }
    }

    /// Moves the entry to a new span, keeping the duration in step.
    pub fn reschedule(&mut self, start_time: i64, end_time: i64) {
        self.start_time = start_time;
        self.end_time = end_time;
        self.duration_ms = end_time.saturating_sub(start_time);
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EntryRuleError {
    #[error("a project must be selected")]
    MissingProject,

    #[error("a manual entry must last longer than zero")]
    EmptyDuration,

    #[error("end time must not be before start time")]
    EndBeforeStart,

    #[error("start and end time must be calendar instants")]
    SpanOutOfRange,
}

/// Both instants must map to a calendar date, which also keeps
/// `end - start` inside `i64`.
fn validate_instants(start_time: i64, end_time: i64) -> Result<(), EntryRuleError> {
    let representable = |ms: i64| DateTime::<Utc>::from_timestamp_millis(ms).is_some();
    if !representable(start_time) || !representable(end_time) {
        return Err(EntryRuleError::SpanOutOfRange);
    }
    end_time
        .checked_sub(start_time)
        .map(|_| ())
        .ok_or(EntryRuleError::SpanOutOfRange)
}

/// Rules for entries typed in by hand: a project is chosen and time passed.
pub fn validate_manual_entry(
    project_id: &str,
    start_time: i64,
    end_time: i64,
) -> Result<(), EntryRuleError> {
    if project_id.trim().is_empty() {
        return Err(EntryRuleError::MissingProject);
    }
    validate_instants(start_time, end_time)?;
    if end_time <= start_time {
        return Err(EntryRuleError::EmptyDuration);
    }
    Ok(())
}

pub fn validate_span(start_time: i64, end_time: i64) -> Result<(), EntryRuleError> {
    validate_instants(start_time, end_time)?;
    if end_time < start_time {
        return Err(EntryRuleError::EndBeforeStart);
    }
    Ok(())
}
