use thiserror::Error;

use crate::modules::tracking::core::ports::StoreError;
use crate::modules::tracking::core::project::ProjectRuleError;
use crate::modules::tracking::core::time_entry::EntryRuleError;
use crate::modules::tracking::use_cases::calendar_overview::overview::CalendarError;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),
}

impl ApplicationError {
    pub fn project_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "project",
            id: id.into(),
        }
    }

    pub fn entry_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "time entry",
            id: id.into(),
        }
    }

    pub fn week_not_found(week: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "week",
            id: week.into(),
        }
    }
}

impl From<ProjectRuleError> for ApplicationError {
    fn from(err: ProjectRuleError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<EntryRuleError> for ApplicationError {
    fn from(err: EntryRuleError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<CalendarError> for ApplicationError {
    fn from(err: CalendarError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod application_error_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_describe_missing_records() {
        assert_eq!(
            ApplicationError::project_not_found("p-1").to_string(),
            "project p-1 not found"
        );
        assert_eq!(
            ApplicationError::entry_not_found("te-1").to_string(),
            "time entry te-1 not found"
        );
    }

    #[rstest]
    fn it_should_turn_rule_violations_into_validation_errors() {
        let err: ApplicationError = EntryRuleError::MissingProject.into();
        assert!(matches!(err, ApplicationError::Validation(ref m) if m == "a project must be selected"));
        let err: ApplicationError = ProjectRuleError::EmptyName.into();
        assert!(matches!(err, ApplicationError::Validation(_)));
    }

    #[rstest]
    fn it_should_pass_store_failures_through() {
        let err: ApplicationError = StoreError::Unavailable("Store offline".into()).into();
        assert_eq!(err.to_string(), "store unavailable: Store offline");
    }
}
