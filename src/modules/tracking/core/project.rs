use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub hourly_rate: f64,
    pub created_at: i64,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub client_email: Option<String>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ProjectRuleError {
    #[error("project name must not be empty")]
    EmptyName,

    #[error("hourly rate must be a non-negative number, got {0}")]
    InvalidRate(f64),
}

/// Trims the name and rejects blank ones.
pub fn validate_name(name: &str) -> Result<String, ProjectRuleError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ProjectRuleError::EmptyName);
    }
    Ok(trimmed.to_string())
}

/// A missing rate means 0. Negative, NaN and infinite rates are rejected.
pub fn validate_rate(rate: Option<f64>) -> Result<f64, ProjectRuleError> {
    let rate = rate.unwrap_or(0.0);
    if !rate.is_finite() || rate < 0.0 {
        return Err(ProjectRuleError::InvalidRate(rate));
    }
    Ok(rate)
}

/// Blank optional text collapses to `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod project_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  Website redesign ", "Website redesign")]
    #[case("API", "API")]
    fn it_should_trim_valid_names(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(validate_name(raw), Ok(expected.to_string()));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn it_should_reject_blank_names(#[case] raw: &str) {
        assert_eq!(validate_name(raw), Err(ProjectRuleError::EmptyName));
    }

    #[rstest]
    #[case(None, 0.0)]
    #[case(Some(0.0), 0.0)]
    #[case(Some(72.5), 72.5)]
    fn it_should_accept_non_negative_rates(#[case] raw: Option<f64>, #[case] expected: f64) {
        assert_eq!(validate_rate(raw), Ok(expected));
    }

    #[rstest]
    #[case(-1.0)]
    #[case(f64::INFINITY)]
    fn it_should_reject_invalid_rates(#[case] raw: f64) {
        assert!(matches!(
            validate_rate(Some(raw)),
            Err(ProjectRuleError::InvalidRate(_))
        ));
    }

    #[rstest]
    fn it_should_reject_nan_rates() {
        assert!(validate_rate(Some(f64::NAN)).is_err());
    }

    #[rstest]
    fn it_should_collapse_blank_optional_text() {
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some(" Acme ".into())), Some("Acme".into()));
    }
}
