// Error taxonomy for the questionnaire core and the submit collaborator.

use super::answers::Section;
use std::path::PathBuf;
use thiserror::Error;

/// Precondition violations raised by the answer store and step controller.
/// None of these are recovered locally; the caller decides how to surface them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("Invalid field: {section}.{field} is not declared")]
    InvalidField { section: Section, field: String },

    #[error("Type mismatch: cannot {operation} {path} (declared as {declared})")]
    TypeMismatch {
        path: String,
        declared: &'static str,
        operation: &'static str,
    },

    #[error("Rank position out of range: {path} accepts 1..={max_rank}, got {position}")]
    RankPositionOutOfRange {
        path: String,
        position: usize,
        max_rank: usize,
    },

    #[error("Duplicate item: {path} already contains '{item}'")]
    DuplicateItem { path: String, item: String },

    #[error("Weight out of range: {path} accepts 0..={max}, got {value}")]
    WeightOutOfRange { path: String, value: u8, max: u8 },

    #[error("Questionnaire must contain at least one question")]
    EmptyQuestionnaire,
}

/// Failures of the external submit collaborator.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Export directory unavailable: {path:?}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write export file {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize answers: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_path() {
        let err = WizardError::TypeMismatch {
            path: "profile.companyName".to_string(),
            declared: "text",
            operation: "toggle",
        };
        assert_eq!(
            err.to_string(),
            "Type mismatch: cannot toggle profile.companyName (declared as text)"
        );

        let err = WizardError::InvalidField {
            section: Section::Suggestions,
            field: "nope".to_string(),
        };
        assert!(err.to_string().contains("suggestions.nope"));
    }
}
