//! Submission collaborator.
//!
//! The questionnaire core never submits anything itself. A shell that wants
//! to hand the collected answers somewhere does it through [`Submitter`].

use crate::models::answers::AnswerRecord;
use crate::models::errors::SubmitError;
use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub trait Submitter {
    fn submit(&self, record: &AnswerRecord) -> Result<(), SubmitError>;
}

/// Document written by [`JsonFileSubmitter`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope<'a> {
    pub session_id: Uuid,
    pub exported_at: DateTime<Utc>,
    pub answers: &'a AnswerRecord,
}

/// Writes `questionnaire-<session>-<utc stamp>.json` into a directory.
#[derive(Debug, Clone)]
pub struct JsonFileSubmitter {
    dir: PathBuf,
    session_id: Uuid,
}

impl JsonFileSubmitter {
    pub fn new(dir: impl Into<PathBuf>, session_id: Uuid) -> Self {
        Self {
            dir: dir.into(),
            session_id,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the export and return its path.
    pub fn export(&self, record: &AnswerRecord) -> Result<PathBuf, SubmitError> {
        self.export_at(record, Utc::now())
    }

    fn export_at(&self, record: &AnswerRecord, now: DateTime<Utc>) -> Result<PathBuf, SubmitError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| SubmitError::Directory {
            path: self.dir.clone(),
            source,
        })?;

        let envelope = ExportEnvelope {
            session_id: self.session_id,
            exported_at: now,
            answers: record,
        };
        let body = serde_json::to_string_pretty(&envelope)?;

        let file_name = format!(
            "questionnaire-{}-{}.json",
            self.session_id.simple(),
            now.format("%Y%m%dT%H%M%S%.3fZ")
        );
        let path = self.dir.join(file_name);
        std::fs::write(&path, body).map_err(|source| SubmitError::Write {
            path: path.clone(),
            source,
        })?;

        info!(
            "[PHASE: submit] [STEP: export] Answers exported to {:?}",
            path
        );
        Ok(path)
    }
}

impl Submitter for JsonFileSubmitter {
    fn submit(&self, record: &AnswerRecord) -> Result<(), SubmitError> {
        self.export(record).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::answers::Section;
    use crate::wizard::catalog;
    use chrono::TimeZone;

    #[test]
    fn export_writes_envelope_with_every_section() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut store = catalog::answer_store();
        store
            .toggle(Section::Organization, "managementPractices", "Scrum")
            .unwrap();
        store
            .set_ranked(Section::Organization, "topThreeIssues", 2, "Budget")
            .unwrap();

        let id = Uuid::new_v4();
        let submitter = JsonFileSubmitter::new(tmp.path().join("out"), id);
        let now = Utc
            .with_ymd_and_hms(2026, 3, 14, 9, 26, 53)
            .single()
            .expect("valid date");
        let path = submitter.export_at(store.record(), now).expect("export");

        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        assert_eq!(
            name,
            format!("questionnaire-{}-20260314T092653.000Z.json", id.simple())
        );

        let text = std::fs::read_to_string(&path).expect("read back");
        let doc: serde_json::Value = serde_json::from_str(&text).expect("json");
        assert_eq!(doc["sessionId"], id.to_string());
        assert_eq!(doc["exportedAt"], "2026-03-14T09:26:53Z");
        for section in Section::ALL {
            assert!(doc["answers"][section.as_str()].is_object(), "{}", section);
        }
        assert_eq!(
            doc["answers"]["organization"]["managementPractices"],
            serde_json::json!(["Scrum"])
        );
        assert_eq!(
            doc["answers"]["organization"]["topThreeIssues"],
            serde_json::json!([null, "Budget", null])
        );
        assert_eq!(doc["answers"]["profile"]["companyName"], "");
        assert_eq!(doc["answers"]["technical"]["objectiveCost"], 0);
    }

    #[test]
    fn submit_fails_when_directory_is_a_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, b"not a dir").expect("write");

        let submitter = JsonFileSubmitter::new(&blocker, Uuid::new_v4());
        let store = catalog::answer_store();
        let err = submitter.submit(store.record()).unwrap_err();
        assert!(matches!(err, SubmitError::Directory { .. }), "{}", err);
    }
}
