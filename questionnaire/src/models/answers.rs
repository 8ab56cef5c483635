// Answer record models
// Sections, field shapes and the values collected for them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Top-level grouping of questions. Declaration order is survey order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Profile,
    Organization,
    Technical,
    Suggestions,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Profile,
        Section::Organization,
        Section::Technical,
        Section::Suggestions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Profile => "profile",
            Section::Organization => "organization",
            Section::Technical => "technical",
            Section::Suggestions => "suggestions",
        }
    }

    /// Label shown in the section rail.
    pub fn title(&self) -> &'static str {
        match self {
            Section::Profile => "Profil",
            Section::Organization => "Organisation",
            Section::Technical => "Technique",
            Section::Suggestions => "Suggestions",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared shape of a field. Decides which mutation verbs are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Choice,
    MultiSelect,
    Ranked { max_rank: usize },
    Weight { max: u8 },
}

impl FieldKind {
    pub fn default_value(&self) -> AnswerValue {
        match self {
            FieldKind::Text => AnswerValue::Text(String::new()),
            FieldKind::Choice => AnswerValue::Choice(String::new()),
            FieldKind::MultiSelect => AnswerValue::Selection(Vec::new()),
            FieldKind::Ranked { max_rank } => AnswerValue::Ranked(vec![None; *max_rank]),
            FieldKind::Weight { .. } => AnswerValue::Weight(0),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Choice => "choice",
            FieldKind::MultiSelect => "multi-select",
            FieldKind::Ranked { .. } => "ranked",
            FieldKind::Weight { .. } => "weight",
        }
    }
}

/// One collected value. Serialized without a tag so the exported record reads
/// as a plain nested object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Choice(String),
    Selection(Vec<String>),
    Ranked(Vec<Option<String>>),
    Weight(u8),
}

impl AnswerValue {
    pub fn shape_name(&self) -> &'static str {
        match self {
            AnswerValue::Text(_) => "text",
            AnswerValue::Choice(_) => "choice",
            AnswerValue::Selection(_) => "multi-select",
            AnswerValue::Ranked(_) => "ranked",
            AnswerValue::Weight(_) => "weight",
        }
    }

    /// Shape check only; range and length limits are checked by the store.
    pub fn matches(&self, kind: FieldKind) -> bool {
        matches!(
            (self, kind),
            (AnswerValue::Text(_), FieldKind::Text)
                | (AnswerValue::Choice(_), FieldKind::Choice)
                | (AnswerValue::Selection(_), FieldKind::MultiSelect)
                | (AnswerValue::Ranked(_), FieldKind::Ranked { .. })
                | (AnswerValue::Weight(_), FieldKind::Weight { .. })
        )
    }

    pub fn is_default(&self) -> bool {
        match self {
            AnswerValue::Text(s) | AnswerValue::Choice(s) => s.is_empty(),
            AnswerValue::Selection(items) => items.is_empty(),
            AnswerValue::Ranked(slots) => slots.iter().all(Option::is_none),
            AnswerValue::Weight(w) => *w == 0,
        }
    }
}

/// A declared field: section, name and shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub section: Section,
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(section: Section, name: &'static str, kind: FieldKind) -> Self {
        Self {
            section,
            name,
            kind,
        }
    }

    /// `section.field` path used in logs and error messages.
    pub fn path(&self) -> String {
        format!("{}.{}", self.section, self.name)
    }
}

/// All answers of one session, keyed by section then field name.
pub type AnswerRecord = BTreeMap<Section, BTreeMap<String, AnswerValue>>;
