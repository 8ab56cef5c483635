//! Question descriptors and their input bindings.
//!
//! A descriptor never stores answers. Everything that depends on answers
//! (derived options, conditional auxiliary inputs, orphaned values) is
//! computed from the [`AnswerStore`] each time it is asked for.

use super::answer_store::AnswerStore;
use crate::models::answers::{AnswerValue, FieldKind, FieldSpec, Section};

/// One selectable option. Derived options use the stored value as label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    fn same(value: &str) -> Self {
        Self {
            value: value.to_string(),
            label: value.to_string(),
        }
    }
}

/// Where a question's options come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionSource {
    /// `(value, label)` pairs fixed at compile time.
    Fixed(&'static [(&'static str, &'static str)]),
    /// Live projection of another field's current answer.
    DerivedFrom {
        section: Section,
        field: &'static str,
    },
}

impl OptionSource {
    pub fn resolve(&self, store: &AnswerStore) -> Vec<ChoiceOption> {
        match self {
            OptionSource::Fixed(pairs) => pairs
                .iter()
                .map(|(value, label)| ChoiceOption {
                    value: (*value).to_string(),
                    label: (*label).to_string(),
                })
                .collect(),
            OptionSource::DerivedFrom { section, field } => match store.get(*section, field) {
                Some(AnswerValue::Selection(items)) => {
                    items.iter().map(|i| ChoiceOption::same(i)).collect()
                }
                Some(AnswerValue::Ranked(slots)) => slots
                    .iter()
                    .flatten()
                    .map(|i| ChoiceOption::same(i))
                    .collect(),
                Some(AnswerValue::Text(v)) | Some(AnswerValue::Choice(v)) if !v.is_empty() => {
                    vec![ChoiceOption::same(v)]
                }
                _ => Vec::new(),
            },
        }
    }

    pub fn is_derived(&self) -> bool {
        matches!(self, OptionSource::DerivedFrom { .. })
    }
}

/// "Show this input only while `section.field == equals`".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub section: Section,
    pub field: &'static str,
    pub equals: &'static str,
}

impl Condition {
    pub fn holds(&self, store: &AnswerStore) -> bool {
        match store.get(self.section, self.field) {
            Some(AnswerValue::Choice(v)) | Some(AnswerValue::Text(v)) => v == self.equals,
            Some(AnswerValue::Selection(items)) => items.iter().any(|i| i == self.equals),
            _ => false,
        }
    }
}

/// Extra free-text input attached to a question, gated by a [`Condition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Auxiliary {
    pub field: &'static str,
    pub prompt: &'static str,
    pub placeholder: &'static str,
    pub when: Condition,
}

/// One slider of a weights question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightRow {
    pub field: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Text {
        field: &'static str,
        placeholder: &'static str,
    },
    Choice {
        field: &'static str,
        options: OptionSource,
    },
    MultiSelect {
        field: &'static str,
        options: OptionSource,
    },
    Ranked {
        field: &'static str,
        max_rank: usize,
        options: OptionSource,
    },
    Weights {
        rows: &'static [WeightRow],
        max: u8,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: &'static str,
    pub section: Section,
    pub prompt: &'static str,
    pub input: Input,
    pub auxiliary: Option<Auxiliary>,
}

impl Question {
    /// Every field this question reads or writes, auxiliary input included.
    pub fn fields(&self) -> Vec<FieldSpec> {
        let section = self.section;
        let mut out = match self.input {
            Input::Text { field, .. } => vec![FieldSpec::new(section, field, FieldKind::Text)],
            Input::Choice { field, .. } => vec![FieldSpec::new(section, field, FieldKind::Choice)],
            Input::MultiSelect { field, .. } => {
                vec![FieldSpec::new(section, field, FieldKind::MultiSelect)]
            }
            Input::Ranked {
                field, max_rank, ..
            } => vec![FieldSpec::new(
                section,
                field,
                FieldKind::Ranked { max_rank },
            )],
            Input::Weights { rows, max } => rows
                .iter()
                .map(|row| FieldSpec::new(section, row.field, FieldKind::Weight { max }))
                .collect(),
        };
        if let Some(aux) = self.auxiliary {
            out.push(FieldSpec::new(section, aux.field, FieldKind::Text));
        }
        out
    }

    /// The single field bound to this question, if the input has exactly one.
    pub fn primary_field(&self) -> Option<&'static str> {
        match self.input {
            Input::Text { field, .. }
            | Input::Choice { field, .. }
            | Input::MultiSelect { field, .. }
            | Input::Ranked { field, .. } => Some(field),
            Input::Weights { .. } => None,
        }
    }

    pub fn option_source(&self) -> Option<OptionSource> {
        match self.input {
            Input::Choice { options, .. }
            | Input::MultiSelect { options, .. }
            | Input::Ranked { options, .. } => Some(options),
            Input::Text { .. } | Input::Weights { .. } => None,
        }
    }

    /// Current options. Recomputed on every call; derived lists follow later
    /// edits of their source field.
    pub fn options(&self, store: &AnswerStore) -> Vec<ChoiceOption> {
        self.option_source()
            .map(|source| source.resolve(store))
            .unwrap_or_default()
    }

    /// The auxiliary input, only while its condition holds.
    pub fn auxiliary(&self, store: &AnswerStore) -> Option<&Auxiliary> {
        self.auxiliary
            .as_ref()
            .filter(|aux| aux.when.holds(store))
    }

    /// Stored values that are no longer among the live options.
    ///
    /// Orphans are kept in the store; callers decide how to flag them.
    pub fn orphaned(&self, store: &AnswerStore) -> Vec<String> {
        let Some(source) = self.option_source() else {
            return Vec::new();
        };
        let Some(field) = self.primary_field() else {
            return Vec::new();
        };
        let live = source.resolve(store);
        let known = |v: &str| live.iter().any(|o| o.value == v);

        match store.get(self.section, field) {
            Some(AnswerValue::Choice(v)) if !v.is_empty() && !known(v) => vec![v.clone()],
            Some(AnswerValue::Selection(items)) => {
                items.iter().filter(|i| !known(i)).cloned().collect()
            }
            Some(AnswerValue::Ranked(slots)) => slots
                .iter()
                .flatten()
                .filter(|i| !known(i))
                .cloned()
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESIRED: Question = Question {
        id: "desiredSkills",
        section: Section::Technical,
        prompt: "Desired skills?",
        input: Input::MultiSelect {
            field: "desiredSkills",
            options: OptionSource::Fixed(&[("A", "A"), ("B", "B"), ("C", "C")]),
        },
        auxiliary: None,
    };

    const KEY_SKILL: Question = Question {
        id: "mostImportantSkill",
        section: Section::Technical,
        prompt: "Most important?",
        input: Input::Choice {
            field: "mostImportantSkill",
            options: OptionSource::DerivedFrom {
                section: Section::Technical,
                field: "desiredSkills",
            },
        },
        auxiliary: None,
    };

    const LEADERSHIP: Question = Question {
        id: "teamLeadership",
        section: Section::Profile,
        prompt: "Teams?",
        input: Input::Choice {
            field: "teamLeadership",
            options: OptionSource::Fixed(&[("none", "None"), ("multiple", "Several")]),
        },
        auxiliary: Some(Auxiliary {
            field: "teamCount",
            prompt: "How many?",
            placeholder: "",
            when: Condition {
                section: Section::Profile,
                field: "teamLeadership",
                equals: "multiple",
            },
        }),
    };

    fn store() -> AnswerStore {
        AnswerStore::from_questions(&[DESIRED, KEY_SKILL, LEADERSHIP])
    }

    fn values(options: Vec<ChoiceOption>) -> Vec<String> {
        options.into_iter().map(|o| o.value).collect()
    }

    #[test]
    fn derived_options_are_a_live_projection() {
        let mut store = store();
        store.toggle(Section::Technical, "desiredSkills", "A").unwrap();
        store.toggle(Section::Technical, "desiredSkills", "B").unwrap();
        assert_eq!(values(KEY_SKILL.options(&store)), vec!["A", "B"]);

        store.toggle(Section::Technical, "desiredSkills", "A").unwrap();
        assert_eq!(values(KEY_SKILL.options(&store)), vec!["B"]);
    }

    #[test]
    fn removed_source_value_leaves_an_orphan() {
        let mut store = store();
        store.toggle(Section::Technical, "desiredSkills", "A").unwrap();
        store
            .set(
                Section::Technical,
                "mostImportantSkill",
                AnswerValue::Choice("A".into()),
            )
            .unwrap();
        assert!(KEY_SKILL.orphaned(&store).is_empty());

        store.toggle(Section::Technical, "desiredSkills", "A").unwrap();
        assert_eq!(KEY_SKILL.orphaned(&store), vec!["A".to_string()]);
        assert_eq!(
            store.get(Section::Technical, "mostImportantSkill"),
            Some(&AnswerValue::Choice("A".into()))
        );
    }

    #[test]
    fn auxiliary_input_follows_sibling_value() {
        let mut store = store();
        assert!(LEADERSHIP.auxiliary(&store).is_none());

        store
            .set(
                Section::Profile,
                "teamLeadership",
                AnswerValue::Choice("multiple".into()),
            )
            .unwrap();
        assert_eq!(
            LEADERSHIP.auxiliary(&store).map(|a| a.field),
            Some("teamCount")
        );

        store
            .set(
                Section::Profile,
                "teamLeadership",
                AnswerValue::Choice("none".into()),
            )
            .unwrap();
        assert!(LEADERSHIP.auxiliary(&store).is_none());
    }

    #[test]
    fn fields_include_the_auxiliary_input() {
        let names: Vec<_> = LEADERSHIP.fields().iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["teamLeadership", "teamCount"]);
    }
}
