//! Answer store: one typed value per declared field.
//!
//! The set of fields is fixed at construction. Writes to undeclared paths,
//! writes with the wrong shape and out-of-range positions or weights are
//! rejected with a [`WizardError`]; nothing is coerced.

use super::question::Question;
use crate::models::answers::{AnswerRecord, AnswerValue, FieldKind, FieldSpec, Section};
use crate::models::errors::WizardError;

#[derive(Debug, Clone)]
pub struct AnswerStore {
    specs: Vec<FieldSpec>,
    record: AnswerRecord,
}

impl AnswerStore {
    /// Declare `specs` and initialise each field to its default.
    /// A path declared twice keeps its first declaration.
    pub fn new(specs: impl IntoIterator<Item = FieldSpec>) -> Self {
        let mut declared: Vec<FieldSpec> = Vec::new();
        let mut record = AnswerRecord::new();
        for spec in specs {
            if declared
                .iter()
                .any(|d| d.section == spec.section && d.name == spec.name)
            {
                continue;
            }
            record
                .entry(spec.section)
                .or_default()
                .insert(spec.name.to_string(), spec.kind.default_value());
            declared.push(spec);
        }
        Self {
            specs: declared,
            record,
        }
    }

    pub fn from_questions(questions: &[Question]) -> Self {
        Self::new(questions.iter().flat_map(Question::fields))
    }

    pub fn specs(&self) -> &[FieldSpec] {
        &self.specs
    }

    pub fn spec(&self, section: Section, field: &str) -> Option<&FieldSpec> {
        self.specs
            .iter()
            .find(|s| s.section == section && s.name == field)
    }

    /// Current value of a declared field (its default until written).
    /// `None` only for paths that were never declared.
    pub fn get(&self, section: Section, field: &str) -> Option<&AnswerValue> {
        self.record.get(&section).and_then(|fields| fields.get(field))
    }

    pub fn record(&self) -> &AnswerRecord {
        &self.record
    }

    /// Replace the value at `section.field`.
    pub fn set(
        &mut self,
        section: Section,
        field: &str,
        value: AnswerValue,
    ) -> Result<(), WizardError> {
        let spec = *self.declared(section, field)?;

        if !value.matches(spec.kind) {
            return Err(mismatch(&spec, "set"));
        }
        match (&value, spec.kind) {
            (AnswerValue::Selection(items), _) => {
                for (i, item) in items.iter().enumerate() {
                    if items[..i].contains(item) {
                        return Err(WizardError::DuplicateItem {
                            path: spec.path(),
                            item: item.clone(),
                        });
                    }
                }
            }
            (AnswerValue::Ranked(slots), FieldKind::Ranked { max_rank }) => {
                if slots.len() != max_rank {
                    return Err(mismatch(&spec, "set ranked list of wrong length on"));
                }
            }
            (AnswerValue::Weight(w), FieldKind::Weight { max }) => {
                if *w > max {
                    return Err(WizardError::WeightOutOfRange {
                        path: spec.path(),
                        value: *w,
                        max,
                    });
                }
            }
            _ => {}
        }

        *self.slot_mut(&spec) = value;
        Ok(())
    }

    /// Add `item` to a multi-select field, or remove it if already present.
    /// Returns whether the item is selected afterwards.
    pub fn toggle(
        &mut self,
        section: Section,
        field: &str,
        item: &str,
    ) -> Result<bool, WizardError> {
        let spec = *self.declared(section, field)?;
        if spec.kind != FieldKind::MultiSelect {
            return Err(mismatch(&spec, "toggle"));
        }

        let AnswerValue::Selection(items) = self.slot_mut(&spec) else {
            return Err(mismatch(&spec, "toggle"));
        };
        if let Some(pos) = items.iter().position(|i| i == item) {
            items.remove(pos);
            Ok(false)
        } else {
            items.push(item.to_string());
            Ok(true)
        }
    }

    /// Put `item` at 1-based `position` of a ranked field. Other positions are left as is.
    pub fn set_ranked(
        &mut self,
        section: Section,
        field: &str,
        position: usize,
        item: &str,
    ) -> Result<(), WizardError> {
        let slot = self.ranked_slot_mut(section, field, position, "rank")?;
        *slot = Some(item.to_string());
        Ok(())
    }

    /// Empty one 1-based position of a ranked field.
    pub fn clear_ranked(
        &mut self,
        section: Section,
        field: &str,
        position: usize,
    ) -> Result<(), WizardError> {
        let slot = self.ranked_slot_mut(section, field, position, "clear rank of")?;
        *slot = None;
        Ok(())
    }

    pub fn set_weight(
        &mut self,
        section: Section,
        field: &str,
        weight: u8,
    ) -> Result<(), WizardError> {
        self.set(section, field, AnswerValue::Weight(weight))
    }

    /// Move a weight by `delta`, saturating at `0` and the field's max.
    pub fn adjust_weight(
        &mut self,
        section: Section,
        field: &str,
        delta: i16,
    ) -> Result<u8, WizardError> {
        let spec = *self.declared(section, field)?;
        let FieldKind::Weight { max } = spec.kind else {
            return Err(mismatch(&spec, "adjust weight of"));
        };
        let AnswerValue::Weight(current) = self.slot_mut(&spec) else {
            return Err(mismatch(&spec, "adjust weight of"));
        };
        let next = i16::from(*current)
            .saturating_add(delta)
            .clamp(0, i16::from(max));
        // `next` is within 0..=max, which fits u8.
        *current = next as u8;
        Ok(*current)
    }

    pub fn text(&self, section: Section, field: &str) -> &str {
        match self.get(section, field) {
            Some(AnswerValue::Text(v)) | Some(AnswerValue::Choice(v)) => v,
            _ => "",
        }
    }

    pub fn selection(&self, section: Section, field: &str) -> &[String] {
        match self.get(section, field) {
            Some(AnswerValue::Selection(items)) => items,
            _ => &[],
        }
    }

    pub fn ranked(&self, section: Section, field: &str) -> &[Option<String>] {
        match self.get(section, field) {
            Some(AnswerValue::Ranked(slots)) => slots,
            _ => &[],
        }
    }

    pub fn weight(&self, section: Section, field: &str) -> u8 {
        match self.get(section, field) {
            Some(AnswerValue::Weight(w)) => *w,
            _ => 0,
        }
    }

    /// Number of fields holding something other than their default.
    pub fn answered_count(&self) -> usize {
        self.record
            .values()
            .flat_map(|fields| fields.values())
            .filter(|v| !v.is_default())
            .count()
    }

    fn declared(&self, section: Section, field: &str) -> Result<&FieldSpec, WizardError> {
        self.spec(section, field)
            .ok_or_else(|| WizardError::InvalidField {
                section,
                field: field.to_string(),
            })
    }

    fn ranked_slot_mut(
        &mut self,
        section: Section,
        field: &str,
        position: usize,
        operation: &'static str,
    ) -> Result<&mut Option<String>, WizardError> {
        let spec = *self.declared(section, field)?;
        let FieldKind::Ranked { max_rank } = spec.kind else {
            return Err(mismatch(&spec, operation));
        };
        if position == 0 || position > max_rank {
            return Err(WizardError::RankPositionOutOfRange {
                path: spec.path(),
                position,
                max_rank,
            });
        }
        let AnswerValue::Ranked(slots) = self.slot_mut(&spec) else {
            return Err(mismatch(&spec, operation));
        };
        slots
            .get_mut(position - 1)
            .ok_or_else(|| mismatch(&spec, operation))
    }

    // Every declared spec has a record entry; the fallback only keeps this total.
    fn slot_mut(&mut self, spec: &FieldSpec) -> &mut AnswerValue {
        self.record
            .entry(spec.section)
            .or_default()
            .entry(spec.name.to_string())
            .or_insert_with(|| spec.kind.default_value())
    }
}

fn mismatch(spec: &FieldSpec, operation: &'static str) -> WizardError {
    WizardError::TypeMismatch {
        path: spec.path(),
        declared: spec.kind.name(),
        operation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> AnswerStore {
        AnswerStore::new([
            FieldSpec::new(Section::Profile, "companyName", FieldKind::Text),
            FieldSpec::new(Section::Profile, "teamLeadership", FieldKind::Choice),
            FieldSpec::new(
                Section::Organization,
                "managementPractices",
                FieldKind::MultiSelect,
            ),
            FieldSpec::new(
                Section::Organization,
                "topThreeIssues",
                FieldKind::Ranked { max_rank: 3 },
            ),
            FieldSpec::new(
                Section::Technical,
                "objectiveCost",
                FieldKind::Weight { max: 10 },
            ),
        ])
    }

    #[test]
    fn every_field_starts_at_its_default() {
        let store = store();
        assert_eq!(store.text(Section::Profile, "companyName"), "");
        assert!(store
            .selection(Section::Organization, "managementPractices")
            .is_empty());
        assert_eq!(
            store.ranked(Section::Organization, "topThreeIssues"),
            &[None, None, None]
        );
        assert_eq!(store.weight(Section::Technical, "objectiveCost"), 0);
        assert_eq!(store.answered_count(), 0);
        assert_eq!(store.get(Section::Suggestions, "improvements"), None);
    }

    #[test]
    fn set_rejects_undeclared_field() {
        let mut store = store();
        let err = store
            .set(Section::Profile, "nickname", AnswerValue::Text("x".into()))
            .unwrap_err();
        assert_eq!(
            err,
            WizardError::InvalidField {
                section: Section::Profile,
                field: "nickname".into()
            }
        );
        // keys never change
        assert_eq!(store.get(Section::Profile, "nickname"), None);
    }

    #[test]
    fn set_rejects_wrong_shape() {
        let mut store = store();
        let err = store
            .set(
                Section::Profile,
                "companyName",
                AnswerValue::Selection(vec!["a".into()]),
            )
            .unwrap_err();
        assert!(matches!(err, WizardError::TypeMismatch { .. }));
        assert_eq!(store.text(Section::Profile, "companyName"), "");
    }

    #[test]
    fn set_rejects_duplicate_selection_and_heavy_weight() {
        let mut store = store();
        let err = store
            .set(
                Section::Organization,
                "managementPractices",
                AnswerValue::Selection(vec!["Agile".into(), "Agile".into()]),
            )
            .unwrap_err();
        assert!(matches!(err, WizardError::DuplicateItem { .. }));

        let err = store
            .set_weight(Section::Technical, "objectiveCost", 11)
            .unwrap_err();
        assert_eq!(
            err,
            WizardError::WeightOutOfRange {
                path: "technical.objectiveCost".into(),
                value: 11,
                max: 10
            }
        );
    }

    #[test]
    fn toggle_keeps_insertion_order_and_pairs_cancel_out() {
        let mut store = store();
        store
            .toggle(Section::Organization, "managementPractices", "Agile")
            .unwrap();
        store
            .toggle(Section::Organization, "managementPractices", "Scrum")
            .unwrap();
        assert_eq!(
            store.selection(Section::Organization, "managementPractices"),
            &["Agile".to_string(), "Scrum".to_string()]
        );

        let selected = store
            .toggle(Section::Organization, "managementPractices", "Agile")
            .unwrap();
        assert!(!selected);
        assert_eq!(
            store.selection(Section::Organization, "managementPractices"),
            &["Scrum".to_string()]
        );
    }

    #[test]
    fn double_toggle_is_identity() {
        let mut store = store();
        store
            .toggle(Section::Organization, "managementPractices", "Kanban")
            .unwrap();
        let before = store
            .selection(Section::Organization, "managementPractices")
            .to_vec();

        for item in ["Lean", "Kanban"] {
            store
                .toggle(Section::Organization, "managementPractices", item)
                .unwrap();
            store
                .toggle(Section::Organization, "managementPractices", item)
                .unwrap();
            assert_eq!(
                store.selection(Section::Organization, "managementPractices"),
                before.as_slice()
            );
        }
    }

    #[test]
    fn toggle_on_scalar_field_is_a_type_mismatch() {
        let mut store = store();
        let err = store
            .toggle(Section::Profile, "companyName", "Acme")
            .unwrap_err();
        assert_eq!(
            err,
            WizardError::TypeMismatch {
                path: "profile.companyName".into(),
                declared: "text",
                operation: "toggle"
            }
        );
    }

    #[test]
    fn set_ranked_fills_positions_independently() {
        let mut store = store();
        store
            .set_ranked(Section::Organization, "topThreeIssues", 2, "Turnover élevé")
            .unwrap();
        store
            .set_ranked(Section::Organization, "topThreeIssues", 1, "Retard projets")
            .unwrap();
        assert_eq!(
            store.ranked(Section::Organization, "topThreeIssues"),
            &[
                Some("Retard projets".to_string()),
                Some("Turnover élevé".to_string()),
                None
            ]
        );

        store
            .clear_ranked(Section::Organization, "topThreeIssues", 1)
            .unwrap();
        assert_eq!(
            store.ranked(Section::Organization, "topThreeIssues"),
            &[None, Some("Turnover élevé".to_string()), None]
        );
    }

    #[test]
    fn set_ranked_rejects_positions_outside_one_to_max() {
        let mut store = store();
        for position in [0, 4] {
            let err = store
                .set_ranked(Section::Organization, "topThreeIssues", position, "Budget")
                .unwrap_err();
            assert_eq!(
                err,
                WizardError::RankPositionOutOfRange {
                    path: "organization.topThreeIssues".into(),
                    position,
                    max_rank: 3
                }
            );
        }
        assert!(matches!(
            store.set_ranked(Section::Profile, "companyName", 1, "x"),
            Err(WizardError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn adjust_weight_saturates() {
        let mut store = store();
        assert_eq!(
            store
                .adjust_weight(Section::Technical, "objectiveCost", -3)
                .unwrap(),
            0
        );
        assert_eq!(
            store
                .adjust_weight(Section::Technical, "objectiveCost", 25)
                .unwrap(),
            10
        );
        assert_eq!(store.answered_count(), 1);
    }

    #[test]
    fn adjust_weight_saturates_on_extreme_deltas() {
        let mut store = store();
        store
            .set_weight(Section::Technical, "objectiveCost", 5)
            .unwrap();
        assert_eq!(
            store
                .adjust_weight(Section::Technical, "objectiveCost", i16::MAX)
                .unwrap(),
            10
        );
        assert_eq!(
            store
                .adjust_weight(Section::Technical, "objectiveCost", i16::MIN)
                .unwrap(),
            0
        );
    }
}
