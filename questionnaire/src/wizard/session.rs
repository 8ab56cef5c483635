//! Questionnaire session: created on mount, dropped on unmount.
//!
//! A session owns the answer store and the step controller exclusively and
//! turns each user input event into at most one mutation of either.

use super::answer_store::AnswerStore;
use super::catalog;
use super::question::Question;
use super::step_controller::StepController;
use crate::models::answers::{AnswerValue, Section};
use crate::models::errors::WizardError;
use crate::utils::logging::mask_sensitive;
use log::{debug, info};
use uuid::Uuid;

/// One user action, addressed by section/field coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    SetText {
        section: Section,
        field: String,
        value: String,
    },
    Choose {
        section: Section,
        field: String,
        value: String,
    },
    Toggle {
        section: Section,
        field: String,
        item: String,
    },
    Rank {
        section: Section,
        field: String,
        position: usize,
        item: String,
    },
    ClearRank {
        section: Section,
        field: String,
        position: usize,
    },
    SetWeight {
        section: Section,
        field: String,
        weight: u8,
    },
    AdjustWeight {
        section: Section,
        field: String,
        delta: i16,
    },
    Next,
    Back,
}

#[derive(Debug)]
pub struct Session {
    id: Uuid,
    store: AnswerStore,
    steps: StepController,
}

impl Session {
    pub fn mount(questions: Vec<Question>) -> Result<Self, WizardError> {
        let store = AnswerStore::from_questions(&questions);
        let steps = StepController::new(questions)?;
        let id = Uuid::new_v4();
        info!(
            "[PHASE: session] [STEP: mount] Session {} mounted ({} questions, {} fields)",
            id,
            steps.len(),
            store.specs().len()
        );
        Ok(Self { id, store, steps })
    }

    /// Mount the built-in survey.
    pub fn from_catalog() -> Result<Self, WizardError> {
        Self::mount(catalog::questions())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn store(&self) -> &AnswerStore {
        &self.store
    }

    pub fn steps(&self) -> &StepController {
        &self.steps
    }

    pub fn current(&self) -> &Question {
        self.steps.current()
    }

    /// Apply one event. `Ok(false)` means the event was valid but changed
    /// nothing (navigation at a boundary).
    pub fn apply(&mut self, event: InputEvent) -> Result<bool, WizardError> {
        match event {
            InputEvent::SetText {
                section,
                field,
                value,
            } => {
                debug!(
                    "[PHASE: session] [STEP: answer] {}.{} = {}",
                    section,
                    field,
                    mask_sensitive(&value)
                );
                self.store.set(section, &field, AnswerValue::Text(value))?;
                Ok(true)
            }
            InputEvent::Choose {
                section,
                field,
                value,
            } => {
                debug!(
                    "[PHASE: session] [STEP: answer] {}.{} = {}",
                    section, field, value
                );
                self.store.set(section, &field, AnswerValue::Choice(value))?;
                Ok(true)
            }
            InputEvent::Toggle {
                section,
                field,
                item,
            } => {
                let selected = self.store.toggle(section, &field, &item)?;
                debug!(
                    "[PHASE: session] [STEP: answer] {}.{} {} '{}'",
                    section,
                    field,
                    if selected { "+" } else { "-" },
                    item
                );
                Ok(true)
            }
            InputEvent::Rank {
                section,
                field,
                position,
                item,
            } => {
                self.store.set_ranked(section, &field, position, &item)?;
                debug!(
                    "[PHASE: session] [STEP: answer] {}.{}[{}] = '{}'",
                    section, field, position, item
                );
                Ok(true)
            }
            InputEvent::ClearRank {
                section,
                field,
                position,
            } => {
                self.store.clear_ranked(section, &field, position)?;
                debug!(
                    "[PHASE: session] [STEP: answer] {}.{}[{}] cleared",
                    section, field, position
                );
                Ok(true)
            }
            InputEvent::SetWeight {
                section,
                field,
                weight,
            } => {
                self.store.set_weight(section, &field, weight)?;
                Ok(true)
            }
            InputEvent::AdjustWeight {
                section,
                field,
                delta,
            } => {
                let before = self.store.weight(section, &field);
                let after = self.store.adjust_weight(section, &field, delta)?;
                Ok(before != after)
            }
            InputEvent::Next => Ok(self.navigated(|steps| steps.advance())),
            InputEvent::Back => Ok(self.navigated(|steps| steps.retreat())),
        }
    }

    fn navigated(&mut self, mv: impl FnOnce(&mut StepController) -> bool) -> bool {
        let moved = mv(&mut self.steps);
        if moved {
            let (n, total) = self.steps.question_number();
            info!(
                "[PHASE: session] [STEP: navigate] Question {}/{} ({})",
                n,
                total,
                self.steps.current().id
            );
        }
        moved
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        info!(
            "[PHASE: session] [STEP: unmount] Session {} unmounted ({} of {} fields answered)",
            self.id,
            self.store.answered_count(),
            self.store.specs().len()
        );
    }
}
