//! Step controller: the fixed question list plus a cursor.

use super::question::Question;
use crate::models::errors::WizardError;

/// Where the cursor sits relative to the ends of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// First question; retreat disabled.
    Start,
    Middle,
    /// Last question; advance disabled.
    End,
    /// Single-question list; both disabled.
    Only,
}

#[derive(Debug, Clone)]
pub struct StepController {
    questions: Vec<Question>,
    cursor: usize,
}

impl StepController {
    pub fn new(questions: Vec<Question>) -> Result<Self, WizardError> {
        if questions.is_empty() {
            return Err(WizardError::EmptyQuestionnaire);
        }
        Ok(Self {
            questions,
            cursor: 0,
        })
    }

    pub fn current(&self) -> &Question {
        // cursor < len is kept by advance/retreat
        &self.questions[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    fn last_index(&self) -> usize {
        self.questions.len() - 1
    }

    pub fn can_advance(&self) -> bool {
        self.cursor < self.last_index()
    }

    pub fn can_retreat(&self) -> bool {
        self.cursor > 0
    }

    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn retreat(&mut self) -> bool {
        if !self.can_retreat() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// `cursor / (len - 1)`, and 0 for a single-question list.
    pub fn progress_fraction(&self) -> f64 {
        let last = self.last_index();
        if last == 0 {
            return 0.0;
        }
        self.cursor as f64 / last as f64
    }

    /// 1-based question number and total, as shown above the prompt.
    pub fn question_number(&self) -> (usize, usize) {
        (self.cursor + 1, self.questions.len())
    }

    pub fn position(&self) -> Position {
        match (self.can_retreat(), self.can_advance()) {
            (false, false) => Position::Only,
            (false, true) => Position::Start,
            (true, true) => Position::Middle,
            (true, false) => Position::End,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::answers::Section;
    use crate::wizard::question::Input;

    fn question(id: &'static str, section: Section) -> Question {
        Question {
            id,
            section,
            prompt: id,
            input: Input::Text {
                field: id,
                placeholder: "",
            },
            auxiliary: None,
        }
    }

    fn controller(n: usize) -> StepController {
        const IDS: [&str; 20] = [
            "q1", "q2", "q3", "q4", "q5", "q6", "q7", "q8", "q9", "q10", "q11", "q12", "q13",
            "q14", "q15", "q16", "q17", "q18", "q19", "q20",
        ];
        let sections = Section::ALL;
        StepController::new(
            IDS.iter()
                .take(n)
                .enumerate()
                .map(|(i, id)| question(*id, sections[(i * 4) / n.max(1)]))
                .collect(),
        )
        .expect("non-empty")
    }

    #[test]
    fn empty_list_is_rejected() {
        assert_eq!(
            StepController::new(Vec::new()).unwrap_err(),
            WizardError::EmptyQuestionnaire
        );
    }

    #[test]
    fn advancing_twenty_questions_stops_at_the_last() {
        let mut steps = controller(20);
        assert_eq!(steps.cursor(), 0);
        for _ in 0..19 {
            assert!(steps.advance());
        }
        assert_eq!(steps.cursor(), 19);
        assert!(!steps.advance());
        assert_eq!(steps.cursor(), 19);
        assert_eq!(steps.position(), Position::End);
        assert_eq!(steps.current().id, "q20");
    }

    #[test]
    fn retreat_at_start_is_a_noop() {
        let mut steps = controller(5);
        assert_eq!(steps.position(), Position::Start);
        assert!(!steps.retreat());
        assert_eq!(steps.cursor(), 0);
    }

    #[test]
    fn cursor_stays_in_bounds_for_mixed_sequences() {
        let mut steps = controller(7);
        // deterministic pseudo-random walk
        let mut seed: u32 = 0x2545_f491;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let before = steps.progress_fraction();
            if seed % 3 == 0 {
                steps.retreat();
                assert!(steps.progress_fraction() <= before);
            } else {
                steps.advance();
                assert!(steps.progress_fraction() >= before);
            }
            assert!(steps.cursor() < steps.len());
        }
    }

    #[test]
    fn progress_runs_from_zero_to_one() {
        let mut steps = controller(5);
        assert_eq!(steps.progress_fraction(), 0.0);
        steps.advance();
        assert_eq!(steps.progress_fraction(), 0.25);
        while steps.advance() {}
        assert_eq!(steps.progress_fraction(), 1.0);
        assert_eq!(steps.question_number(), (5, 5));
    }

    #[test]
    fn single_question_has_zero_progress_and_no_moves() {
        let mut steps = controller(1);
        assert_eq!(steps.progress_fraction(), 0.0);
        assert_eq!(steps.position(), Position::Only);
        assert!(!steps.advance());
        assert!(!steps.retreat());
    }

    #[test]
    fn cursor_moves_one_step_per_call() {
        let mut steps = controller(8);
        let mut seen = vec![steps.cursor()];
        while steps.advance() {
            seen.push(steps.cursor());
        }
        assert_eq!(seen, (0..8).collect::<Vec<_>>());
        assert!(steps.retreat());
        assert_eq!(steps.cursor(), 6);
    }
}
