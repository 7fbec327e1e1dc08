//! A single practice run: fixed problems, a cursor, and the answer log.

use mathcards_common::{AnswerRecord, Problem, SessionView};

/// In-progress practice session
#[derive(Debug, Clone)]
pub struct Session {
    operations: Vec<Problem>,
    /// Next unanswered problem
    cursor: usize,
    results: Vec<AnswerRecord>,
}

impl Session {
    pub fn new(operations: Vec<Problem>) -> Self {
        Self {
            operations,
            cursor: 0,
            results: Vec::new(),
        }
    }

    pub fn total(&self) -> usize {
        self.operations.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.operations.len()
    }

    /// Current view of the session
    pub fn view(&self) -> SessionView {
        match self.operations.get(self.cursor) {
            Some(problem) => SessionView::active(
                problem.view(),
                self.cursor + 1,
                self.total(),
                self.results.clone(),
            ),
            None => SessionView::finished(self.results.clone(), self.total()),
        }
    }

    /// Grade `answer` against the current problem and advance.
    ///
    /// Returns `None` without touching the log once the session is finished.
    pub fn submit(&mut self, answer: i64) -> Option<AnswerRecord> {
        let problem = self.operations.get(self.cursor)?;
        let record = AnswerRecord::grade(problem, answer);
        self.results.push(record.clone());
        self.cursor += 1;
        Some(record)
    }
}
