//! Core types shared across Mathcards components.

use serde::{Deserialize, Deserializer, Serialize, de};
use std::borrow::Borrow;
use std::fmt;

use crate::constants::FALLBACK_DIFFICULTY;

/// Which operators a session draws from.
///
/// Parsed leniently: anything other than `sum` or `mix` is treated as `sub`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum Mode {
    /// Addition only
    Sum,
    /// Subtraction only
    Sub,
    /// Each problem picks `+` or `-` at random
    Mix,
}

impl Mode {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "sum" => Self::Sum,
            "mix" => Self::Mix,
            _ => Self::Sub,
        }
    }
}

impl From<String> for Mode {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

/// Arithmetic operator of a single problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
}

impl Operator {
    pub fn apply(&self, a: i64, b: i64) -> i64 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
        }
    }
}

/// Operand sizes (in decimal digits) at one point of a session's ramp
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Stage {
    pub digits_a: u32,
    pub digits_b: u32,
}

impl Stage {
    pub const fn new(digits_a: u32, digits_b: u32) -> Self {
        Self { digits_a, digits_b }
    }
}

const STAGES_1: [Stage; 1] = [Stage::new(1, 1)];
const STAGES_2: [Stage; 2] = [Stage::new(1, 1), Stage::new(2, 1)];
const STAGES_3: [Stage; 3] = [Stage::new(1, 1), Stage::new(2, 1), Stage::new(2, 2)];
const STAGES_4: [Stage; 3] = [Stage::new(2, 1), Stage::new(2, 2), Stage::new(3, 2)];
const STAGES_5: [Stage; 3] = [Stage::new(2, 2), Stage::new(3, 2), Stage::new(3, 3)];
const STAGES_6: [Stage; 3] = [Stage::new(3, 2), Stage::new(3, 3), Stage::new(4, 3)];

/// Requested difficulty level (1-6).
///
/// The raw value is kept as sent. Values without a stage table ramp like
/// difficulty 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Difficulty(i64);

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient_int(deserializer).map(Self)
    }
}

impl Difficulty {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 6;

    pub fn new(level: i64) -> Self {
        Self(level)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Returns true if this level has its own stage table
    pub fn is_recognized(&self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.0)
    }

    /// Stage ramp for this level, easiest first
    pub fn stages(&self) -> &'static [Stage] {
        match self.0 {
            1 => &STAGES_1,
            2 => &STAGES_2,
            3 => &STAGES_3,
            4 => &STAGES_4,
            5 => &STAGES_5,
            6 => &STAGES_6,
            _ => Self(FALLBACK_DIFFICULTY).stages(),
        }
    }
}

/// A fully specified problem. The expected result is computed once, at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Problem {
    pub a: i64,
    pub b: i64,
    pub operator: Operator,
    pub result: i64,
}

impl Problem {
    /// Build a problem, swapping operands of a subtraction so the result is never negative
    pub fn new(a: i64, b: i64, operator: Operator) -> Self {
        let (a, b) = match operator {
            Operator::Sub if a < b => (b, a),
            _ => (a, b),
        };
        Self {
            a,
            b,
            operator,
            result: operator.apply(a, b),
        }
    }

    pub fn is_correct(&self, answer: i64) -> bool {
        answer == self.result
    }

    /// Client-facing view (no expected result)
    pub fn view(&self) -> OperationView {
        OperationView {
            a: self.a,
            b: self.b,
            operator: self.operator,
        }
    }
}

/// Problem as shown to the learner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationView {
    pub a: i64,
    pub b: i64,
    pub operator: Operator,
}

/// One graded answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub correct: bool,
    pub answer: i64,
    pub expected: i64,
    pub operation: OperationView,
}

impl AnswerRecord {
    pub fn grade(problem: &Problem, answer: i64) -> Self {
        Self {
            correct: problem.is_correct(answer),
            answer,
            expected: problem.result,
            operation: problem.view(),
        }
    }
}

/// Opaque session identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SessionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Settings chosen by the learner when starting a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeSettings {
    pub mode: Mode,
    pub difficulty: Difficulty,
    #[serde(deserialize_with = "lenient_int")]
    pub total_operations: i64,
}

impl PracticeSettings {
    /// Number of problems to generate; zero or negative requests give an empty session
    pub fn requested_count(&self) -> usize {
        usize::try_from(self.total_operations).unwrap_or(0)
    }
}

/// Integer as sent by a form: a JSON integer, an integral float, or a numeric string
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientInt {
    Int(i64),
    Float(f64),
    Text(String),
}

fn lenient_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match LenientInt::deserialize(deserializer)? {
        LenientInt::Int(value) => Ok(value),
        LenientInt::Float(value) if value.fract() == 0.0 && value.abs() <= i64::MAX as f64 => {
            Ok(value as i64)
        }
        LenientInt::Float(value) => Err(de::Error::custom(format!("expected an integer, got {value}"))),
        LenientInt::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected an integer, got {text:?}"))),
    }
}

/// Response to a session start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartedSession {
    pub session_id: SessionId,
    pub total: usize,
}

/// Session still has unanswered problems
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveView {
    pub finished: bool,
    pub operation: OperationView,
    /// 1-based position of `operation`
    pub index: usize,
    pub total: usize,
    pub results: Vec<AnswerRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_result: Option<AnswerRecord>,
}

/// Every problem has been answered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishedView {
    pub finished: bool,
    pub results: Vec<AnswerRecord>,
    pub total: usize,
    pub last_result: Option<AnswerRecord>,
}

/// What the learner sees after a peek or an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SessionView {
    Active(ActiveView),
    Finished(FinishedView),
}

impl SessionView {
    pub fn active(operation: OperationView, index: usize, total: usize, results: Vec<AnswerRecord>) -> Self {
        let last_result = results.last().cloned();
        Self::Active(ActiveView {
            finished: false,
            operation,
            index,
            total,
            results,
            last_result,
        })
    }

    pub fn finished(results: Vec<AnswerRecord>, total: usize) -> Self {
        let last_result = results.last().cloned();
        Self::Finished(FinishedView {
            finished: true,
            results,
            total,
            last_result,
        })
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished(_))
    }

    pub fn results(&self) -> &[AnswerRecord] {
        match self {
            Self::Active(view) => &view.results,
            Self::Finished(view) => &view.results,
        }
    }

    pub fn last_result(&self) -> Option<&AnswerRecord> {
        match self {
            Self::Active(view) => view.last_result.as_ref(),
            Self::Finished(view) => view.last_result.as_ref(),
        }
    }
}
