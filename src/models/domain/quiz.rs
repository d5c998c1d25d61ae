use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One generated question with its reference answer.
///
/// Produced by the structured-generation pipeline and returned to the caller
/// within a single request; never persisted. The shape doubles as the decode
/// schema for the model's raw output: anything that does not deserialize
/// into `Vec<QuizQuestion>` is rejected as malformed.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct QuizQuestion {
    pub question: String,
    pub answer: String,
}

/// Correctness judgment for one (question, user answer, reference answer)
/// triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Evaluation {
    pub correct: bool,
}
