use std::sync::Arc;

use crate::{
    constants::prompts,
    errors::{AppError, AppResult},
    models::domain::{Evaluation, QuizQuestion},
    services::model_service::ModelService,
};

pub const DEFAULT_QUESTION_COUNT: u8 = 5;
pub const MAX_QUESTION_COUNT: u8 = 20;

/// The structured-generation pipeline: builds a prompt, calls the model, and
/// turns its untrusted free text into typed records, failing closed on any
/// shape violation.
///
/// Neither task retries internally and neither substitutes a default on
/// failure; a caller that wants another attempt re-requests.
pub struct QuizService {
    model_service: Arc<dyn ModelService>,
}

impl QuizService {
    pub fn new(model_service: Arc<dyn ModelService>) -> Self {
        Self { model_service }
    }

    /// Generates `count` question/answer pairs about `topic`.
    ///
    /// The raw response must decode as a JSON array of
    /// `{question, answer}` objects with string fields. Anything else is
    /// `MalformedOutput`: no repair, no code-fence stripping, no partial
    /// results.
    pub async fn generate_quiz(
        &self,
        topic: &str,
        count: Option<u8>,
    ) -> AppResult<Vec<QuizQuestion>> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(AppError::ValidationError(
                "Quiz topic cannot be empty".to_string(),
            ));
        }

        let count = count.unwrap_or(DEFAULT_QUESTION_COUNT);
        if count == 0 || count > MAX_QUESTION_COUNT {
            return Err(AppError::ValidationError(format!(
                "Question count must be between 1 and {}",
                MAX_QUESTION_COUNT
            )));
        }

        let prompt = prompts::quiz_generation_prompt(topic, count);
        let raw = self.model_service.generate(&prompt, &[]).await?;

        let questions: Vec<QuizQuestion> = serde_json::from_str(&raw).map_err(|err| {
            AppError::MalformedOutput(format!(
                "Quiz response was not a JSON array of question/answer objects: {}",
                err
            ))
        })?;

        Ok(questions)
    }

    /// Judges whether `user_answer` matches `reference_answer` for
    /// `question`. `user_answer` may be empty ("no answer given").
    ///
    /// The response must be exactly the literal token `true` or `false`
    /// after trimming and case-folding. Anything else, including prose that
    /// merely contains one of the tokens, is `MalformedOutput` and is never
    /// coerced to `false`.
    pub async fn evaluate_answer(
        &self,
        question: &str,
        user_answer: &str,
        reference_answer: &str,
    ) -> AppResult<Evaluation> {
        if question.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Question cannot be empty".to_string(),
            ));
        }
        if reference_answer.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Reference answer cannot be empty".to_string(),
            ));
        }

        let prompt = prompts::answer_evaluation_prompt(question, user_answer, reference_answer);
        let raw = self.model_service.generate(&prompt, &[]).await?;

        let correct = match raw.trim().to_ascii_lowercase().as_str() {
            "true" => true,
            "false" => false,
            other => {
                return Err(AppError::MalformedOutput(format!(
                    "Evaluation response was not the literal token 'true' or 'false': '{}'",
                    other
                )))
            }
        };

        Ok(Evaluation { correct })
    }
}
