use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateChatRequest {
    #[validate(length(min = 1, max = 10000))]
    pub text: String,
}

/// Body of a conversation-extension request.
///
/// `question` absent means the user turn was already recorded and only the
/// model turn is being appended. `img` references an already-uploaded asset
/// and is only meaningful alongside a question.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AppendChatRequest {
    #[validate(length(min = 1, max = 10000))]
    pub question: Option<String>,

    #[validate(length(min = 1, max = 100000))]
    pub answer: String,

    #[validate(length(min = 1, max = 1000))]
    pub img: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateQuizParams {
    #[validate(length(min = 1, max = 200))]
    pub topic: String,

    #[validate(range(min = 1, max = 20))]
    pub num_questions: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EvaluateAnswerRequest {
    #[validate(length(min = 1, max = 10000))]
    pub question: String,

    // May be empty: an empty string means "no answer given".
    pub user_answer: String,

    #[validate(length(min = 1, max = 10000))]
    pub reference_answer: String,
}
