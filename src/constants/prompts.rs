use crate::models::domain::QuizQuestion;

pub const QUIZ_OUTPUT_RULES: &str = r#"## OUTPUT FORMAT

Format the output as a JSON array of objects, where each object has a "question" field and an "answer" field. Both fields are strings.

## OUTPUT INSTRUCTIONS

Return ONLY the JSON array. Do not include:
- Explanatory text before or after the JSON
- Markdown code blocks or formatting
- Any commentary or additional content

The response must be a single, valid JSON array that can be immediately parsed."#;

/// Builds the quiz-generation prompt for one request. The expected element
/// shape is embedded as a JSON schema so the model has no room to improvise
/// field names.
pub fn quiz_generation_prompt(topic: &str, count: u8) -> String {
    let schema = schemars::schema_for!(Vec<QuizQuestion>);
    let schema_json =
        serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string());

    format!(
        "Generate a quiz about {topic} with exactly {count} questions. Each question should have a correct answer.\n\n{QUIZ_OUTPUT_RULES}\n\nThe response must validate against this JSON schema:\n{schema_json}"
    )
}

/// Builds the answer-evaluation prompt. The parser requires the response to
/// be exactly the literal token `true` or `false`.
pub fn answer_evaluation_prompt(question: &str, user_answer: &str, reference_answer: &str) -> String {
    format!(
        "Question: {question}\nUser's answer: {user_answer}\nCorrect answer: {reference_answer}\nIs the user's answer correct? Respond with exactly the literal token 'true' or 'false' and nothing else."
    )
}
