use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{EvaluateAnswerRequest, GenerateQuizParams},
};

#[get("/api/quiz/generate")]
pub async fn generate_quiz(
    state: web::Data<AppState>,
    query: web::Query<GenerateQuizParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    params.validate()?;

    let questions = state
        .quiz_service
        .generate_quiz(&params.topic, params.num_questions.map(|n| n as u8))
        .await?;

    Ok(HttpResponse::Ok().json(questions))
}

#[post("/api/quiz/evaluate")]
pub async fn evaluate_answer(
    state: web::Data<AppState>,
    request: web::Json<EvaluateAnswerRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let evaluation = state
        .quiz_service
        .evaluate_answer(
            &request.question,
            &request.user_answer,
            &request.reference_answer,
        )
        .await?;

    Ok(HttpResponse::Ok().json(evaluation))
}
