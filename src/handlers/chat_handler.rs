use actix_web::{get, post, put, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{AppendChatRequest, CreateChatRequest},
        response::AppendChatResponse,
    },
};

#[post("/api/chats")]
pub async fn create_chat(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    request: web::Json<CreateChatRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let response = state.chat_service.start_chat(&auth.0, &request.text).await?;
    Ok(HttpResponse::Created().json(response))
}

#[put("/api/chats/{id}")]
pub async fn append_to_chat(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
    request: web::Json<AppendChatRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let modified_count = state
        .chat_service
        .append_turns(&id, &auth.0, request.question, request.answer, request.img)
        .await?;

    Ok(HttpResponse::Ok().json(AppendChatResponse { modified_count }))
}

#[get("/api/chats/{id}")]
pub async fn get_chat(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let chat = state.chat_service.get_chat(&id, &auth.0).await?;
    Ok(HttpResponse::Ok().json(chat))
}

#[get("/api/userchats")]
pub async fn get_user_chats(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let chats = state.chat_service.get_user_chats(&auth.0).await?;
    Ok(HttpResponse::Ok().json(chats))
}
