use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{ChatRepository, MongoChatRepository, MongoUserChatsRepository, UserChatsRepository},
    services::{chat_service::ChatService, model_service::OpenAiModelService, quiz_service::QuizService},
};

#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ChatService>,
    pub quiz_service: Arc<QuizService>,
    pub db: Database,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let chat_repository: Arc<dyn ChatRepository> = Arc::new(MongoChatRepository::new(&db));
        chat_repository.ensure_indexes().await?;

        let user_chats_repository: Arc<dyn UserChatsRepository> =
            Arc::new(MongoUserChatsRepository::new(&db));
        user_chats_repository.ensure_indexes().await?;

        let chat_service = Arc::new(ChatService::new(chat_repository, user_chats_repository));

        let model_service = Arc::new(OpenAiModelService::new(&config));
        let quiz_service = Arc::new(QuizService::new(model_service));

        Ok(Self {
            chat_service,
            quiz_service,
            db,
            config: Arc::new(config),
        })
    }
}
