pub mod chat_service;
pub mod model_service;
pub mod quiz_service;

pub use chat_service::ChatService;
pub use model_service::{ModelService, OpenAiModelService};
pub use quiz_service::QuizService;
