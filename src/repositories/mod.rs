pub mod chat_repository;
pub mod user_chats_repository;

pub use chat_repository::{ChatRepository, MongoChatRepository};
pub use user_chats_repository::{MongoUserChatsRepository, UserChatsRepository};
