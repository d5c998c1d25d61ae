pub mod chat;
pub mod quiz;
pub mod user_chats;

pub use chat::{Chat, Turn, TurnPart, TurnRole};
pub use quiz::{Evaluation, QuizQuestion};
pub use user_chats::{ChatIndexEntry, UserChats};
