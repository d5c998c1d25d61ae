pub mod chat_handler;
pub mod health_handler;
pub mod quiz_handler;

pub use chat_handler::{append_to_chat, create_chat, get_chat, get_user_chats};
pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use quiz_handler::{evaluate_answer, generate_quiz};
