use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Chat, ChatIndexEntry, Turn},
        dto::response::CreateChatResponse,
    },
    repositories::{ChatRepository, UserChatsRepository},
};

/// Owns the rules for extending a conversation transcript: creation with the
/// opening user turn plus index entry, and append-only extension. Everything
/// else (storage, identity, the model itself) is behind its collaborators.
pub struct ChatService {
    chat_repository: Arc<dyn ChatRepository>,
    user_chats_repository: Arc<dyn UserChatsRepository>,
}

impl ChatService {
    pub fn new(
        chat_repository: Arc<dyn ChatRepository>,
        user_chats_repository: Arc<dyn UserChatsRepository>,
    ) -> Self {
        Self {
            chat_repository,
            user_chats_repository,
        }
    }

    /// Creates a new chat whose history is the single opening user turn, and
    /// ensures the owner's index lists it.
    ///
    /// The chat document and the index entry live in different documents, so
    /// there is no cross-document transaction: if the index write fails after
    /// the chat was created, the chat exists but is undiscoverable via the
    /// index. That window is surfaced as `indexed: false` rather than masked.
    pub async fn start_chat(&self, user_id: &str, text: &str) -> AppResult<CreateChatResponse> {
        if text.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Chat text cannot be empty".to_string(),
            ));
        }

        let chat = self.chat_repository.create(Chat::new(user_id, text)).await?;

        let entry = ChatIndexEntry::new(&chat.id, text);
        let indexed = match self.user_chats_repository.push_entry(user_id, entry).await {
            Ok(()) => true,
            Err(err) => {
                log::warn!(
                    "Chat {} created but index update for user {} failed: {}",
                    chat.id,
                    user_id,
                    err
                );
                false
            }
        };

        Ok(CreateChatResponse {
            chat_id: chat.id,
            indexed,
        })
    }

    /// Appends one conversational exchange: an optional user turn (with an
    /// optional attachment) followed by the model turn, as one atomic
    /// extension. Returns the store's modified count (always 1 on success).
    ///
    /// An unknown chat id and an owner mismatch both surface as `NotFound`;
    /// collapsing them avoids leaking whether another user's chat exists.
    pub async fn append_turns(
        &self,
        chat_id: &str,
        user_id: &str,
        question: Option<String>,
        answer: String,
        img: Option<String>,
    ) -> AppResult<u64> {
        if answer.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Answer text cannot be empty".to_string(),
            ));
        }
        if img.is_some() && question.is_none() {
            // An attachment can only ride on a user turn.
            return Err(AppError::ValidationError(
                "An attachment requires an accompanying question".to_string(),
            ));
        }

        let mut turns = Vec::with_capacity(2);
        if let Some(question) = question {
            if question.trim().is_empty() {
                return Err(AppError::ValidationError(
                    "Question text, if given, cannot be empty".to_string(),
                ));
            }
            turns.push(match img {
                Some(img) => Turn::user_with_attachment(question, img),
                None => Turn::user(question),
            });
        }
        turns.push(Turn::model(answer));

        let modified_count = self
            .chat_repository
            .append_turns(chat_id, user_id, &turns)
            .await?;

        if modified_count == 0 {
            return Err(AppError::NotFound(format!(
                "Chat with id '{}' not found",
                chat_id
            )));
        }

        Ok(modified_count)
    }

    pub async fn get_chat(&self, chat_id: &str, user_id: &str) -> AppResult<Chat> {
        let chat = self
            .chat_repository
            .find_by_id_and_user(chat_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Chat with id '{}' not found", chat_id)))?;

        Ok(chat)
    }

    pub async fn get_user_chats(&self, user_id: &str) -> AppResult<Vec<ChatIndexEntry>> {
        let user_chats = self
            .user_chats_repository
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("No chats found for this user".to_string()))?;

        Ok(user_chats.chats)
    }
}
