use serde::{Deserialize, Serialize};

/// Maximum title length, in characters, for a chat index entry.
pub const TITLE_MAX_CHARS: usize = 40;

/// One entry in a user's chat index. The title is derived once at chat
/// creation and never updated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatIndexEntry {
    pub chat_id: String,
    pub title: String,
}

/// Per-owner index document listing that owner's chats in creation order.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserChats {
    pub user_id: String,
    pub chats: Vec<ChatIndexEntry>,
}

impl ChatIndexEntry {
    pub fn new(chat_id: &str, opening_text: &str) -> Self {
        ChatIndexEntry {
            chat_id: chat_id.to_string(),
            title: derive_title(opening_text),
        }
    }
}

/// Derives an index title from the opening user text: a hard cut at
/// [`TITLE_MAX_CHARS`] characters, no word-boundary trimming.
pub fn derive_title(text: &str) -> String {
    text.chars().take(TITLE_MAX_CHARS).collect()
}
