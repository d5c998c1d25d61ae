use serde::Serialize;

/// Outcome of chat creation.
///
/// `indexed` is false when the chat document was written but the owner's
/// index update failed: the chat exists and is addressable by id, it just
/// does not appear in the sidebar listing yet. Callers can tell this partial
/// success apart from both full success and full failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateChatResponse {
    pub chat_id: String,
    pub indexed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppendChatResponse {
    pub modified_count: u64,
}
