use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use mentor_server::{
    errors::{AppError, AppResult},
    models::domain::{Chat, ChatIndexEntry, Turn, TurnRole, UserChats},
    repositories::{ChatRepository, UserChatsRepository},
    services::ChatService,
};

struct InMemoryChatRepository {
    chats: Arc<RwLock<HashMap<String, Chat>>>,
}

impl InMemoryChatRepository {
    fn new() -> Self {
        Self {
            chats: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn get(&self, chat_id: &str) -> Option<Chat> {
        let chats = self.chats.read().await;
        chats.get(chat_id).cloned()
    }
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn create(&self, chat: Chat) -> AppResult<Chat> {
        let mut chats = self.chats.write().await;
        chats.insert(chat.id.clone(), chat.clone());
        Ok(chat)
    }

    async fn find_by_id_and_user(
        &self,
        chat_id: &str,
        user_id: &str,
    ) -> AppResult<Option<Chat>> {
        let chats = self.chats.read().await;
        Ok(chats
            .get(chat_id)
            .filter(|chat| chat.user_id == user_id)
            .cloned())
    }

    async fn append_turns(
        &self,
        chat_id: &str,
        user_id: &str,
        turns: &[Turn],
    ) -> AppResult<u64> {
        let mut chats = self.chats.write().await;
        match chats.get_mut(chat_id).filter(|chat| chat.user_id == user_id) {
            Some(chat) => {
                chat.history.extend_from_slice(turns);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

struct InMemoryUserChatsRepository {
    indexes: Arc<RwLock<HashMap<String, UserChats>>>,
}

impl InMemoryUserChatsRepository {
    fn new() -> Self {
        Self {
            indexes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn entries_for(&self, user_id: &str) -> Vec<ChatIndexEntry> {
        let indexes = self.indexes.read().await;
        indexes
            .get(user_id)
            .map(|index| index.chats.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl UserChatsRepository for InMemoryUserChatsRepository {
    async fn find_by_user(&self, user_id: &str) -> AppResult<Option<UserChats>> {
        let indexes = self.indexes.read().await;
        Ok(indexes.get(user_id).cloned())
    }

    async fn push_entry(&self, user_id: &str, entry: ChatIndexEntry) -> AppResult<()> {
        let mut indexes = self.indexes.write().await;
        indexes
            .entry(user_id.to_string())
            .or_insert_with(|| UserChats {
                user_id: user_id.to_string(),
                chats: Vec::new(),
            })
            .chats
            .push(entry);
        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Index store whose writes always fail, for exercising the
/// created-but-unindexed window.
struct FailingUserChatsRepository;

#[async_trait]
impl UserChatsRepository for FailingUserChatsRepository {
    async fn find_by_user(&self, _user_id: &str) -> AppResult<Option<UserChats>> {
        Err(AppError::DatabaseError("index store unavailable".to_string()))
    }

    async fn push_entry(&self, _user_id: &str, _entry: ChatIndexEntry) -> AppResult<()> {
        Err(AppError::DatabaseError("index store unavailable".to_string()))
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

fn make_service() -> (
    ChatService,
    Arc<InMemoryChatRepository>,
    Arc<InMemoryUserChatsRepository>,
) {
    let chat_repo = Arc::new(InMemoryChatRepository::new());
    let index_repo = Arc::new(InMemoryUserChatsRepository::new());
    let service = ChatService::new(chat_repo.clone(), index_repo.clone());
    (service, chat_repo, index_repo)
}

#[tokio::test]
async fn start_chat_creates_single_user_turn_and_index_entry() {
    let (service, chat_repo, index_repo) = make_service();

    let created = service
        .start_chat("u1", "Explain recursion")
        .await
        .expect("creation should succeed");
    assert!(created.indexed);

    let chat = chat_repo.get(&created.chat_id).await.expect("chat exists");
    assert_eq!(chat.user_id, "u1");
    assert_eq!(chat.history.len(), 1);
    assert_eq!(chat.history[0].role, TurnRole::User);
    assert_eq!(chat.history[0].text(), "Explain recursion");

    let entries = index_repo.entries_for("u1").await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].chat_id, created.chat_id);
    assert_eq!(entries[0].title, "Explain recursion");
}

#[tokio::test]
async fn start_chat_truncates_title_to_forty_chars() {
    let (service, _, index_repo) = make_service();

    let text = "x".repeat(120);
    service
        .start_chat("u1", &text)
        .await
        .expect("creation should succeed");

    let entries = index_repo.entries_for("u1").await;
    assert_eq!(entries[0].title, "x".repeat(40));
}

#[tokio::test]
async fn start_chat_appends_entry_to_existing_index() {
    let (service, _, index_repo) = make_service();

    let first = service.start_chat("u1", "first chat").await.expect("create");
    let second = service.start_chat("u1", "second chat").await.expect("create");

    let entries = index_repo.entries_for("u1").await;
    assert_eq!(entries.len(), 2);
    // Creation order is preserved
    assert_eq!(entries[0].chat_id, first.chat_id);
    assert_eq!(entries[1].chat_id, second.chat_id);
}

#[tokio::test]
async fn start_chat_rejects_empty_text_before_any_write() {
    let (service, chat_repo, _) = make_service();

    let result = service.start_chat("u1", "   ").await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));

    let chats = chat_repo.chats.read().await;
    assert!(chats.is_empty());
}

#[tokio::test]
async fn start_chat_surfaces_partial_success_when_index_write_fails() {
    let chat_repo = Arc::new(InMemoryChatRepository::new());
    let service = ChatService::new(chat_repo.clone(), Arc::new(FailingUserChatsRepository));

    let created = service
        .start_chat("u1", "Explain recursion")
        .await
        .expect("partial success is still a success");

    // The chat exists and is addressable, but the caller is told it is
    // not discoverable via the index.
    assert!(!created.indexed);
    assert!(chat_repo.get(&created.chat_id).await.is_some());
}

#[tokio::test]
async fn append_orders_user_turn_before_model_turn() {
    let (service, chat_repo, _) = make_service();

    let created = service.start_chat("u1", "Explain recursion").await.expect("create");

    service
        .append_turns(
            &created.chat_id,
            "u1",
            Some("And tail calls?".to_string()),
            "A tail call is...".to_string(),
            None,
        )
        .await
        .expect("append should succeed");

    let chat = chat_repo.get(&created.chat_id).await.expect("chat exists");
    assert_eq!(chat.history.len(), 3);
    assert_eq!(chat.history[1].role, TurnRole::User);
    assert_eq!(chat.history[1].text(), "And tail calls?");
    assert_eq!(chat.history[2].role, TurnRole::Model);
    assert_eq!(chat.history[2].text(), "A tail call is...");
}

#[tokio::test]
async fn append_without_question_adds_only_model_turn() {
    let (service, chat_repo, _) = make_service();

    let created = service.start_chat("u1", "Explain recursion").await.expect("create");

    service
        .append_turns(
            &created.chat_id,
            "u1",
            None,
            "Recursion is...".to_string(),
            None,
        )
        .await
        .expect("append should succeed");

    let chat = chat_repo.get(&created.chat_id).await.expect("chat exists");
    assert_eq!(chat.history.len(), 2);
    assert_eq!(chat.history[0].text(), "Explain recursion");
    assert_eq!(chat.history[1].role, TurnRole::Model);
    assert_eq!(chat.history[1].text(), "Recursion is...");
}

#[tokio::test]
async fn history_length_follows_append_arithmetic() {
    let (service, chat_repo, _) = make_service();

    let created = service.start_chat("u1", "opening").await.expect("create");

    // Two question+answer appends and one answer-only append:
    // 1 + 2 + 2 + 1 = 6 turns.
    for question in ["q1", "q2"] {
        service
            .append_turns(
                &created.chat_id,
                "u1",
                Some(question.to_string()),
                format!("answer to {}", question),
                None,
            )
            .await
            .expect("append should succeed");
    }
    service
        .append_turns(&created.chat_id, "u1", None, "follow-up".to_string(), None)
        .await
        .expect("append should succeed");

    let chat = chat_repo.get(&created.chat_id).await.expect("chat exists");
    assert_eq!(chat.history.len(), 6);
}

#[tokio::test]
async fn append_carries_attachment_on_user_turn_only() {
    let (service, chat_repo, _) = make_service();

    let created = service.start_chat("u1", "opening").await.expect("create");

    service
        .append_turns(
            &created.chat_id,
            "u1",
            Some("What is in this picture?".to_string()),
            "A diagram of the stack.".to_string(),
            Some("uploads/diagram.png".to_string()),
        )
        .await
        .expect("append should succeed");

    let chat = chat_repo.get(&created.chat_id).await.expect("chat exists");
    let user_turn = &chat.history[1];
    let model_turn = &chat.history[2];
    assert_eq!(user_turn.img.as_deref(), Some("uploads/diagram.png"));
    assert!(model_turn.img.is_none());
}

#[tokio::test]
async fn append_rejects_attachment_without_question() {
    let (service, chat_repo, _) = make_service();

    let created = service.start_chat("u1", "opening").await.expect("create");

    let result = service
        .append_turns(
            &created.chat_id,
            "u1",
            None,
            "answer".to_string(),
            Some("uploads/diagram.png".to_string()),
        )
        .await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));

    let chat = chat_repo.get(&created.chat_id).await.expect("chat exists");
    assert_eq!(chat.history.len(), 1);
}

#[tokio::test]
async fn append_with_wrong_owner_is_not_found_and_mutates_nothing() {
    let (service, chat_repo, _) = make_service();

    let created = service.start_chat("u1", "opening").await.expect("create");

    let result = service
        .append_turns(
            &created.chat_id,
            "u2",
            None,
            "intruding answer".to_string(),
            None,
        )
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let chat = chat_repo.get(&created.chat_id).await.expect("chat exists");
    assert_eq!(chat.history.len(), 1);
}

#[tokio::test]
async fn append_to_unknown_chat_is_indistinguishable_from_wrong_owner() {
    let (service, _, _) = make_service();

    let created = service.start_chat("u1", "opening").await.expect("create");

    let missing = service
        .append_turns("no-such-chat", "u1", None, "answer".to_string(), None)
        .await
        .expect_err("unknown chat should fail");
    let foreign = service
        .append_turns(&created.chat_id, "u2", None, "answer".to_string(), None)
        .await
        .expect_err("foreign chat should fail");

    assert!(matches!(missing, AppError::NotFound(_)));
    assert!(matches!(foreign, AppError::NotFound(_)));
}

#[tokio::test]
async fn get_chat_is_scoped_by_owner() {
    let (service, _, _) = make_service();

    let created = service.start_chat("u1", "opening").await.expect("create");

    let chat = service
        .get_chat(&created.chat_id, "u1")
        .await
        .expect("owner can read own chat");
    assert_eq!(chat.id, created.chat_id);

    let result = service.get_chat(&created.chat_id, "u2").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn get_user_chats_returns_not_found_when_index_is_absent() {
    let (service, _, _) = make_service();

    let result = service.get_user_chats("nobody").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn start_then_answer_only_append_scenario() {
    let (service, chat_repo, _) = make_service();

    let created = service
        .start_chat("u1", "Explain recursion")
        .await
        .expect("create");
    service
        .append_turns(
            &created.chat_id,
            "u1",
            None,
            "Recursion is...".to_string(),
            None,
        )
        .await
        .expect("append");

    let chat = chat_repo.get(&created.chat_id).await.expect("chat exists");
    let transcript: Vec<(TurnRole, String)> = chat
        .history
        .iter()
        .map(|turn| (turn.role, turn.text()))
        .collect();

    assert_eq!(
        transcript,
        vec![
            (TurnRole::User, "Explain recursion".to_string()),
            (TurnRole::Model, "Recursion is...".to_string()),
        ]
    );
}
