use async_trait::async_trait;
use chrono::Utc;
use mongodb::{
    bson::{doc, to_bson},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{Chat, Turn},
};

#[async_trait]
pub trait ChatRepository: Send + Sync {
    async fn create(&self, chat: Chat) -> AppResult<Chat>;
    async fn find_by_id_and_user(&self, chat_id: &str, user_id: &str)
        -> AppResult<Option<Chat>>;
    /// Appends `turns` as one contiguous, atomic extension of the history,
    /// scoped by owner. Returns the number of documents modified, which is 0
    /// when no chat matched `(chat_id, user_id)`.
    async fn append_turns(&self, chat_id: &str, user_id: &str, turns: &[Turn])
        -> AppResult<u64>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoChatRepository {
    collection: Collection<Chat>,
}

impl MongoChatRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("chats");
        Self { collection }
    }
}

#[async_trait]
impl ChatRepository for MongoChatRepository {
    async fn create(&self, chat: Chat) -> AppResult<Chat> {
        self.collection.insert_one(&chat).await?;
        Ok(chat)
    }

    async fn find_by_id_and_user(
        &self,
        chat_id: &str,
        user_id: &str,
    ) -> AppResult<Option<Chat>> {
        let chat = self
            .collection
            .find_one(doc! { "id": chat_id, "user_id": user_id })
            .await?;
        Ok(chat)
    }

    async fn append_turns(
        &self,
        chat_id: &str,
        user_id: &str,
        turns: &[Turn],
    ) -> AppResult<u64> {
        let turns_bson = to_bson(&turns)?;
        let modified_at = to_bson(&Utc::now())?;

        // Single $push/$each: the extension is contiguous and all-or-nothing,
        // and an owner mismatch is a zero-match no-op.
        let result = self
            .collection
            .update_one(
                doc! { "id": chat_id, "user_id": user_id },
                doc! {
                    "$push": { "history": { "$each": turns_bson } },
                    "$set": { "modified_at": modified_at },
                },
            )
            .await?;

        Ok(result.modified_count)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for chats collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;

        Ok(())
    }
}
