use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_bson},
    options::{IndexOptions, UpdateOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{ChatIndexEntry, UserChats},
};

#[async_trait]
pub trait UserChatsRepository: Send + Sync {
    async fn find_by_user(&self, user_id: &str) -> AppResult<Option<UserChats>>;
    /// Ensures the owner's index contains `entry`: appends to the existing
    /// index document, or creates the document with this single entry if the
    /// owner has none yet. One atomic store operation either way.
    async fn push_entry(&self, user_id: &str, entry: ChatIndexEntry) -> AppResult<()>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoUserChatsRepository {
    collection: Collection<UserChats>,
}

impl MongoUserChatsRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("userchats");
        Self { collection }
    }
}

#[async_trait]
impl UserChatsRepository for MongoUserChatsRepository {
    async fn find_by_user(&self, user_id: &str) -> AppResult<Option<UserChats>> {
        let user_chats = self
            .collection
            .find_one(doc! { "user_id": user_id })
            .await?;
        Ok(user_chats)
    }

    async fn push_entry(&self, user_id: &str, entry: ChatIndexEntry) -> AppResult<()> {
        let entry_bson = to_bson(&entry)?;
        let options = UpdateOptions::builder().upsert(true).build();

        self.collection
            .update_one(
                doc! { "user_id": user_id },
                doc! { "$push": { "chats": entry_bson } },
            )
            .with_options(options)
            .await?;

        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for userchats collection");

        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("user_id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(user_index).await?;

        Ok(())
    }
}
