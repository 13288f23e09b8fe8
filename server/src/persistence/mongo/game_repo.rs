//! MongoDB-backed game repository.

use catalog::{timestamp, Game, GameFilter, GamePatch, NewGame, NewReview, Review};
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::options::ReturnDocument;
use mongodb::Collection;
use tracing::debug;

use super::records::{list_query, patch_to_set, GameRecord, ReviewRecord};
use super::MongoConnectionManager;
use crate::persistence::traits::GameRepository;
use crate::persistence::PersistenceError;

pub const GAMES_COLLECTION: &str = "juegos";

/// MongoDB implementation of [`GameRepository`]. Every call resolves the
/// current handle from the connection manager, so a reconnect is picked up
/// without rebuilding the repository.
pub struct MongoGameRepository {
    connection: MongoConnectionManager,
}

impl MongoGameRepository {
    pub fn new(connection: MongoConnectionManager) -> Self {
        Self { connection }
    }

    async fn games(&self) -> Result<Collection<GameRecord>, PersistenceError> {
        let db = self
            .connection
            .handle()
            .await
            .map_err(|_| PersistenceError::NotInitialized)?;
        Ok(db.collection(GAMES_COLLECTION))
    }
}

/// Parse a path id. Malformed ids are reported as `None`.
fn object_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

impl GameRepository for MongoGameRepository {
    async fn create(&self, game: NewGame) -> Result<Game, PersistenceError> {
        let record = GameRecord::new(game, timestamp::now());
        self.games().await?.insert_one(&record).await?;
        debug!(id = %record.id, "Game inserted");
        Ok(record.into())
    }

    async fn list(&self, filter: &GameFilter) -> Result<Vec<Game>, PersistenceError> {
        let records: Vec<GameRecord> = self
            .games()
            .await?
            .find(list_query(filter))
            .sort(doc! { "fechaCreacion": -1, "_id": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(records.into_iter().map(Game::from).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Game>, PersistenceError> {
        let Some(oid) = object_id(id) else {
            return Ok(None);
        };
        let record = self.games().await?.find_one(doc! { "_id": oid }).await?;
        Ok(record.map(Game::from))
    }

    async fn update(&self, id: &str, patch: &GamePatch) -> Result<Option<Game>, PersistenceError> {
        let Some(oid) = object_id(id) else {
            return Ok(None);
        };
        if patch.is_empty() {
            return self.get(id).await;
        }
        let record = self
            .games()
            .await?
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": patch_to_set(patch) })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(record.map(Game::from))
    }

    async fn delete(&self, id: &str) -> Result<bool, PersistenceError> {
        let Some(oid) = object_id(id) else {
            return Ok(false);
        };
        let result = self.games().await?.delete_one(doc! { "_id": oid }).await?;
        Ok(result.deleted_count == 1)
    }

    async fn add_review(
        &self,
        game_id: &str,
        review: NewReview,
    ) -> Result<Option<Review>, PersistenceError> {
        let oid =
            object_id(game_id).ok_or_else(|| PersistenceError::InvalidId(game_id.to_string()))?;
        let games = self.games().await?;

        let record = ReviewRecord::new(oid, review, timestamp::now());
        let pushed = mongodb::bson::to_document(&record)?;
        let result = games
            .update_one(doc! { "_id": oid }, doc! { "$push": { "reseñas": pushed } })
            .await?;
        if result.matched_count == 0 {
            return Ok(None);
        }
        debug!(game = %oid, review = %record.id, "Review appended");
        Ok(Some(record.into()))
    }

    async fn list_reviews(&self, game_id: &str) -> Result<Vec<Review>, PersistenceError> {
        Ok(self
            .get(game_id)
            .await?
            .map(|game| game.reviews)
            .unwrap_or_default())
    }
}
