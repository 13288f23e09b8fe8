//! In-process repository. Used when the server runs without a database and
//! as the backing store for HTTP tests.

use catalog::{
    is_valid_object_id, timestamp, Game, GameFilter, GamePatch, NewGame, NewReview, Review,
};
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::traits::GameRepository;
use super::PersistenceError;

/// [`GameRepository`] over a vector guarded by an async lock. Identifiers are
/// generated with the same syntax the database uses, so id validation
/// behaves identically.
#[derive(Default)]
pub struct MemoryGameRepository {
    games: RwLock<Vec<Game>>,
}

impl MemoryGameRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn new_id() -> String {
    ObjectId::new().to_hex()
}

fn same_id(stored: &str, requested: &str) -> bool {
    stored.eq_ignore_ascii_case(requested)
}

impl GameRepository for MemoryGameRepository {
    async fn create(&self, game: NewGame) -> Result<Game, PersistenceError> {
        let game = game.into_game(new_id(), timestamp::now());
        self.games.write().await.push(game.clone());
        Ok(game)
    }

    async fn list(&self, filter: &GameFilter) -> Result<Vec<Game>, PersistenceError> {
        let games = self.games.read().await;
        // Reverse first so the stable sort keeps later inserts ahead on ties.
        let mut matching: Vec<Game> = games
            .iter()
            .rev()
            .filter(|game| filter.matches(game))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn get(&self, id: &str) -> Result<Option<Game>, PersistenceError> {
        if !is_valid_object_id(id) {
            return Ok(None);
        }
        let games = self.games.read().await;
        Ok(games.iter().find(|game| same_id(&game.id, id)).cloned())
    }

    async fn update(&self, id: &str, patch: &GamePatch) -> Result<Option<Game>, PersistenceError> {
        if !is_valid_object_id(id) {
            return Ok(None);
        }
        let mut games = self.games.write().await;
        Ok(games
            .iter_mut()
            .find(|game| same_id(&game.id, id))
            .map(|game| {
                patch.apply(game);
                game.clone()
            }))
    }

    async fn delete(&self, id: &str) -> Result<bool, PersistenceError> {
        if !is_valid_object_id(id) {
            return Ok(false);
        }
        let mut games = self.games.write().await;
        let before = games.len();
        games.retain(|game| !same_id(&game.id, id));
        Ok(games.len() < before)
    }

    async fn add_review(
        &self,
        game_id: &str,
        review: NewReview,
    ) -> Result<Option<Review>, PersistenceError> {
        if !is_valid_object_id(game_id) {
            return Err(PersistenceError::InvalidId(game_id.to_string()));
        }
        let mut games = self.games.write().await;
        let Some(game) = games.iter_mut().find(|game| same_id(&game.id, game_id)) else {
            return Ok(None);
        };
        let review = review.into_review(new_id(), game.id.clone(), timestamp::now());
        game.reviews.push(review.clone());
        Ok(Some(review))
    }

    async fn list_reviews(&self, game_id: &str) -> Result<Vec<Review>, PersistenceError> {
        Ok(self
            .get(game_id)
            .await?
            .map(|game| game.reviews)
            .unwrap_or_default())
    }
}
