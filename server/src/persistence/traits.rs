//! Async repository trait for the game aggregate.
//!
//! Methods return `impl Future + Send` rather than using `async fn` so that
//! the futures are guaranteed `Send`, which axum handlers require.
//! Implementations may still be written with `async fn`.

use catalog::{Game, GameFilter, GamePatch, NewGame, NewReview, Review};
use std::future::Future;

use super::PersistenceError;

/// Repository for games and their embedded reviews.
///
/// Identifier handling is asymmetric: `get`, `update`, `delete`
/// and `list_reviews` treat a malformed id as "no such game", while
/// `add_review` rejects it with [`PersistenceError::InvalidId`].
pub trait GameRepository: Send + Sync {
    /// Insert a game, stamping its id and creation time.
    fn create(
        &self,
        game: NewGame,
    ) -> impl Future<Output = Result<Game, PersistenceError>> + Send;

    /// All games matching `filter`, newest first.
    fn list(
        &self,
        filter: &GameFilter,
    ) -> impl Future<Output = Result<Vec<Game>, PersistenceError>> + Send;

    fn get(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Game>, PersistenceError>> + Send;

    /// Apply a partial update and return the updated game, or `None` when
    /// nothing matched.
    fn update(
        &self,
        id: &str,
        patch: &GamePatch,
    ) -> impl Future<Output = Result<Option<Game>, PersistenceError>> + Send;

    /// Hard delete. Returns whether exactly one game was removed.
    fn delete(&self, id: &str) -> impl Future<Output = Result<bool, PersistenceError>> + Send;

    /// Append a review to a game. Returns the created review, or `None` when
    /// the game does not exist.
    fn add_review(
        &self,
        game_id: &str,
        review: NewReview,
    ) -> impl Future<Output = Result<Option<Review>, PersistenceError>> + Send;

    /// The game's reviews in insertion order; empty when the game is missing.
    fn list_reviews(
        &self,
        game_id: &str,
    ) -> impl Future<Output = Result<Vec<Review>, PersistenceError>> + Send;
}
