//! Domain model for the game catalog.
//!
//! Games are the only stored aggregate; reviews live embedded inside their
//! game. Everything here is storage-agnostic: the server's repositories map
//! these types onto their backend, and the request handlers use the
//! validation functions to turn raw JSON bodies into normalized inputs.

mod coerce;
pub mod fields;
pub mod game;
pub mod review;
pub mod timestamp;
pub mod validation;

pub use game::{Game, GameFilter, GamePatch, NewGame};
pub use review::{NewReview, Review, DEFAULT_DIFFICULTY, DEFAULT_USER_NAME};
pub use validation::{is_valid_object_id, validate_new_game, validate_new_review, FieldError};
