use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_USER_NAME: &str = "Anonymous";
pub const DEFAULT_DIFFICULTY: &str = "Normal";

/// A user review, stored embedded in its game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "juegoId")]
    pub game_id: String,
    #[serde(rename = "nombreUsuario")]
    pub user_name: String,
    #[serde(rename = "textoReseña")]
    pub review_text: String,
    #[serde(rename = "calificaciones", default)]
    pub rating: Option<f64>,
    #[serde(rename = "horasJugadas", default)]
    pub hours_played: i64,
    #[serde(rename = "dificultad")]
    pub difficulty: String,
    #[serde(rename = "recomendaria")]
    pub would_recommend: bool,
    #[serde(rename = "fechaCreacion", with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Review input before defaults are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewReview {
    pub user_name: Option<String>,
    pub review_text: String,
    pub rating: Option<f64>,
    pub hours_played: Option<i64>,
    pub difficulty: Option<String>,
    pub would_recommend: Option<bool>,
}

impl NewReview {
    pub fn into_review(self, id: String, game_id: String, created_at: DateTime<Utc>) -> Review {
        Review {
            id,
            game_id,
            user_name: self
                .user_name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_USER_NAME.to_string()),
            review_text: self.review_text,
            rating: self.rating,
            hours_played: self.hours_played.unwrap_or(0),
            difficulty: self
                .difficulty
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| DEFAULT_DIFFICULTY.to_string()),
            would_recommend: self.would_recommend.unwrap_or(true),
            created_at,
        }
    }
}
