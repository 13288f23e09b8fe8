use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::coerce;
use crate::fields;
use crate::review::Review;
use crate::validation::FieldError;

/// A stored game with its embedded reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "genero")]
    pub genre: Vec<String>,
    #[serde(rename = "plataforma")]
    pub platform: Vec<String>,
    #[serde(rename = "añoLanzamiento", default)]
    pub release_year: Option<i64>,
    #[serde(rename = "desarrollador", default)]
    pub developer: String,
    #[serde(rename = "imagenPortada", default)]
    pub cover_image_url: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "completado", default)]
    pub completed: bool,
    #[serde(rename = "fechaCreacion", with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "horasJugadas", default)]
    pub hours_played: i64,
    #[serde(rename = "reseñas", default)]
    pub reviews: Vec<Review>,
}

/// Normalized input for creating a game. Built by
/// [`validate_new_game`](crate::validate_new_game).
#[derive(Debug, Clone, PartialEq)]
pub struct NewGame {
    pub title: String,
    pub genre: Vec<String>,
    pub platform: Vec<String>,
    pub release_year: Option<i64>,
    pub developer: String,
    pub cover_image_url: String,
    pub description: String,
    pub completed: bool,
    pub hours_played: i64,
}

impl NewGame {
    /// Minimal valid input, mostly useful for tests and seeding.
    pub fn titled(title: impl Into<String>, genre: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            genre: vec![genre.into()],
            platform: vec![String::new()],
            release_year: None,
            developer: String::new(),
            cover_image_url: String::new(),
            description: String::new(),
            completed: false,
            hours_played: 0,
        }
    }

    /// Stamp identity and creation time onto the input.
    pub fn into_game(self, id: String, created_at: DateTime<Utc>) -> Game {
        Game {
            id,
            title: self.title,
            genre: self.genre,
            platform: self.platform,
            release_year: self.release_year,
            developer: self.developer,
            cover_image_url: self.cover_image_url,
            description: self.description,
            completed: self.completed,
            created_at,
            hours_played: self.hours_played,
            reviews: Vec::new(),
        }
    }
}

/// A partial update. Identity, creation time and the review list cannot be
/// expressed here, so they are never written by an update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamePatch {
    pub title: Option<String>,
    pub genre: Option<Vec<String>>,
    pub platform: Option<Vec<String>>,
    /// `Some(None)` clears the year.
    pub release_year: Option<Option<i64>>,
    pub developer: Option<String>,
    pub cover_image_url: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub hours_played: Option<i64>,
}

impl GamePatch {
    /// Parse a JSON update body, normalizing the same way creation does.
    ///
    /// Unknown keys and the protected keys in [`fields::PROTECTED`] are
    /// ignored. Every field problem is collected rather than stopping at the
    /// first one.
    pub fn from_json(body: &Value) -> Result<Self, Vec<FieldError>> {
        let Some(map) = body.as_object() else {
            return Err(vec![FieldError::new("body", "Se esperaba un objeto JSON")]);
        };

        let mut patch = GamePatch::default();
        let mut errors = Vec::new();

        if let Some(value) = map.get(fields::TITLE) {
            match coerce::text(Some(value)) {
                Ok(Some(title)) if !title.is_empty() => patch.title = Some(title),
                _ => errors.push(FieldError::new(fields::TITLE, "El título no puede estar vacío")),
            }
        }

        if let Some(value) = map.get(fields::GENRE) {
            match coerce::string_list(Some(value)) {
                Some(genre) if !genre.is_empty() => patch.genre = Some(genre),
                _ => errors.push(FieldError::new(fields::GENRE, "El género no puede estar vacío")),
            }
        }

        if let Some(value) = map.get(fields::PLATFORM) {
            patch.platform = Some(normalize_platform(coerce::string_list(Some(value))));
        }

        if let Some(value) = map.get(fields::RELEASE_YEAR) {
            match coerce::integer(Some(value)) {
                Ok(year) => patch.release_year = Some(year),
                Err(_) => errors.push(FieldError::release_year()),
            }
        }

        for (key, slot) in [
            (fields::DEVELOPER, &mut patch.developer),
            (fields::COVER_IMAGE_URL, &mut patch.cover_image_url),
            (fields::DESCRIPTION, &mut patch.description),
        ] {
            if let Some(value) = map.get(key) {
                match coerce::text(Some(value)) {
                    Ok(text) => *slot = Some(text.unwrap_or_default()),
                    Err(_) => errors.push(FieldError::not_text(key)),
                }
            }
        }

        if let Some(value) = map.get(fields::COMPLETED) {
            match coerce::boolean(Some(value)) {
                Ok(completed) => patch.completed = Some(completed.unwrap_or(false)),
                Err(_) => errors.push(FieldError::not_boolean(fields::COMPLETED)),
            }
        }

        if let Some(value) = map.get(fields::HOURS_PLAYED) {
            match coerce::integer(Some(value)) {
                Ok(hours) => patch.hours_played = Some(hours.unwrap_or(0)),
                Err(_) => errors.push(FieldError::hours_played()),
            }
        }

        if errors.is_empty() {
            Ok(patch)
        } else {
            Err(errors)
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == GamePatch::default()
    }

    /// Merge the patch into a game in place.
    pub fn apply(&self, game: &mut Game) {
        if let Some(title) = &self.title {
            game.title = title.clone();
        }
        if let Some(genre) = &self.genre {
            game.genre = genre.clone();
        }
        if let Some(platform) = &self.platform {
            game.platform = platform.clone();
        }
        if let Some(year) = self.release_year {
            game.release_year = year;
        }
        if let Some(developer) = &self.developer {
            game.developer = developer.clone();
        }
        if let Some(url) = &self.cover_image_url {
            game.cover_image_url = url.clone();
        }
        if let Some(description) = &self.description {
            game.description = description.clone();
        }
        if let Some(completed) = self.completed {
            game.completed = completed;
        }
        if let Some(hours) = self.hours_played {
            game.hours_played = hours;
        }
    }
}

/// Platforms are optional but must stay a non-empty list.
pub(crate) fn normalize_platform(platform: Option<Vec<String>>) -> Vec<String> {
    match platform {
        Some(list) if !list.is_empty() => list,
        _ => vec![String::new()],
    }
}

/// Membership constraints for listing games. Blank values are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameFilter {
    pub genre: Option<String>,
    pub platform: Option<String>,
}

impl GameFilter {
    pub fn new(genre: Option<String>, platform: Option<String>) -> Self {
        let clean = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        Self {
            genre: clean(genre),
            platform: clean(platform),
        }
    }

    pub fn matches(&self, game: &Game) -> bool {
        let contains = |wanted: &Option<String>, values: &[String]| match wanted {
            Some(wanted) => values.iter().any(|v| v == wanted),
            None => true,
        };
        contains(&self.genre, &game.genre) && contains(&self.platform, &game.platform)
    }
}
