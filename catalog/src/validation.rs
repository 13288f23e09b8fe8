//! Request validation shared by every handler.
//!
//! Create validation short-circuits on the first failing field, in a fixed
//! order, so clients always see the most fundamental problem first.

use serde_json::Value;

use crate::coerce;
use crate::fields;
use crate::game::{normalize_platform, NewGame};
use crate::review::NewReview;

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

/// A single invalid or missing input field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub(crate) fn release_year() -> Self {
        Self::new(fields::RELEASE_YEAR, "El año de lanzamiento debe ser un número")
    }

    pub(crate) fn hours_played() -> Self {
        Self::new(fields::HOURS_PLAYED, "Las horas jugadas deben ser un número entero")
    }

    pub(crate) fn not_text(field: &'static str) -> Self {
        Self::new(field, format!("El campo {field} debe ser texto"))
    }

    pub(crate) fn not_boolean(field: &'static str) -> Self {
        Self::new(field, format!("El campo {field} debe ser verdadero o falso"))
    }
}

/// Whether `id` has the store's identifier syntax: 24 hex digits, either case.
pub fn is_valid_object_id(id: &str) -> bool {
    id.len() == 24 && id.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Validate and normalize a create-game body.
///
/// Order: title, genre, release year; then the optional fields.
pub fn validate_new_game(body: &Value) -> Result<NewGame, FieldError> {
    let title = match coerce::text(body.get(fields::TITLE)) {
        Ok(Some(title)) if !title.is_empty() => title,
        _ => return Err(FieldError::new(fields::TITLE, "El título es requerido")),
    };

    let genre = coerce::string_list(body.get(fields::GENRE))
        .filter(|genre| !genre.is_empty())
        .ok_or_else(|| FieldError::new(fields::GENRE, "El género es requerido"))?;

    let release_year =
        coerce::integer(body.get(fields::RELEASE_YEAR)).map_err(|_| FieldError::release_year())?;

    let platform = normalize_platform(coerce::string_list(body.get(fields::PLATFORM)));
    let developer = optional_text(body, fields::DEVELOPER)?;
    let cover_image_url = optional_text(body, fields::COVER_IMAGE_URL)?;
    let description = optional_text(body, fields::DESCRIPTION)?;
    let completed = coerce::boolean(body.get(fields::COMPLETED))
        .map_err(|_| FieldError::not_boolean(fields::COMPLETED))?
        .unwrap_or(false);
    let hours_played = coerce::integer(body.get(fields::HOURS_PLAYED))
        .map_err(|_| FieldError::hours_played())?
        .unwrap_or(0);

    Ok(NewGame {
        title,
        genre,
        platform,
        release_year,
        developer,
        cover_image_url,
        description,
        completed,
        hours_played,
    })
}

/// Validate a review body. User name and text are required here even though
/// the model itself falls back to a default user name.
pub fn validate_new_review(body: &Value) -> Result<NewReview, FieldError> {
    let user_name = required_text(body, fields::USER_NAME, "El nombre de usuario es requerido")?;
    let review_text =
        required_text(body, fields::REVIEW_TEXT, "El texto de la reseña es requerido")?;

    let rating = match coerce::number(body.get(fields::RATING)) {
        Ok(Some(rating)) if (MIN_RATING..=MAX_RATING).contains(&rating) => Some(rating),
        Ok(None) => None,
        _ => {
            return Err(FieldError::new(
                fields::RATING,
                "La calificación debe ser un número entre 0 y 5",
            ))
        }
    };

    let hours_played =
        coerce::integer(body.get(fields::HOURS_PLAYED)).map_err(|_| FieldError::hours_played())?;
    let difficulty = coerce::text(body.get(fields::DIFFICULTY))
        .map_err(|_| FieldError::not_text(fields::DIFFICULTY))?;
    let would_recommend = coerce::boolean(body.get(fields::WOULD_RECOMMEND))
        .map_err(|_| FieldError::not_boolean(fields::WOULD_RECOMMEND))?;

    Ok(NewReview {
        user_name: Some(user_name),
        review_text,
        rating,
        hours_played,
        difficulty,
        would_recommend,
    })
}

fn required_text(body: &Value, field: &'static str, message: &str) -> Result<String, FieldError> {
    match coerce::text(body.get(field)) {
        Ok(Some(text)) if !text.is_empty() => Ok(text),
        _ => Err(FieldError::new(field, message)),
    }
}

fn optional_text(body: &Value, field: &'static str) -> Result<String, FieldError> {
    coerce::text(body.get(field))
        .map(Option::unwrap_or_default)
        .map_err(|_| FieldError::not_text(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_id_syntax() {
        assert!(is_valid_object_id("65a1f0c2e4b0a1b2c3d4e5f6"));
        assert!(is_valid_object_id("65A1F0C2E4B0A1B2C3D4E5F6"));
        assert!(!is_valid_object_id("abc"));
        assert!(!is_valid_object_id("65a1f0c2e4b0a1b2c3d4e5fz"));
        assert!(!is_valid_object_id("65a1f0c2e4b0a1b2c3d4e5f6a"));
        assert!(!is_valid_object_id(""));
    }

    #[test]
    fn test_missing_title_reported_first() {
        let body = json!({"genero": 5, "añoLanzamiento": "not a year"});
        let err = validate_new_game(&body).unwrap_err();
        assert_eq!(err.field, "titulo");
    }

    #[test]
    fn test_blank_title_is_missing() {
        let err = validate_new_game(&json!({"titulo": "   ", "genero": "RPG"})).unwrap_err();
        assert_eq!(err.field, "titulo");
    }

    #[test]
    fn test_non_object_body_reports_title() {
        let err = validate_new_game(&json!("Chrono Trigger")).unwrap_err();
        assert_eq!(err.field, "titulo");
    }

    #[test]
    fn test_genre_checked_before_year() {
        let body = json!({"titulo": "Doom", "genero": [], "añoLanzamiento": "soon"});
        let err = validate_new_game(&body).unwrap_err();
        assert_eq!(err.field, "genero");
    }

    #[test]
    fn test_bad_year_rejected() {
        let body = json!({"titulo": "Doom", "genero": "FPS", "añoLanzamiento": "soon"});
        let err = validate_new_game(&body).unwrap_err();
        assert_eq!(err.field, "añoLanzamiento");
    }

    #[test]
    fn test_single_genre_becomes_list() {
        let game = validate_new_game(&json!({"titulo": "Doom", "genero": "Action"})).unwrap();
        assert_eq!(game.genre, vec!["Action".to_string()]);
        assert_eq!(game.platform, vec![String::new()]);
    }

    #[test]
    fn test_full_create_body_normalized() {
        let body = json!({
            "titulo": " Hollow Knight ",
            "genero": ["Metroidvania", "Action"],
            "plataforma": "PC",
            "añoLanzamiento": "2017",
            "desarrollador": "Team Cherry",
            "completado": true,
            "horasJugadas": "45",
        });
        let game = validate_new_game(&body).unwrap();
        assert_eq!(game.title, "Hollow Knight");
        assert_eq!(game.genre.len(), 2);
        assert_eq!(game.platform, vec!["PC".to_string()]);
        assert_eq!(game.release_year, Some(2017));
        assert_eq!(game.developer, "Team Cherry");
        assert!(game.completed);
        assert_eq!(game.hours_played, 45);
        assert_eq!(game.description, "");
    }

    #[test]
    fn test_review_requires_user_and_text() {
        let err = validate_new_review(&json!({"textoReseña": "Great"})).unwrap_err();
        assert_eq!(err.field, "nombreUsuario");
        let err = validate_new_review(&json!({"nombreUsuario": "Ana"})).unwrap_err();
        assert_eq!(err.field, "textoReseña");
    }

    #[test]
    fn test_review_rating_range() {
        let base = |rating: Value| {
            json!({"nombreUsuario": "Ana", "textoReseña": "Great", "calificaciones": rating})
        };
        assert_eq!(validate_new_review(&base(json!(5))).unwrap().rating, Some(5.0));
        assert_eq!(validate_new_review(&base(json!(0))).unwrap().rating, Some(0.0));
        assert_eq!(validate_new_review(&base(json!("3.5"))).unwrap().rating, Some(3.5));
        assert_eq!(validate_new_review(&base(Value::Null)).unwrap().rating, None);

        for bad in [json!(7), json!(-1), json!("five"), json!(5.01)] {
            let err = validate_new_review(&base(bad)).unwrap_err();
            assert_eq!(err.field, "calificaciones");
        }
    }

    #[test]
    fn test_review_optional_fields() {
        let review = validate_new_review(&json!({
            "nombreUsuario": "Ana",
            "textoReseña": "Great",
            "horasJugadas": 12,
            "dificultad": "Difícil",
            "recomendaria": "false",
        }))
        .unwrap();
        assert_eq!(review.hours_played, Some(12));
        assert_eq!(review.difficulty.as_deref(), Some("Difícil"));
        assert_eq!(review.would_recommend, Some(false));
    }
}
