//! BSON document shapes for the `juegos` collection and conversions to and
//! from the domain types.

use catalog::{fields, Game, GamePatch, NewGame, NewReview, Review};
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, doc, Bson, Document};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(super) struct GameRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub titulo: String,
    pub genero: Vec<String>,
    pub plataforma: Vec<String>,
    #[serde(rename = "añoLanzamiento", default)]
    pub ano_lanzamiento: Option<i64>,
    #[serde(default)]
    pub desarrollador: String,
    #[serde(rename = "imagenPortada", default)]
    pub imagen_portada: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub completado: bool,
    #[serde(rename = "fechaCreacion")]
    pub fecha_creacion: bson::DateTime,
    #[serde(rename = "horasJugadas", default)]
    pub horas_jugadas: i64,
    #[serde(rename = "reseñas", default)]
    pub resenas: Vec<ReviewRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(super) struct ReviewRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "juegoId")]
    pub juego_id: ObjectId,
    #[serde(rename = "nombreUsuario")]
    pub nombre_usuario: String,
    #[serde(rename = "textoReseña")]
    pub texto_resena: String,
    #[serde(default)]
    pub calificaciones: Option<f64>,
    #[serde(rename = "horasJugadas", default)]
    pub horas_jugadas: i64,
    pub dificultad: String,
    pub recomendaria: bool,
    #[serde(rename = "fechaCreacion")]
    pub fecha_creacion: bson::DateTime,
}

fn to_bson_time(at: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(at.timestamp_millis())
}

fn from_bson_time(at: bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(at.timestamp_millis()).unwrap_or_default()
}

impl GameRecord {
    pub fn new(game: NewGame, created_at: DateTime<Utc>) -> Self {
        Self {
            id: ObjectId::new(),
            titulo: game.title,
            genero: game.genre,
            plataforma: game.platform,
            ano_lanzamiento: game.release_year,
            desarrollador: game.developer,
            imagen_portada: game.cover_image_url,
            descripcion: game.description,
            completado: game.completed,
            fecha_creacion: to_bson_time(created_at),
            horas_jugadas: game.hours_played,
            resenas: Vec::new(),
        }
    }
}

impl From<GameRecord> for Game {
    fn from(record: GameRecord) -> Self {
        Game {
            id: record.id.to_hex(),
            title: record.titulo,
            genre: record.genero,
            platform: record.plataforma,
            release_year: record.ano_lanzamiento,
            developer: record.desarrollador,
            cover_image_url: record.imagen_portada,
            description: record.descripcion,
            completed: record.completado,
            created_at: from_bson_time(record.fecha_creacion),
            hours_played: record.horas_jugadas,
            reviews: record.resenas.into_iter().map(Review::from).collect(),
        }
    }
}

impl ReviewRecord {
    pub fn new(game_id: ObjectId, review: NewReview, created_at: DateTime<Utc>) -> Self {
        let id = ObjectId::new();
        // Defaults are applied by the domain type.
        let review = review.into_review(id.to_hex(), game_id.to_hex(), created_at);
        Self {
            id,
            juego_id: game_id,
            nombre_usuario: review.user_name,
            texto_resena: review.review_text,
            calificaciones: review.rating,
            horas_jugadas: review.hours_played,
            dificultad: review.difficulty,
            recomendaria: review.would_recommend,
            fecha_creacion: to_bson_time(review.created_at),
        }
    }
}

impl From<ReviewRecord> for Review {
    fn from(record: ReviewRecord) -> Self {
        Review {
            id: record.id.to_hex(),
            game_id: record.juego_id.to_hex(),
            user_name: record.nombre_usuario,
            review_text: record.texto_resena,
            rating: record.calificaciones,
            hours_played: record.horas_jugadas,
            difficulty: record.dificultad,
            would_recommend: record.recomendaria,
            created_at: from_bson_time(record.fecha_creacion),
        }
    }
}

/// The `$set` body for a patch. Only fields present in the patch appear.
pub(super) fn patch_to_set(patch: &GamePatch) -> Document {
    let mut set = Document::new();
    if let Some(title) = &patch.title {
        set.insert(fields::TITLE, title.as_str());
    }
    if let Some(genre) = &patch.genre {
        set.insert(fields::GENRE, genre.clone());
    }
    if let Some(platform) = &patch.platform {
        set.insert(fields::PLATFORM, platform.clone());
    }
    if let Some(year) = patch.release_year {
        set.insert(fields::RELEASE_YEAR, year.map_or(Bson::Null, Bson::Int64));
    }
    if let Some(developer) = &patch.developer {
        set.insert(fields::DEVELOPER, developer.as_str());
    }
    if let Some(url) = &patch.cover_image_url {
        set.insert(fields::COVER_IMAGE_URL, url.as_str());
    }
    if let Some(description) = &patch.description {
        set.insert(fields::DESCRIPTION, description.as_str());
    }
    if let Some(completed) = patch.completed {
        set.insert(fields::COMPLETED, completed);
    }
    if let Some(hours) = patch.hours_played {
        set.insert(fields::HOURS_PLAYED, hours);
    }
    set
}

/// Query for the list operation. Equality on an array field matches any
/// element.
pub(super) fn list_query(filter: &catalog::GameFilter) -> Document {
    let mut query = doc! {};
    if let Some(genre) = &filter.genre {
        query.insert(fields::GENRE, genre.as_str());
    }
    if let Some(platform) = &filter.platform {
        query.insert(fields::PLATFORM, platform.as_str());
    }
    query
}
