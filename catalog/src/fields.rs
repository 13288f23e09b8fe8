//! JSON field names used on the wire and in stored documents.

pub const ID: &str = "_id";
pub const TITLE: &str = "titulo";
pub const GENRE: &str = "genero";
pub const PLATFORM: &str = "plataforma";
pub const RELEASE_YEAR: &str = "añoLanzamiento";
pub const DEVELOPER: &str = "desarrollador";
pub const COVER_IMAGE_URL: &str = "imagenPortada";
pub const DESCRIPTION: &str = "descripcion";
pub const COMPLETED: &str = "completado";
pub const CREATED_AT: &str = "fechaCreacion";
pub const HOURS_PLAYED: &str = "horasJugadas";
pub const REVIEWS: &str = "reseñas";

pub const GAME_ID: &str = "juegoId";
pub const USER_NAME: &str = "nombreUsuario";
pub const REVIEW_TEXT: &str = "textoReseña";
pub const RATING: &str = "calificaciones";
pub const DIFFICULTY: &str = "dificultad";
pub const WOULD_RECOMMEND: &str = "recomendaria";

/// Fields a partial update may never set. The English aliases are stripped
/// too since older clients sent them.
pub const PROTECTED: [&str; 4] = [ID, "id", CREATED_AT, "createdAt"];
