//! MongoDB backend: the driver connector and the game repository.

mod connector;
mod game_repo;
mod records;

pub use connector::MongoConnector;
pub use game_repo::MongoGameRepository;

use super::ConnectionManager;

/// Connection manager specialized to the MongoDB driver.
pub type MongoConnectionManager = ConnectionManager<MongoConnector>;
