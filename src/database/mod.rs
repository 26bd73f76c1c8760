pub mod archetypes;
pub mod connection;
pub mod locals;
pub mod matches;
pub mod models;
pub mod players;
pub mod setup;

pub use connection::{create_pool, database_path, get_connection, DbConn, DbPool};
pub use models::*;
