pub mod connection;
pub mod executions;
pub mod models;
pub mod players;
pub mod rankings;
pub mod setup;
pub mod tournaments;

pub use connection::{DbConn, DbPool, create_pool, get_connection};
pub use models::*;
