pub mod challenges;
pub mod players;
pub mod rankings;
pub mod server;
pub mod tournaments;
