pub mod players;
pub mod scores;
pub mod seasons;
