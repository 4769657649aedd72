pub mod leaderboard;
pub mod player;
pub mod score;
pub mod season;
