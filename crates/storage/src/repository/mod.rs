pub mod achievements;
pub mod games;
pub mod players;
pub mod scores;
pub mod seasons;

pub use achievements::AchievementRepository;
pub use games::GameRepository;
pub use players::PlayerRepository;
pub use scores::ScoreRepository;
pub use seasons::SeasonRepository;
