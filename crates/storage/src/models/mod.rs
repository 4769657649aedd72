mod achievement;
mod course;
mod game;
mod player;
mod player_round;
mod score;
mod season;

pub use achievement::{Achievement, AchievementCategory, UserAchievement};
pub use course::Course;
pub use game::{Game, GameRound, GameStatus};
pub use player::Player;
pub use player_round::PlayerRound;
pub use score::Score;
pub use season::Season;
