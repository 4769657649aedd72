pub mod achievements;
pub mod analytics;
pub mod bonus;
pub mod handicap;
pub mod points;
mod round_lock;
pub mod submission;
