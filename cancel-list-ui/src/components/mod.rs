mod error_display;
mod leaderboard_row;
mod loading_spinner;
mod voting_banner;

pub use error_display::ErrorDisplay;
pub use leaderboard_row::LeaderboardRow;
pub use loading_spinner::LoadingSpinner;
pub use voting_banner::VotingBanner;
