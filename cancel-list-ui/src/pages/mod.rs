mod leaderboard;

pub use leaderboard::{CastVoteFn, GetBoardFn, LeaderboardPage};
