mod board;
mod item;
mod period;
mod standings;
mod vote;
mod voter;
mod week;

pub use board::{format_remaining, Board, BoardState, Voting};
pub use item::{rank_items, Item};
pub use period::{Period, PeriodEnd, PeriodView};
pub use standings::{RankStyle, RankedItem, Standings, RUNNER_UP_COUNT, TOP_COUNT};
pub use vote::{Vote, VoteResult};
pub use voter::{VoterIdentity, VoterKey, VOTER_COOKIE, VOTER_COOKIE_MAX_AGE_SECS};
pub use week::utc_week_range;
