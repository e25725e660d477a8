use super::{LeaderboardSource, PeriodSource, ResolvePeriod};
use crate::domain::{rank_items, Board, Item};
use cancel_list_errors::AppError;

pub struct GetLeaderboard<P, L> {
    periods: ResolvePeriod<P>,
    items: L,
}

impl<P: PeriodSource, L: LeaderboardSource> GetLeaderboard<P, L> {
    pub fn new(periods: ResolvePeriod<P>, items: L) -> Self {
        Self { periods, items }
    }

    /// Items for one period, most votes first. Failures are not swallowed.
    pub async fn for_period(&self, period_id: &str) -> Result<Vec<Item>, AppError> {
        let items = self.items.ranked_items(period_id).await.map_err(|e| {
            tracing::error!("Leaderboard query failed for period {}: {}", period_id, e);
            e
        })?;
        Ok(rank_items(items))
    }

    /// Current period plus its leaderboard. No period yields an empty board.
    pub async fn board(&self) -> Result<Board, AppError> {
        let Some(period) = self.periods.execute().await else {
            return Ok(Board::empty());
        };

        let items = self.for_period(&period.id).await?;
        Ok(Board {
            items,
            period: Some(period.view()),
        })
    }

    /// First `limit` entries of the current board, for previews.
    pub async fn top(&self, limit: usize) -> Result<Vec<Item>, AppError> {
        let mut board = self.board().await?;
        board.items.truncate(limit);
        Ok(board.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::memory::MemoryStore;
    use crate::application::RecordVote;
    use crate::domain::{Period, VoterKey};
    use chrono::{Duration, Utc};

    fn open_store() -> MemoryStore {
        let now = Utc::now();
        let store = MemoryStore::with_period(Period::new("p1", now - Duration::days(1), now + Duration::hours(1)));
        for (id, age) in [("a", 3), ("b", 2), ("c", 1)] {
            store.add_item(
                Item::new(id, id.to_uppercase(), 0)
                    .with_created_at(Some(now - Duration::days(age))),
            );
        }
        store
    }

    fn reader(store: &MemoryStore) -> GetLeaderboard<MemoryStore, MemoryStore> {
        GetLeaderboard::new(ResolvePeriod::new(store.clone()), store.clone())
    }

    async fn vote(store: &MemoryStore, item: &str, voter: &str) {
        RecordVote::new(ResolvePeriod::new(store.clone()), store.clone())
            .execute(Some(item), &VoterKey::parse(voter).unwrap())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_board_counts_votes_and_sorts() {
        let store = open_store();
        vote(&store, "c", "v1").await;
        vote(&store, "c", "v2").await;
        vote(&store, "b", "v3").await;

        let board = reader(&store).board().await.unwrap();
        let ranked: Vec<_> = board.items.iter().map(|i| (i.id.as_str(), i.votes)).collect();
        assert_eq!(ranked, [("c", 2), ("b", 1), ("a", 0)]);
        assert_eq!(board.period.unwrap().id, "p1");
    }

    #[tokio::test]
    async fn test_single_vote_shows_up() {
        let store = open_store();
        vote(&store, "b", "v1").await;
        vote(&store, "b", "v1").await;

        let items = reader(&store).for_period("p1").await.unwrap();
        assert_eq!(items[0].id, "b");
        assert_eq!(items[0].votes, 1);
    }

    #[tokio::test]
    async fn test_ties_are_stable_across_calls() {
        let store = open_store();
        let reader = reader(&store);
        let first = reader.for_period("p1").await.unwrap();
        let second = reader.for_period("p1").await.unwrap();
        assert_eq!(first, second);
        let ids: Vec<_> = first.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_no_period_gives_empty_board() {
        let store = MemoryStore::default();
        store.add_item(Item::new("a", "A", 0));
        let board = reader(&store).board().await.unwrap();
        assert!(board.items.is_empty());
        assert!(board.period.is_none());
    }

    #[tokio::test]
    async fn test_aggregate_failure_surfaces() {
        let store = open_store();
        store.fail_leaderboard_reads();
        let err = reader(&store).board().await.unwrap_err();
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_top_truncates() {
        let store = open_store();
        let top = reader(&store).top(2).await.unwrap();
        assert_eq!(top.len(), 2);
    }
}
