use super::{InsertOutcome, PeriodSource, ResolvePeriod, VoteStore};
use crate::domain::{Vote, VoteResult, VoterKey};
use cancel_list_errors::AppError;
use chrono::{DateTime, Utc};

pub struct RecordVote<P, V> {
    periods: ResolvePeriod<P>,
    votes: V,
}

impl<P: PeriodSource, V: VoteStore> RecordVote<P, V> {
    pub fn new(periods: ResolvePeriod<P>, votes: V) -> Self {
        Self { periods, votes }
    }

    pub async fn execute(&self, item_id: Option<&str>, voter: &VoterKey) -> Result<VoteResult, AppError> {
        self.execute_at(item_id, voter, Utc::now()).await
    }

    /// Validates in order: item id present, period exists, period not closed,
    /// end time usable, `now` before the end. Then inserts the vote.
    pub async fn execute_at(
        &self,
        item_id: Option<&str>,
        voter: &VoterKey,
        now: DateTime<Utc>,
    ) -> Result<VoteResult, AppError> {
        let item_id = item_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(AppError::MissingItem)?;

        let period = self.periods.execute().await.ok_or(AppError::NoActivePeriod)?;
        period.ensure_open(now)?;

        let vote = Vote::new(item_id, period.id.as_str(), voter.as_str());
        let outcome = self.votes.insert_vote(&vote).await.map_err(|e| {
            if e.kind() == cancel_list_errors::ErrorKind::Storage {
                tracing::error!("Failed to record vote in period {}: {}", period.id, e);
            }
            e
        })?;

        let already_voted = outcome == InsertOutcome::Duplicate;
        tracing::info!(
            "Vote for item {} in period {} (already voted: {})",
            item_id,
            period.id,
            already_voted
        );

        Ok(VoteResult {
            already_voted,
            period: period.view(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::memory::MemoryStore;
    use crate::domain::{Item, Period, PeriodEnd};
    use chrono::Duration;

    fn recorder(store: &MemoryStore) -> RecordVote<MemoryStore, MemoryStore> {
        RecordVote::new(ResolvePeriod::new(store.clone()), store.clone())
    }

    fn voter(key: &str) -> VoterKey {
        VoterKey::parse(key).unwrap()
    }

    fn store_with(period: Period) -> MemoryStore {
        let store = MemoryStore::with_period(period);
        store.add_item(Item::new("i1", "First", 0));
        store.add_item(Item::new("i2", "Second", 0));
        store
    }

    #[tokio::test]
    async fn test_vote_then_repeat_is_absorbed() {
        let now = Utc::now();
        let store = store_with(Period::new("p1", now - Duration::days(1), now + Duration::seconds(3600)));
        let recorder = recorder(&store);

        let first = recorder.execute_at(Some("i1"), &voter("v1"), now).await.unwrap();
        assert!(!first.already_voted);
        assert_eq!(first.period.id, "p1");

        let second = recorder.execute_at(Some("i1"), &voter("v1"), now).await.unwrap();
        assert!(second.already_voted);
        assert_eq!(store.vote_count(), 1);
    }

    #[tokio::test]
    async fn test_second_vote_for_other_item_is_still_one_row() {
        let now = Utc::now();
        let store = store_with(Period::new("p1", now, now + Duration::hours(1)));
        let recorder = recorder(&store);

        recorder.execute_at(Some("i1"), &voter("v1"), now).await.unwrap();
        let again = recorder.execute_at(Some("i2"), &voter("v1"), now).await.unwrap();
        assert!(again.already_voted);
        assert_eq!(store.vote_count(), 1);

        let other = recorder.execute_at(Some("i2"), &voter("v2"), now).await.unwrap();
        assert!(!other.already_voted);
        assert_eq!(store.vote_count(), 2);
    }

    #[tokio::test]
    async fn test_missing_item_is_checked_first() {
        let store = MemoryStore::default();
        let recorder = recorder(&store);
        for item in [None, Some(""), Some("   ")] {
            let err = recorder.execute(item, &voter("v1")).await.unwrap_err();
            assert_eq!(err, AppError::MissingItem);
        }
    }

    #[tokio::test]
    async fn test_no_period_is_forbidden() {
        let store = MemoryStore::default();
        let err = recorder(&store)
            .execute(Some("i1"), &voter("v1"))
            .await
            .unwrap_err();
        assert_eq!(err, AppError::NoActivePeriod);
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn test_closed_period_rejects_any_item() {
        let now = Utc::now();
        let store = store_with(Period::new("p1", now, now + Duration::hours(1)).closed());
        let recorder = recorder(&store);
        for item in ["i1", "not-an-item"] {
            let err = recorder.execute_at(Some(item), &voter("v1"), now).await.unwrap_err();
            assert_eq!(err, AppError::VotingClosed);
        }
        assert_eq!(store.vote_count(), 0);
    }

    #[tokio::test]
    async fn test_expired_period_not_yet_closed_is_ended() {
        let now = Utc::now();
        let store = store_with(Period::new("p1", now - Duration::days(7), now - Duration::seconds(10)));
        let err = recorder(&store)
            .execute_at(Some("i1"), &voter("v1"), now)
            .await
            .unwrap_err();
        assert_eq!(err, AppError::PeriodEnded);
        assert_eq!(store.vote_count(), 0);
    }

    #[tokio::test]
    async fn test_period_without_end_is_server_error() {
        let now = Utc::now();
        let mut period = Period::new("p1", now, now + Duration::hours(1));
        period.ends_at = PeriodEnd::Missing;
        let store = store_with(period);
        let err = recorder(&store)
            .execute_at(Some("i1"), &voter("v1"), now)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MisconfiguredPeriod(_)));
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_unknown_item_is_client_error() {
        let now = Utc::now();
        let store = store_with(Period::new("p1", now, now + Duration::hours(1)));
        let err = recorder(&store)
            .execute_at(Some("nope"), &voter("v1"), now)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_write_failure_surfaces() {
        let now = Utc::now();
        let store = store_with(Period::new("p1", now, now + Duration::hours(1)));
        store.fail_writes();
        let err = recorder(&store)
            .execute_at(Some("i1"), &voter("v1"), now)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }
}
