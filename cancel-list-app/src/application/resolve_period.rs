use super::PeriodSource;
use crate::domain::Period;

#[derive(Clone)]
pub struct ResolvePeriod<P> {
    source: P,
}

impl<P: PeriodSource> ResolvePeriod<P> {
    pub fn new(source: P) -> Self {
        Self { source }
    }

    /// The active period, or `None` when there is none or it cannot be read.
    pub async fn execute(&self) -> Option<Period> {
        match self.source.current_period().await {
            Ok(period) => period,
            Err(e) => {
                tracing::warn!("Failed to resolve current period, treating as none: {}", e);
                None
            }
        }
    }
}
