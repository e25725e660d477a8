use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};

/// Monday 00:00 UTC of the week containing `now`, and the Monday after.
pub fn utc_week_range(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let days_from_monday = i64::from(now.weekday().num_days_from_monday());
    let monday = now.date_naive() - Duration::days(days_from_monday);
    let start = monday.and_time(NaiveTime::MIN).and_utc();
    (start, start + Duration::days(7))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_midweek() {
        let (start, end) = utc_week_range(at("2026-10-21T15:30:00Z"));
        assert_eq!(start, at("2026-10-19T00:00:00Z"));
        assert_eq!(end, at("2026-10-26T00:00:00Z"));
    }

    #[test]
    fn test_sunday_belongs_to_previous_monday() {
        let (start, _) = utc_week_range(at("2026-10-25T23:59:59Z"));
        assert_eq!(start, at("2026-10-19T00:00:00Z"));
    }

    #[test]
    fn test_monday_midnight_starts_new_week() {
        let (start, end) = utc_week_range(at("2026-10-26T00:00:00Z"));
        assert_eq!(start, at("2026-10-26T00:00:00Z"));
        assert_eq!(end, at("2026-11-02T00:00:00Z"));
    }
}
