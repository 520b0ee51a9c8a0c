use chrono::{DateTime, Utc};

/// Source of "now" for services.
///
/// Services never call `Utc::now()` directly; they ask their clock so tests
/// can pin timestamps on persisted quiz results and resumes.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Whole seconds between `since` and now, floored at zero.
    #[must_use]
    pub fn elapsed_secs(&self, since: DateTime<Utc>) -> u64 {
        let secs = self.now().signed_duration_since(since).num_seconds();
        u64::try_from(secs).unwrap_or(0)
    }
}

/// Deterministic timestamp for tests (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_elapsed_seconds() {
        let start = fixed_now();
        let clock = Clock::fixed(start + chrono::Duration::seconds(90));
        assert_eq!(clock.elapsed_secs(start), 90);
    }

    #[test]
    fn elapsed_is_zero_when_start_is_in_the_future() {
        let clock = Clock::fixed(fixed_now());
        assert_eq!(clock.elapsed_secs(fixed_now() + chrono::Duration::days(1)), 0);
    }
}
