use std::time::{Duration, SystemTime};

const HOUR: u64 = 3600;

/// Age tier of a daemon log file.
///
/// Variants are declared from the longest threshold to the shortest, so the
/// derived ordering sorts the stalest bucket first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeBucket {
    OlderThan7Days,
    OlderThan24Hours,
    OlderThan12Hours,
    Fresh,
}

impl AgeBucket {
    pub const ALL: [AgeBucket; 4] = [
        AgeBucket::OlderThan7Days,
        AgeBucket::OlderThan24Hours,
        AgeBucket::OlderThan12Hours,
        AgeBucket::Fresh,
    ];

    pub fn threshold(self) -> Duration {
        let hours = match self {
            AgeBucket::OlderThan7Days => 7 * 24,
            AgeBucket::OlderThan24Hours => 24,
            AgeBucket::OlderThan12Hours => 12,
            AgeBucket::Fresh => 0,
        };
        Duration::from_secs(hours * HOUR)
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeBucket::OlderThan7Days => "older than 7 days",
            AgeBucket::OlderThan24Hours => "older than 24 hours",
            AgeBucket::OlderThan12Hours => "older than 12 hours",
            AgeBucket::Fresh => "fresh",
        }
    }
}

/// Pick the first (longest) threshold the age has reached.
///
/// An age exactly equal to a threshold counts as past it, so a log that is
/// exactly seven days old is already in [`AgeBucket::OlderThan7Days`].
pub fn classify(age: Duration) -> AgeBucket {
    AgeBucket::ALL
        .into_iter()
        .find(|bucket| age >= bucket.threshold())
        .unwrap_or(AgeBucket::Fresh)
}

/// Age of a file modified at `modified`, seen from `now`.
/// A modification time in the future counts as zero age.
pub fn age_of(modified: SystemTime, now: SystemTime) -> Duration {
    now.duration_since(modified).unwrap_or(Duration::ZERO)
}
