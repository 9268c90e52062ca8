//! Coarse relative-time labels for notification rows.

use chrono::{DateTime, Utc};
use std::fmt::{Display, Formatter};

const SECONDS_PER_YEAR: i64 = 31_536_000;
const SECONDS_PER_MONTH: i64 = 2_592_000;
const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_MINUTE: i64 = 60;

/// Elapsed-time bucket with its floored count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elapsed {
    JustNow,
    Minutes(i64),
    Hours(i64),
    Days(i64),
    Months(i64),
    Years(i64),
}

/// Buckets the time between `then` and `now`.
///
/// Thresholds are checked largest first and a bucket applies only when the
/// elapsed seconds strictly exceed it, so exactly 60 s is still "just now".
/// Timestamps in the future are "just now".
pub fn elapsed_since(then: DateTime<Utc>, now: DateTime<Utc>) -> Elapsed {
    let seconds = (now - then).num_milliseconds().div_euclid(1000);

    if seconds > SECONDS_PER_YEAR {
        Elapsed::Years(seconds / SECONDS_PER_YEAR)
    } else if seconds > SECONDS_PER_MONTH {
        Elapsed::Months(seconds / SECONDS_PER_MONTH)
    } else if seconds > SECONDS_PER_DAY {
        Elapsed::Days(seconds / SECONDS_PER_DAY)
    } else if seconds > SECONDS_PER_HOUR {
        Elapsed::Hours(seconds / SECONDS_PER_HOUR)
    } else if seconds > SECONDS_PER_MINUTE {
        Elapsed::Minutes(seconds / SECONDS_PER_MINUTE)
    } else {
        Elapsed::JustNow
    }
}

impl Display for Elapsed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::JustNow => write!(f, "Baru saja"),
            Self::Minutes(count) => write!(f, "{count} menit lalu"),
            Self::Hours(count) => write!(f, "{count} jam lalu"),
            Self::Days(count) => write!(f, "{count} hari lalu"),
            Self::Months(count) => write!(f, "{count} bulan lalu"),
            Self::Years(count) => write!(f, "{count} tahun lalu"),
        }
    }
}

/// Label shown under a notification message.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    elapsed_since(then, now).to_string()
}
