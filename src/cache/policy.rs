//! TTL Policy Module
//!
//! Pure functions mapping content age to cache lifetime. Young content
//! changes often (corrections, edits) and must revalidate fast; content
//! older than a week is effectively immutable and is cached aggressively.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::cache::entry::current_timestamp_ms;

// == TTL Buckets ==
/// TTL for content younger than one hour.
pub const TTL_FRESH: Duration = Duration::from_secs(2 * 60);
/// TTL for content between one and six hours old.
pub const TTL_RECENT: Duration = Duration::from_secs(5 * 60);
/// TTL for content between six and twenty-four hours old.
pub const TTL_TODAY: Duration = Duration::from_secs(10 * 60);
/// TTL for content between one and seven days old.
pub const TTL_THIS_WEEK: Duration = Duration::from_secs(30 * 60);
/// TTL for content at least seven days old.
pub const TTL_SETTLED: Duration = Duration::from_secs(24 * 60 * 60);

/// Entries written with a TTL at or above this are flagged permanent and
/// never swept. Deliberately large rather than infinite, so there is no
/// special-cased "no expiry" code path.
pub const PERMANENT_THRESHOLD: Duration = TTL_SETTLED;

/// Content at least this old no longer needs revalidation.
const PERMANENT_AGE_SECS: i64 = 7 * 24 * 60 * 60;

// == Article TTL ==
/// Returns the cache lifetime for an article based on its publication date.
///
/// Buckets are half-open on the upper side: content aged exactly one hour
/// falls into the 1-6h bucket. Future-dated content (clock skew) is treated
/// as age zero and lands in the shortest bucket.
pub fn article_ttl(content_date: DateTime<Utc>) -> Duration {
    article_ttl_at(content_date, Utc::now())
}

fn article_ttl_at(content_date: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    let age_secs = (now - content_date).num_seconds().max(0);

    if age_secs < 3600 {
        TTL_FRESH
    } else if age_secs < 6 * 3600 {
        TTL_RECENT
    } else if age_secs < 24 * 3600 {
        TTL_TODAY
    } else if age_secs < PERMANENT_AGE_SECS {
        TTL_THIS_WEEK
    } else {
        TTL_SETTLED
    }
}

// == List TTL ==
/// Returns the cache lifetime for a paginated listing.
///
/// The first page is the most likely to contain newly published items and
/// gets the shortest TTL; subsequent pages get a slightly longer one.
pub fn list_ttl(first_page: bool) -> Duration {
    if first_page {
        TTL_FRESH
    } else {
        TTL_RECENT
    }
}

/// Returns the cache lifetime for a listing driven by a concrete article
/// set: a list is only as fresh as its newest member. An empty listing
/// behaves like a first page.
pub fn newest_item_ttl(content_dates: &[DateTime<Utc>]) -> Duration {
    match content_dates.iter().max() {
        Some(newest) => article_ttl(*newest),
        None => TTL_FRESH,
    }
}

// == Revalidation ==
/// Decides whether a cached entry needs to be refreshed from source.
///
/// Returns false while the entry is unexpired, and false once the content
/// itself has crossed the seven-day boundary. The latter lets an entry
/// written while its content was young self-promote to permanent status
/// without an explicit rewrite.
pub fn should_revalidate(
    stored_at_ms: u64,
    content_date: DateTime<Utc>,
    ttl: Duration,
) -> bool {
    let elapsed_ms = current_timestamp_ms().saturating_sub(stored_at_ms);
    if elapsed_ms < ttl.as_millis() as u64 {
        return false;
    }
    let content_age = Utc::now() - content_date;
    if content_age.num_seconds() >= PERMANENT_AGE_SECS {
        return false;
    }
    true
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    fn date(now: DateTime<Utc>, age: ChronoDuration) -> DateTime<Utc> {
        now - age
    }

    #[test]
    fn test_article_ttl_buckets() {
        let now = Utc::now();

        assert_eq!(
            article_ttl_at(date(now, ChronoDuration::minutes(30)), now),
            TTL_FRESH
        );
        assert_eq!(
            article_ttl_at(date(now, ChronoDuration::hours(3)), now),
            TTL_RECENT
        );
        assert_eq!(
            article_ttl_at(date(now, ChronoDuration::hours(12)), now),
            TTL_TODAY
        );
        assert_eq!(
            article_ttl_at(date(now, ChronoDuration::days(3)), now),
            TTL_THIS_WEEK
        );
        assert_eq!(
            article_ttl_at(date(now, ChronoDuration::days(10)), now),
            TTL_SETTLED
        );
    }

    #[test]
    fn test_article_ttl_bucket_boundaries() {
        let now = Utc::now();

        // Exactly at a boundary falls into the longer-age bucket.
        assert_eq!(
            article_ttl_at(date(now, ChronoDuration::hours(1)), now),
            TTL_RECENT
        );
        assert_eq!(
            article_ttl_at(date(now, ChronoDuration::hours(6)), now),
            TTL_TODAY
        );
        assert_eq!(
            article_ttl_at(date(now, ChronoDuration::hours(24)), now),
            TTL_THIS_WEEK
        );
        assert_eq!(
            article_ttl_at(date(now, ChronoDuration::days(7)), now),
            TTL_SETTLED
        );
    }

    #[test]
    fn test_article_ttl_future_dated_content() {
        let now = Utc::now();

        // Clock skew: content dated in the future is treated as age zero.
        let future = now + ChronoDuration::hours(2);
        assert_eq!(article_ttl_at(future, now), TTL_FRESH);
    }

    #[test]
    fn test_list_ttl() {
        assert_eq!(list_ttl(true), TTL_FRESH);
        assert_eq!(list_ttl(false), TTL_RECENT);
    }

    #[test]
    fn test_newest_item_ttl() {
        let now = Utc::now();
        let dates = vec![
            now - ChronoDuration::days(10),
            now - ChronoDuration::minutes(10),
            now - ChronoDuration::days(2),
        ];

        // The ten-minute-old item drives the TTL.
        assert_eq!(newest_item_ttl(&dates), TTL_FRESH);
    }

    #[test]
    fn test_newest_item_ttl_empty() {
        assert_eq!(newest_item_ttl(&[]), TTL_FRESH);
    }

    #[test]
    fn test_should_revalidate_unexpired() {
        let stored_at = current_timestamp_ms();
        let content_date = Utc::now() - ChronoDuration::minutes(30);

        assert!(!should_revalidate(stored_at, content_date, TTL_FRESH));
    }

    #[test]
    fn test_should_revalidate_expired_young_content() {
        // Written 3 minutes ago with a 2-minute TTL, content is 30 minutes
        // old: expired and still young enough to change.
        let stored_at = current_timestamp_ms() - 3 * 60 * 1000;
        let content_date = Utc::now() - ChronoDuration::minutes(30);

        assert!(should_revalidate(stored_at, content_date, TTL_FRESH));
    }

    #[test]
    fn test_should_revalidate_self_promotes_to_permanent() {
        // The entry's short TTL has long expired, but the content has since
        // crossed the seven-day boundary: no further revalidation needed.
        let stored_at = current_timestamp_ms() - 8 * 24 * 60 * 60 * 1000;
        let content_date = Utc::now() - ChronoDuration::days(8);

        assert!(!should_revalidate(stored_at, content_date, TTL_FRESH));
    }

    #[test]
    fn test_permanent_threshold_matches_settled_bucket() {
        assert!(TTL_SETTLED >= PERMANENT_THRESHOLD);
        assert!(TTL_THIS_WEEK < PERMANENT_THRESHOLD);
    }
}
