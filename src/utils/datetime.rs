use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Current calendar date in the given timezone.
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d (%A)").to_string()
}

/// Time until the next occurrence of the wall-clock time `fire_at` in `tz`.
pub fn duration_until_next_fire(fire_at: NaiveTime, tz: Tz) -> std::time::Duration {
    duration_until_fire_from(Utc::now(), fire_at, tz)
}

/// Same computation with an explicit "now", so tests can pin it.
///
/// If `fire_at` has already passed today (or is exactly now), the next fire
/// is tomorrow. A fire time that does not exist locally (DST spring-forward)
/// is shifted one hour later.
pub fn duration_until_fire_from(
    now: DateTime<Utc>,
    fire_at: NaiveTime,
    tz: Tz,
) -> std::time::Duration {
    let local_now = now.with_timezone(&tz);
    let today = local_now.date_naive();

    let target_date = if local_now.time() >= fire_at {
        today + Duration::days(1)
    } else {
        today
    };

    let naive_target = target_date.and_time(fire_at);
    let target = match tz.from_local_datetime(&naive_target).earliest() {
        Some(t) => t,
        None => match tz
            .from_local_datetime(&(naive_target + Duration::hours(1)))
            .earliest()
        {
            Some(t) => t,
            None => local_now + Duration::hours(1),
        },
    };

    let delta = target.signed_duration_since(local_now);
    if delta.num_seconds() <= 0 {
        std::time::Duration::from_secs(60)
    } else {
        delta
            .to_std()
            .unwrap_or(std::time::Duration::from_secs(60))
    }
}
