//! Period resolution
//!
//! Turns a [`Period`] plus an optional navigation anchor into a concrete date
//! range and the cache bucket label for that range. Both the fetch window and
//! the cache key are derived from the same [`PeriodWindow`], so a cached list
//! always belongs to exactly one window.

use calembed_domain::{Period, PeriodAnchor};
use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use tracing::warn;

/// Concrete date range for one feed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodWindow {
    pub period: Period,
    /// First day of the window (site-local)
    pub start: NaiveDate,
    /// Exclusive end day; `None` for the open-ended future view
    pub end: Option<NaiveDate>,
    /// Cache bucket label (`YYYY-MM-DD`, `YYYY-Www`, `YYYY-MM` or `YYYY`)
    pub bucket: String,
}

impl PeriodWindow {
    /// Resolve `period` against `today` (site-local date).
    ///
    /// Explicit anchors that do not name a real date fall back to the current
    /// period.
    pub fn resolve(period: Period, anchor: &PeriodAnchor, today: NaiveDate) -> Self {
        match period {
            Period::Future => Self {
                period,
                start: today,
                end: None,
                bucket: today.format("%Y-%m-%d").to_string(),
            },
            Period::Week => Self::resolve_week(anchor, today),
            Period::Month => Self::resolve_month(anchor, today),
            Period::Year => Self::resolve_year(anchor, today),
        }
    }

    fn resolve_week(anchor: &PeriodAnchor, today: NaiveDate) -> Self {
        if let (Some(year), Some(week)) = (anchor.year, anchor.week) {
            if let Some(monday) = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon) {
                return Self {
                    period: Period::Week,
                    start: monday,
                    end: monday.checked_add_days(Days::new(7)),
                    bucket: format!("{year:04}-W{week:02}"),
                };
            }
            warn!(year, week, "invalid ISO week anchor, using current week");
        }

        let offset = Days::new(u64::from(today.weekday().num_days_from_monday()));
        let monday = today.checked_sub_days(offset).unwrap_or(today);
        Self {
            period: Period::Week,
            start: monday,
            end: monday.checked_add_days(Days::new(7)),
            bucket: monday.format("%Y-%m-%d").to_string(),
        }
    }

    fn resolve_month(anchor: &PeriodAnchor, today: NaiveDate) -> Self {
        let explicit = match (anchor.year, anchor.month) {
            (Some(year), Some(month)) => {
                let first = NaiveDate::from_ymd_opt(year, month, 1);
                if first.is_none() {
                    warn!(year, month, "invalid month anchor, using current month");
                }
                first
            }
            _ => None,
        };
        let first = explicit.unwrap_or_else(|| today.with_day(1).unwrap_or(today));

        Self {
            period: Period::Month,
            start: first,
            end: first.checked_add_months(Months::new(1)),
            bucket: first.format("%Y-%m").to_string(),
        }
    }

    fn resolve_year(anchor: &PeriodAnchor, today: NaiveDate) -> Self {
        let explicit = anchor.year.and_then(|year| {
            let first = NaiveDate::from_ymd_opt(year, 1, 1);
            if first.is_none() {
                warn!(year, "invalid year anchor, using current year");
            }
            first
        });
        let first = explicit
            .or_else(|| NaiveDate::from_ymd_opt(today.year(), 1, 1))
            .unwrap_or(today);

        Self {
            period: Period::Year,
            start: first,
            end: first.checked_add_months(Months::new(12)),
            bucket: format!("{:04}", first.year()),
        }
    }

    /// UTC bounds for the upstream query.
    ///
    /// The future view starts at `now` rather than local midnight so events
    /// that already ended today are not listed.
    pub fn time_bounds(
        &self,
        timezone: Tz,
        now: DateTime<Utc>,
    ) -> (DateTime<Utc>, Option<DateTime<Utc>>) {
        let time_min = match self.period {
            Period::Future => now,
            _ => local_midnight_utc(timezone, self.start),
        };
        let time_max = self.end.map(|end| local_midnight_utc(timezone, end));
        (time_min, time_max)
    }
}

/// Site-local date for `now`
pub fn local_today(timezone: Tz, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&timezone).date_naive()
}

/// First instant of `date` in `timezone`, expressed in UTC.
///
/// Zones that skip midnight on DST changes start the day at the first valid
/// local time.
pub fn local_midnight_utc(timezone: Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    (0..=2)
        .filter_map(|hours| {
            timezone
                .from_local_datetime(&(midnight + chrono::Duration::hours(hours)))
                .earliest()
        })
        .next()
        .map_or_else(|| midnight.and_utc(), |local| local.with_timezone(&Utc))
}
