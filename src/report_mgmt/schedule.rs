use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("invalid reporting date '{input}': {source}")]
    InvalidDate {
        input: String,
        source: chrono::ParseError,
    },
    #[error("midnight of {0} does not exist in timezone {1}")]
    UnrepresentableMidnight(NaiveDate, Tz),
}

/// The instant at which metric queries are evaluated, together with the
/// calendar date the produced record is about.
///
/// The two are always consistent: for daily reports the instant is local
/// midnight of the day *after* the reporting date, since 1-day deltas
/// evaluated at midnight of day N summarize day N-1. For live reports the
/// instant simply lies on the reporting date.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportingWindow {
    pub processing_instant: DateTime<Tz>,
    pub reporting_date: NaiveDate,
}

pub fn for_daily(now: DateTime<Tz>) -> Result<ReportingWindow, ScheduleError> {
    let instant = local_midnight(now.date_naive(), now.timezone())?;
    Ok(ReportingWindow {
        reporting_date: instant.date_naive() - Duration::days(1),
        processing_instant: instant,
    })
}

pub fn for_live(now: DateTime<Tz>) -> ReportingWindow {
    ReportingWindow {
        reporting_date: now.date_naive(),
        processing_instant: now,
    }
}

/// Regenerates a daily report for an arbitrary past day: the supplied date is
/// the reporting date, and the equivalent evaluation instant is midnight of
/// the following day.
pub fn override_for_daily(
    reporting_date: NaiveDate,
    timezone: Tz,
) -> Result<ReportingWindow, ScheduleError> {
    let instant = local_midnight(reporting_date + Duration::days(1), timezone)?;
    Ok(ReportingWindow {
        processing_instant: instant,
        reporting_date,
    })
}

/// Takes a live-style snapshot at a synthetic "now": local midnight of the
/// supplied date, with no day shift.
pub fn override_for_live(
    reporting_date: NaiveDate,
    timezone: Tz,
) -> Result<ReportingWindow, ScheduleError> {
    let instant = local_midnight(reporting_date, timezone)?;
    Ok(ReportingWindow {
        processing_instant: instant,
        reporting_date,
    })
}

pub fn parse_reporting_date(input: &str) -> Result<NaiveDate, ScheduleError> {
    input.parse::<NaiveDate>().map_err(|source| {
        ScheduleError::InvalidDate {
            input: input.to_string(),
            source,
        }
    })
}

fn local_midnight(date: NaiveDate, timezone: Tz) -> Result<DateTime<Tz>, ScheduleError> {
    timezone
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .ok_or(ScheduleError::UnrepresentableMidnight(date, timezone))
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono_tz::Europe::Berlin;

    fn berlin(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Tz> {
        Berlin.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn daily_window_at_midnight_reports_previous_day() {
        let window = for_daily(berlin(2024, 3, 15, 0, 0, 0)).unwrap();
        assert_eq!(window.processing_instant, berlin(2024, 3, 15, 0, 0, 0));
        assert_eq!(window.reporting_date, date(2024, 3, 14));
    }

    #[test]
    fn daily_window_truncates_to_local_midnight() {
        let window = for_daily(berlin(2024, 3, 15, 14, 37, 22)).unwrap();
        assert_eq!(window.processing_instant, berlin(2024, 3, 15, 0, 0, 0));
        assert_eq!(window.reporting_date, date(2024, 3, 14));
    }

    #[test]
    fn daily_reporting_date_is_one_day_before_instant() {
        let window = for_daily(berlin(2024, 1, 1, 8, 0, 0)).unwrap();
        assert_eq!(
            window.reporting_date,
            window.processing_instant.date_naive() - Duration::days(1)
        );
    }

    #[test]
    fn live_window_keeps_full_precision() {
        let now = berlin(2024, 3, 15, 14, 37, 22);
        let window = for_live(now);
        assert_eq!(window.processing_instant, now);
        assert_eq!(window.reporting_date, date(2024, 3, 15));
    }

    #[test]
    fn daily_override_evaluates_at_next_midnight() {
        let window = override_for_daily(date(2024, 3, 10), Berlin).unwrap();
        assert_eq!(window.processing_instant, berlin(2024, 3, 11, 0, 0, 0));
        assert_eq!(window.reporting_date, date(2024, 3, 10));
    }

    #[test]
    fn daily_override_round_trips_through_daily_rule() {
        let overridden = override_for_daily(date(2024, 3, 10), Berlin).unwrap();
        let recovered = for_daily(overridden.processing_instant).unwrap();
        assert_eq!(recovered, overridden);
    }

    #[test]
    fn live_override_is_midnight_of_same_day() {
        let window = override_for_live(date(2024, 3, 10), Berlin).unwrap();
        assert_eq!(window.processing_instant, berlin(2024, 3, 10, 0, 0, 0));
        assert_eq!(window.reporting_date, date(2024, 3, 10));
    }

    #[test]
    fn daily_override_across_dst_change() {
        // Clocks move forward at 02:00 on 2024-03-31; midnight itself exists.
        let window = override_for_daily(date(2024, 3, 30), Berlin).unwrap();
        assert_eq!(window.processing_instant, berlin(2024, 3, 31, 0, 0, 0));
        assert_eq!(window.reporting_date, date(2024, 3, 30));
    }

    #[test]
    fn parses_iso_reporting_date() {
        assert_eq!(parse_reporting_date("2024-03-10").unwrap(), date(2024, 3, 10));
    }

    #[test]
    fn rejects_malformed_reporting_date() {
        assert!(matches!(
            parse_reporting_date("10.03.2024"),
            Err(ScheduleError::InvalidDate { .. })
        ));
    }
}
