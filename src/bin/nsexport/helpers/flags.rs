// ABOUTME: Date-range and duration flag parsing shared by the export, list, and graph commands
// ABOUTME: All parse failures here are fatal and surface before any network activity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use clap::Args;

use nsexport::core::constants::limits;
use nsexport::core::errors::{ExportError, ExportResult};
use nsexport::core::transform::Timezone;

/// Date-range flags shared by every command that queries Nightscout.
#[derive(Args, Debug, Clone)]
pub struct DateRangeArgs {
    /// Timestamp layout for --date-from and --date-to (chrono strftime format)
    #[arg(long = "ts-layout", default_value = "%Y-%m-%d")]
    pub ts_layout: String,

    /// Start of sampling period
    #[arg(long = "date-from")]
    pub date_from: Option<String>,

    /// End of sampling period
    #[arg(long = "date-to")]
    pub date_to: Option<String>,

    /// Start of sampling period as an offset from now (e.g. 24h or 72h30m).
    /// Overrides --date-from and --date-to
    #[arg(long = "date-offset")]
    pub date_offset: Option<String>,

    /// Nightscout max count entries per API request
    #[arg(long = "max-count", default_value_t = limits::MAX_ENTRIES)]
    pub max_count: usize,
}

impl DateRangeArgs {
    /// Resolve the flags into a concrete UTC date range.
    ///
    /// With `--date-offset` the range is `[now − offset, now]`. Otherwise
    /// `--date-from` defaults to local midnight today and `--date-to`
    /// defaults to now.
    pub fn resolve(&self) -> ExportResult<(DateTime<Utc>, DateTime<Utc>)> {
        if let Some(offset) = &self.date_offset {
            let duration = parse_duration(offset)?;
            let now = Utc::now();
            return Ok((now - duration, now));
        }

        let now = Local::now();

        let date_from = match &self.date_from {
            Some(raw) => parse_local(raw, &self.ts_layout)?,
            None => local_to_utc(now.date_naive().and_time(chrono::NaiveTime::MIN))?,
        };

        let date_to = match &self.date_to {
            Some(raw) => parse_local(raw, &self.ts_layout)?,
            None => now.with_timezone(&Utc),
        };

        Ok((date_from, date_to))
    }
}

/// Parse a duration of the form `10m10s`, `24h`, or `72h30m`. Units are
/// hours, minutes, and seconds; components may appear in any order and
/// repeat.
pub fn parse_duration(raw: &str) -> ExportResult<TimeDelta> {
    let mut total = TimeDelta::zero();
    let mut digits = String::new();
    let mut any_component = false;

    for ch in raw.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }

        let value: i64 = digits
            .parse()
            .map_err(|_| bad_duration(raw))?;
        digits.clear();

        total = total
            + match ch {
                'h' => TimeDelta::hours(value),
                'm' => TimeDelta::minutes(value),
                's' => TimeDelta::seconds(value),
                _ => return Err(bad_duration(raw)),
            };
        any_component = true;
    }

    if !digits.is_empty() || !any_component {
        return Err(bad_duration(raw));
    }

    Ok(total)
}

/// Parse the `--timezone` override, if given.
pub fn parse_timezone(raw: Option<&str>) -> ExportResult<Timezone> {
    match raw {
        Some(name) => name.parse(),
        None => Ok(Timezone::Local),
    }
}

fn bad_duration(raw: &str) -> ExportError {
    ExportError::parse(
        "duration",
        format!("bad duration {raw}: expected forms like 10m10s, 24h, 90s"),
    )
}

fn parse_local(raw: &str, layout: &str) -> ExportResult<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(raw, layout).or_else(|_| {
        NaiveDate::parse_from_str(raw, layout).map(|date| date.and_time(chrono::NaiveTime::MIN))
    });

    match naive {
        Ok(naive) => local_to_utc(naive),
        Err(err) => Err(ExportError::parse(
            "date",
            format!("bad date {raw} for layout {layout}: {err}"),
        )),
    }
}

fn local_to_utc(naive: NaiveDateTime) -> ExportResult<DateTime<Utc>> {
    use chrono::TimeZone;

    Local
        .from_local_datetime(&naive)
        .single()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| ExportError::parse("date", format!("ambiguous local time {naive}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compound_duration() {
        let d = parse_duration("10m10s").unwrap();
        assert_eq!(d, TimeDelta::minutes(10) + TimeDelta::seconds(10));
    }

    #[test]
    fn parses_hours_only() {
        assert_eq!(parse_duration("24h").unwrap(), TimeDelta::hours(24));
    }

    #[test]
    fn parses_long_offset() {
        let d = parse_duration("72h30m").unwrap();
        assert_eq!(d, TimeDelta::hours(72) + TimeDelta::minutes(30));
    }

    #[test]
    fn rejects_missing_unit() {
        assert!(parse_duration("90").is_err());
    }

    #[test]
    fn rejects_unknown_unit() {
        assert!(parse_duration("10x").is_err());
    }

    #[test]
    fn rejects_empty() {
        assert!(parse_duration("").is_err());
    }

    #[test]
    fn timezone_defaults_to_local() {
        assert_eq!(parse_timezone(None).unwrap(), Timezone::Local);
    }

    #[test]
    fn timezone_parses_iana_name() {
        let tz = parse_timezone(Some("Europe/Moscow")).unwrap();
        assert!(matches!(tz, Timezone::Named(_)));
    }

    #[test]
    fn timezone_rejects_garbage() {
        assert!(parse_timezone(Some("Not/AZone")).is_err());
    }
}
