//! CF reference-time units and calendar arithmetic
//!
//! Models a CF units string such as `"days since 1850-01-01"` together with
//! its calendar as an explicit value type, [`TimeUnits`], so converting a
//! numeric time offset into a concrete date becomes a pure function. The
//! Gregorian calendars delegate to chrono; the CF model calendars chrono
//! cannot express (`noleap`, `all_leap`, `360_day`, `julian`) use fixed
//! month-length arithmetic.

use chrono::{Datelike, NaiveDate, TimeDelta};
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

use crate::{Error, Result};

/// `<step> since <origin>`: the shape of a CF reference-time units string
static UNITS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z]+)\s+since\s+(.+?)\s*$").expect("valid pattern"));

/// Month lengths of a common (non-leap) year
const COMMON_YEAR_MONTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Guard against offsets that cannot survive the trip through i64 seconds
const MAX_OFFSET_SECONDS: f64 = 9.0e15;

/// A CF calendar system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Calendar {
    /// `gregorian` / `standard`, treated as proleptic Gregorian
    Gregorian,
    ProlepticGregorian,
    Julian,
    /// `noleap` / `365_day`
    Noleap,
    /// `all_leap` / `366_day`
    AllLeap,
    /// `360_day`: twelve uniform 30-day months
    Day360,
}

impl Calendar {
    /// Resolve a CF calendar attribute value
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "gregorian" | "standard" => Ok(Calendar::Gregorian),
            "proleptic_gregorian" => Ok(Calendar::ProlepticGregorian),
            "julian" => Ok(Calendar::Julian),
            "noleap" | "365_day" => Ok(Calendar::Noleap),
            "all_leap" | "366_day" => Ok(Calendar::AllLeap),
            "360_day" => Ok(Calendar::Day360),
            other => Err(Error::unknown_calendar(other)),
        }
    }

    fn is_leap(self, year: i64) -> bool {
        match self {
            Calendar::Gregorian | Calendar::ProlepticGregorian => {
                (year.rem_euclid(4) == 0 && year.rem_euclid(100) != 0) || year.rem_euclid(400) == 0
            }
            Calendar::Julian => year.rem_euclid(4) == 0,
            Calendar::Noleap | Calendar::Day360 => false,
            Calendar::AllLeap => true,
        }
    }

    fn days_in_month(self, year: i64, month: u32) -> u32 {
        if self == Calendar::Day360 {
            return 30;
        }
        if month == 2 && self.is_leap(year) {
            return 29;
        }
        COMMON_YEAR_MONTHS[(month - 1) as usize]
    }

    /// Zero-based ordinal of a date within its year
    fn day_of_year(self, year: i64, month: u32, day: u32) -> i64 {
        let mut ordinal = i64::from(day) - 1;
        for m in 1..month {
            ordinal += i64::from(self.days_in_month(year, m));
        }
        ordinal
    }

    /// Recover (month, day) from a zero-based ordinal within a year
    fn month_day(self, year: i64, mut ordinal: u32) -> (u32, u32) {
        let mut month = 1;
        loop {
            let length = self.days_in_month(year, month);
            if ordinal < length || month == 12 {
                return (month, ordinal + 1);
            }
            ordinal -= length;
            month += 1;
        }
    }

    /// Shift a date by a whole number of days, forwards or backwards
    fn add_days(self, year: i64, month: u32, day: u32, shift: i64) -> Result<(i64, u32, u32)> {
        match self {
            Calendar::Gregorian | Calendar::ProlepticGregorian => {
                let y = i32::try_from(year).map_err(|_| {
                    Error::date_conversion(format!("year {} out of range", year))
                })?;
                let date = NaiveDate::from_ymd_opt(y, month, day).ok_or_else(|| {
                    Error::date_conversion(format!("invalid date {}-{}-{}", year, month, day))
                })?;
                let delta = TimeDelta::try_days(shift).ok_or_else(|| {
                    Error::date_conversion(format!("day shift {} out of range", shift))
                })?;
                let shifted = date.checked_add_signed(delta).ok_or_else(|| {
                    Error::date_conversion(format!("date overflow shifting by {} days", shift))
                })?;
                Ok((i64::from(shifted.year()), shifted.month(), shifted.day()))
            }
            Calendar::Day360 => {
                let index =
                    year * 360 + (i64::from(month) - 1) * 30 + (i64::from(day) - 1) + shift;
                let y = index.div_euclid(360);
                let remainder = index.rem_euclid(360) as u32;
                Ok((y, remainder / 30 + 1, remainder % 30 + 1))
            }
            Calendar::Noleap | Calendar::AllLeap => {
                let year_length = if self == Calendar::AllLeap { 366 } else { 365 };
                let index = year * year_length + self.day_of_year(year, month, day) + shift;
                let y = index.div_euclid(year_length);
                let ordinal = index.rem_euclid(year_length) as u32;
                let (m, d) = self.month_day(y, ordinal);
                Ok((y, m, d))
            }
            Calendar::Julian => {
                let index = julian_days_before_year(year) + self.day_of_year(year, month, day)
                    + shift;
                let mut y = (index as f64 / 365.25).floor() as i64;
                while julian_days_before_year(y + 1) <= index {
                    y += 1;
                }
                while julian_days_before_year(y) > index {
                    y -= 1;
                }
                let ordinal = (index - julian_days_before_year(y)) as u32;
                let (m, d) = self.month_day(y, ordinal);
                Ok((y, m, d))
            }
        }
    }
}

/// Days between Julian-calendar year 0 and the given year's January 1st
fn julian_days_before_year(year: i64) -> i64 {
    let leaps = year.div_euclid(4) + i64::from(year.rem_euclid(4) != 0);
    365 * year + leaps
}

/// Step unit of a reference-time axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeStep {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl TimeStep {
    /// Resolve a CF unit token; `None` marks a non-temporal unit
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "d" | "day" | "days" => Some(TimeStep::Days),
            "h" | "hr" | "hrs" | "hour" | "hours" => Some(TimeStep::Hours),
            "min" | "mins" | "minute" | "minutes" => Some(TimeStep::Minutes),
            "s" | "sec" | "secs" | "second" | "seconds" => Some(TimeStep::Seconds),
            _ => None,
        }
    }

    fn seconds(self) -> f64 {
        match self {
            TimeStep::Days => 86_400.0,
            TimeStep::Hours => 3_600.0,
            TimeStep::Minutes => 60.0,
            TimeStep::Seconds => 1.0,
        }
    }
}

/// A concrete calendar date-time, independent of calendar system
///
/// Rendered canonically as `YYYY-MM-DD HH:MM:SS`; this string form is what
/// branch-time properties carry into the CIM2 property set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CfDateTime {
    pub year: i64,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl CfDateTime {
    pub fn new(year: i64, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Date at midnight
    pub fn from_date(year: i64, month: u32, day: u32) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }
}

impl fmt::Display for CfDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

impl Serialize for CfDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Reference-time units: origin instant, step unit, and calendar system
#[derive(Debug, Clone, PartialEq)]
pub struct TimeUnits {
    pub origin: CfDateTime,
    pub step: TimeStep,
    pub calendar: Calendar,
}

impl TimeUnits {
    /// Parse a CF units string such as `"days since 1850-01-01"` under the
    /// named calendar
    ///
    /// Fails for units that are not reference-time (`"K"`, `"m s-1"`), for
    /// unknown step units, and for unparseable origins.
    pub fn parse(units: &str, calendar: &str) -> Result<Self> {
        let captures = UNITS_PATTERN
            .captures(units)
            .ok_or_else(|| Error::time_units_parse(units, "not a reference-time unit"))?;
        let step = TimeStep::from_name(&captures[1])
            .ok_or_else(|| Error::time_units_parse(units, "unsupported step unit"))?;
        let origin = parse_origin(units, &captures[2])?;
        Ok(Self {
            origin,
            step,
            calendar: Calendar::from_name(calendar)?,
        })
    }

    /// Convert a numeric offset under these units into a concrete date-time
    ///
    /// Fractional offsets are honored to whole-second precision; negative
    /// offsets step backwards from the origin.
    pub fn offset_to_datetime(&self, offset: f64) -> Result<CfDateTime> {
        if !offset.is_finite() {
            return Err(Error::date_conversion(format!(
                "non-finite time offset {}",
                offset
            )));
        }
        let seconds = offset * self.step.seconds();
        if seconds.abs() > MAX_OFFSET_SECONDS {
            return Err(Error::date_conversion(format!(
                "time offset {} {:?} out of range",
                offset, self.step
            )));
        }

        let origin = &self.origin;
        let time_of_day =
            f64::from(origin.hour * 3600 + origin.minute * 60 + origin.second) + seconds;
        let mut day_shift = (time_of_day / 86_400.0).floor();
        let mut remainder = (time_of_day - day_shift * 86_400.0).round() as i64;
        if remainder >= 86_400 {
            day_shift += 1.0;
            remainder -= 86_400;
        }

        let (year, month, day) =
            self.calendar
                .add_days(origin.year, origin.month, origin.day, day_shift as i64)?;
        Ok(CfDateTime::new(
            year,
            month,
            day,
            (remainder / 3600) as u32,
            (remainder % 3600 / 60) as u32,
            (remainder % 60) as u32,
        ))
    }
}

/// Parse the origin instant of a units string
///
/// Accepts `YYYY-MM-DD`, an optional `HH:MM:SS` (or truncated) time part
/// separated by whitespace or `T`, and ignores trailing timezone tokens.
fn parse_origin(units: &str, text: &str) -> Result<CfDateTime> {
    let normalized = text.replace('T', " ");
    let mut tokens = normalized.split_whitespace();
    let date_part = tokens
        .next()
        .ok_or_else(|| Error::time_units_parse(units, "missing origin date"))?;
    let time_part = tokens.next();

    let date_fields: Vec<&str> = date_part.split('-').collect();
    if date_fields.len() != 3 {
        return Err(Error::time_units_parse(units, "origin date is not Y-M-D"));
    }
    let year: i64 = parse_field(units, date_fields[0], "year")?;
    let month: u32 = parse_field(units, date_fields[1], "month")?;
    let day: u32 = parse_field(units, date_fields[2], "day")?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(Error::time_units_parse(units, "origin date out of range"));
    }

    let (mut hour, mut minute, mut second) = (0u32, 0u32, 0u32);
    if let Some(time) = time_part {
        let time = time.trim_end_matches('Z');
        let time_fields: Vec<&str> = time.split(':').collect();
        if time_fields.len() > 3 {
            return Err(Error::time_units_parse(units, "origin time is not H:M:S"));
        }
        hour = parse_field(units, time_fields[0], "hour")?;
        if time_fields.len() > 1 {
            minute = parse_field(units, time_fields[1], "minute")?;
        }
        if time_fields.len() > 2 {
            // Seconds may carry a fractional part; origins are treated as
            // whole seconds.
            let raw: f64 = time_fields[2]
                .parse()
                .map_err(|_| Error::time_units_parse(units, "invalid origin second"))?;
            second = raw.round() as u32;
        }
        if hour > 23 || minute > 59 || second > 60 {
            return Err(Error::time_units_parse(units, "origin time out of range"));
        }
    }

    Ok(CfDateTime::new(year, month, day, hour, minute, second))
}

fn parse_field<T: std::str::FromStr>(units: &str, field: &str, name: &str) -> Result<T> {
    field
        .parse()
        .map_err(|_| Error::time_units_parse(units, format!("invalid origin {}", name)))
}
