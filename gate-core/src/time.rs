///! Ephemeris time handling
///!
///! Epochs are kept as seconds past J2000 on the TDB scale (treated as TT).
///! UTC conversion goes through a leap-second table and TT - TAI = 32.184 s.

use crate::error::{GateError, Result};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt;
use std::ops::{Add, Sub};

pub const SECONDS_PER_DAY: f64 = 86400.0;
pub const JULIAN_YEAR: f64 = 365.25 * SECONDS_PER_DAY;
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;
pub const TT_MINUS_TAI: f64 = 32.184;

/// Offset between the J1950 and J2000 epochs in Julian years
const J1950_TO_J2000_YEARS: f64 = 50.0;

/// TAI - UTC, effective from the first day of the given month
const LEAP_SECONDS: &[(i32, u32, f64)] = &[
    (1972, 1, 10.0),
    (1972, 7, 11.0),
    (1973, 1, 12.0),
    (1974, 1, 13.0),
    (1975, 1, 14.0),
    (1976, 1, 15.0),
    (1977, 1, 16.0),
    (1978, 1, 17.0),
    (1979, 1, 18.0),
    (1980, 1, 19.0),
    (1981, 7, 20.0),
    (1982, 7, 21.0),
    (1983, 7, 22.0),
    (1985, 7, 23.0),
    (1988, 1, 24.0),
    (1990, 1, 25.0),
    (1991, 1, 26.0),
    (1992, 7, 27.0),
    (1993, 7, 28.0),
    (1994, 7, 29.0),
    (1996, 1, 30.0),
    (1997, 7, 31.0),
    (1999, 1, 32.0),
    (2006, 1, 33.0),
    (2009, 1, 34.0),
    (2012, 7, 35.0),
    (2015, 7, 36.0),
    (2017, 1, 37.0),
];

fn j2000_utc_noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// TAI - UTC at the given instant
pub fn delta_at(utc: &DateTime<Utc>) -> f64 {
    let (year, month) = (utc.year(), utc.month());
    LEAP_SECONDS
        .iter()
        .rev()
        .find(|(y, m, _)| (*y, *m) <= (year, month))
        .map(|(_, _, delta)| *delta)
        .unwrap_or(LEAP_SECONDS[0].2)
}

/// Seconds past J2000 (TDB)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Epoch(f64);

impl Epoch {
    pub const J2000: Epoch = Epoch(0.0);

    pub fn from_seconds(seconds: f64) -> Self {
        Epoch(seconds)
    }

    pub fn seconds(&self) -> f64 {
        self.0
    }

    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    pub fn from_utc(utc: DateTime<Utc>) -> Self {
        let since_noon = (utc - j2000_utc_noon())
            .num_microseconds()
            .map(|us| us as f64 / 1e6)
            .unwrap_or_else(|| (utc - j2000_utc_noon()).num_seconds() as f64);
        Epoch(since_noon + delta_at(&utc) + TT_MINUS_TAI)
    }

    pub fn from_naive_utc(naive: NaiveDateTime) -> Self {
        Self::from_utc(naive.and_utc())
    }

    pub fn to_utc(&self) -> DateTime<Utc> {
        // First guess with the current offset, then refine with the offset at that date
        let guess = j2000_utc_noon() + micros(self.0 - 37.0 - TT_MINUS_TAI);
        let utc_seconds = self.0 - delta_at(&guess) - TT_MINUS_TAI;
        j2000_utc_noon() + micros(utc_seconds)
    }

    /// Parse `NOW`, RFC 3339, or a `YYYY-MM-DD[ T]HH:MM:SS[.fff]` UTC timestamp
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("NOW") {
            return Ok(Self::now());
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Ok(Self::from_utc(dt.with_timezone(&Utc)));
        }

        let trimmed = text
            .strip_suffix("UTC")
            .or_else(|| text.strip_suffix('Z'))
            .unwrap_or(text)
            .trim();
        for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(Self::from_naive_utc(naive));
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            if let Some(naive) = date.and_hms_opt(0, 0, 0) {
                return Ok(Self::from_naive_utc(naive));
            }
        }

        Err(GateError::InvalidTime(text.to_string()))
    }

    /// `YYYY-MM-DD HR:MN:SC.#### UTC`
    pub fn format_utc(&self) -> String {
        let utc = self.to_utc();
        let fraction = utc.timestamp_subsec_nanos() / 100_000;
        format!("{}.{:04} UTC", utc.format("%Y-%m-%d %H:%M:%S"), fraction)
    }

    pub fn days_since_j2000(&self) -> f64 {
        self.0 / SECONDS_PER_DAY
    }

    pub fn centuries_since_j2000(&self) -> f64 {
        self.days_since_j2000() / DAYS_PER_JULIAN_CENTURY
    }

    pub fn julian_years_since_j2000(&self) -> f64 {
        self.0 / JULIAN_YEAR
    }

    /// Julian years since 1950, the epoch basis of star catalog columns
    pub fn julian_years_since_1950(&self) -> f64 {
        self.julian_years_since_j2000() + J1950_TO_J2000_YEARS
    }
}

fn micros(seconds: f64) -> Duration {
    Duration::microseconds((seconds * 1e6).round() as i64)
}

impl Add<f64> for Epoch {
    type Output = Epoch;

    fn add(self, seconds: f64) -> Epoch {
        Epoch(self.0 + seconds)
    }
}

impl Add<std::time::Duration> for Epoch {
    type Output = Epoch;

    fn add(self, elapsed: std::time::Duration) -> Epoch {
        Epoch(self.0 + elapsed.as_secs_f64())
    }
}

impl Sub for Epoch {
    type Output = f64;

    fn sub(self, other: Epoch) -> f64 {
        self.0 - other.0
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_j2000_tt_is_zero() {
        // J2000 TT noon is 11:58:55.816 UTC
        let utc = Utc.with_ymd_and_hms(2000, 1, 1, 11, 58, 55).unwrap() + Duration::milliseconds(816);
        assert!(Epoch::from_utc(utc).seconds().abs() < 1e-6);
    }

    #[test]
    fn test_delta_at_table() {
        let before = Utc.with_ymd_and_hms(2016, 12, 31, 23, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(delta_at(&before), 36.0);
        assert_eq!(delta_at(&after), 37.0);
    }

    #[test]
    fn test_utc_round_trip() {
        let utc = Utc.with_ymd_and_hms(2024, 3, 20, 3, 6, 0).unwrap();
        let epoch = Epoch::from_utc(utc);
        assert_eq!(epoch.to_utc(), utc);
        assert_eq!(epoch.format_utc(), "2024-03-20 03:06:00.0000 UTC");
    }

    #[test]
    fn test_parse_formats() {
        let a = Epoch::parse("2024-03-20T03:06:00Z").unwrap();
        let b = Epoch::parse("2024-03-20 03:06:00").unwrap();
        let c = Epoch::parse("2024-03-20T03:06:00.000 UTC").unwrap();
        assert!((a - b).abs() < 1e-6);
        assert!((a - c).abs() < 1e-6);
        assert!(Epoch::parse("now").is_ok());
        assert!(matches!(Epoch::parse("yesterday"), Err(GateError::InvalidTime(_))));
    }

    #[test]
    fn test_julian_years() {
        let epoch = Epoch::from_seconds(5.0 * JULIAN_YEAR);
        assert!((epoch.julian_years_since_j2000() - 5.0).abs() < 1e-12);
        assert!((epoch.julian_years_since_1950() - 55.0).abs() < 1e-12);
    }
}
