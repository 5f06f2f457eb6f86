use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime as ChronoDateTime, NaiveDate, NaiveTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Precision levels for FHIR `date` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DatePrecision {
    /// `YYYY`
    Year,
    /// `YYYY-MM`
    YearMonth,
    /// `YYYY-MM-DD`
    Full,
}

/// Precision levels for FHIR `dateTime` values.
///
/// FHIR only allows partial precision on the date part; once a time is given
/// it must be complete to the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DateTimePrecision {
    Year,
    YearMonth,
    Date,
    /// `YYYY-MM-DDThh:mm:ss` with a timezone
    Second,
    /// `YYYY-MM-DDThh:mm:ss.fff` with a timezone
    Fraction,
}

/// A FHIR `date` that keeps its partial precision and original lexical form.
///
/// # Examples
/// ```rust
/// use atrius_fhir_model::{DatePrecision, PrecisionDate};
///
/// let year = PrecisionDate::parse("2023").unwrap();
/// assert_eq!(year.precision(), DatePrecision::Year);
///
/// let full = PrecisionDate::from_ymd(2023, 3, 15).unwrap();
/// assert_eq!(full.original_string(), "2023-03-15");
///
/// assert!(PrecisionDate::parse("2023-02-30").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrecisionDate {
    year: i32,
    month: Option<u32>,
    day: Option<u32>,
    precision: DatePrecision,
    original_string: Arc<str>,
}

impl PrecisionDate {
    pub fn from_year(year: i32) -> Option<Self> {
        Self::parse(&format!("{year:04}"))
    }

    pub fn from_year_month(year: i32, month: u32) -> Option<Self> {
        Self::parse(&format!("{year:04}-{month:02}"))
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        Self::parse(&format!("{year:04}-{month:02}-{day:02}"))
    }

    /// Parses `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split('-').collect();
        let year = parse_fixed(parts.first()?, 4)? as i32;
        if year == 0 {
            return None;
        }
        let (month, day, precision) = match parts.len() {
            1 => (None, None, DatePrecision::Year),
            2 => (Some(parse_fixed(parts[1], 2)?), None, DatePrecision::YearMonth),
            3 => (
                Some(parse_fixed(parts[1], 2)?),
                Some(parse_fixed(parts[2], 2)?),
                DatePrecision::Full,
            ),
            _ => return None,
        };
        if let Some(month) = month {
            if !(1..=12).contains(&month) {
                return None;
            }
        }
        if let (Some(month), Some(day)) = (month, day) {
            NaiveDate::from_ymd_opt(year, month, day)?;
        }
        Some(Self {
            year,
            month,
            day,
            precision,
            original_string: Arc::from(s),
        })
    }

    pub fn precision(&self) -> DatePrecision {
        self.precision
    }

    pub fn original_string(&self) -> &str {
        &self.original_string
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Option<u32> {
        self.month
    }

    pub fn day(&self) -> Option<u32> {
        self.day
    }

    /// Converts to a `NaiveDate`, filling missing components with 1.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month.unwrap_or(1), self.day.unwrap_or(1))
    }

    /// Compares two dates component by component.
    ///
    /// Returns `None` when the values agree up to the shorter precision, since
    /// the order is then indeterminate.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match self.year.cmp(&other.year) {
            Ordering::Equal => {}
            ord => return Some(ord),
        }
        match (self.month, other.month) {
            (None, None) => return Some(Ordering::Equal),
            (Some(m1), Some(m2)) if m1 != m2 => return Some(m1.cmp(&m2)),
            (Some(_), Some(_)) => {}
            _ => return None,
        }
        match (self.day, other.day) {
            (None, None) => Some(Ordering::Equal),
            (Some(d1), Some(d2)) => Some(d1.cmp(&d2)),
            _ => None,
        }
    }
}

/// A FHIR `time` (`hh:mm:ss` with optional fraction, no timezone).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrecisionTime {
    hour: u32,
    minute: u32,
    second: u32,
    millisecond: Option<u32>,
    original_string: Arc<str>,
}

impl PrecisionTime {
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        Self::parse(&format!("{hour:02}:{minute:02}:{second:02}"))
    }

    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 3 {
            return None;
        }
        let hour = parse_fixed(parts[0], 2)?;
        let minute = parse_fixed(parts[1], 2)?;
        let (second_str, fraction) = match parts[2].split_once('.') {
            Some((sec, frac)) => (sec, Some(frac)),
            None => (parts[2], None),
        };
        let second = parse_fixed(second_str, 2)?;
        // 60 is allowed for leap seconds
        if hour > 23 || minute > 59 || second > 60 {
            return None;
        }
        let millisecond = match fraction {
            Some(frac) if !frac.is_empty() && frac.len() <= 9 && frac.bytes().all(|b| b.is_ascii_digit()) => {
                Some(format!("{frac:0<3}")[..3].parse::<u32>().ok()?)
            }
            Some(_) => return None,
            None => None,
        };
        Some(Self {
            hour,
            minute,
            second,
            millisecond,
            original_string: Arc::from(s),
        })
    }

    pub fn original_string(&self) -> &str {
        &self.original_string
    }

    pub fn has_fraction(&self) -> bool {
        self.millisecond.is_some()
    }

    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_milli_opt(
            self.hour,
            self.minute,
            self.second.min(59),
            self.millisecond.unwrap_or(0),
        )
    }

    pub fn compare(&self, other: &Self) -> Ordering {
        let total = |t: &Self| ((t.hour * 60 + t.minute) * 60 + t.second) * 1000 + t.millisecond.unwrap_or(0);
        total(self).cmp(&total(other))
    }
}

/// A FHIR `dateTime`, preserving precision, timezone and original text.
///
/// # Examples
/// ```rust
/// use atrius_fhir_model::{DateTimePrecision, PrecisionDateTime};
///
/// let date_only = PrecisionDateTime::parse("2023-03-15").unwrap();
/// assert_eq!(date_only.precision(), DateTimePrecision::Date);
///
/// let full = PrecisionDateTime::parse("2023-03-15T14:30:45.123Z").unwrap();
/// assert_eq!(full.precision(), DateTimePrecision::Fraction);
/// assert_eq!(full.timezone_offset(), Some(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrecisionDateTime {
    date: PrecisionDate,
    time: Option<PrecisionTime>,
    /// Offset from UTC in minutes.
    timezone_offset: Option<i32>,
    precision: DateTimePrecision,
    original_string: Arc<str>,
}

impl PrecisionDateTime {
    pub fn parse(s: &str) -> Option<Self> {
        let Some((date_part, time_and_tz)) = s.split_once('T') else {
            let date = PrecisionDate::parse(s)?;
            return Some(Self::from_precision_date(date));
        };
        let date = PrecisionDate::parse(date_part)?;
        if date.precision() != DatePrecision::Full {
            return None;
        }
        let (time_part, timezone_offset) = split_timezone(time_and_tz)?;
        // A time without a timezone is not a valid dateTime.
        let timezone_offset = timezone_offset?;
        let time = PrecisionTime::parse(time_part)?;
        let precision = if time.has_fraction() {
            DateTimePrecision::Fraction
        } else {
            DateTimePrecision::Second
        };
        Some(Self {
            date,
            time: Some(time),
            timezone_offset: Some(timezone_offset),
            precision,
            original_string: Arc::from(s),
        })
    }

    pub fn from_precision_date(date: PrecisionDate) -> Self {
        let precision = match date.precision() {
            DatePrecision::Year => DateTimePrecision::Year,
            DatePrecision::YearMonth => DateTimePrecision::YearMonth,
            DatePrecision::Full => DateTimePrecision::Date,
        };
        Self {
            original_string: date.original_string.clone(),
            date,
            time: None,
            timezone_offset: None,
            precision,
        }
    }

    pub fn precision(&self) -> DateTimePrecision {
        self.precision
    }

    pub fn original_string(&self) -> &str {
        &self.original_string
    }

    pub fn date(&self) -> &PrecisionDate {
        &self.date
    }

    pub fn time(&self) -> Option<&PrecisionTime> {
        self.time.as_ref()
    }

    pub fn timezone_offset(&self) -> Option<i32> {
        self.timezone_offset
    }

    /// Converts to UTC, filling missing components with their minimum.
    pub fn to_chrono_datetime(&self) -> Option<ChronoDateTime<Utc>> {
        let naive_date = self.date.to_naive_date()?;
        let naive_time = match &self.time {
            Some(time) => time.to_naive_time()?,
            None => NaiveTime::from_hms_opt(0, 0, 0)?,
        };
        let local = naive_date.and_time(naive_time);
        let utc = local - chrono::Duration::minutes(i64::from(self.timezone_offset.unwrap_or(0)));
        Some(ChronoDateTime::<Utc>::from_naive_utc_and_offset(utc, Utc))
    }

    /// Orders two values when their precision allows it.
    ///
    /// Values with a time are compared as instants; date-only values are
    /// compared component-wise; mixing the two compares the date parts and is
    /// indeterminate when those are equal.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (&self.time, &other.time) {
            (Some(_), Some(_)) => Some(self.to_chrono_datetime()?.cmp(&other.to_chrono_datetime()?)),
            _ => match self.date.compare(&other.date) {
                Some(Ordering::Equal) if self.time.is_some() != other.time.is_some() => None,
                ord => ord,
            },
        }
    }
}

/// A FHIR `instant`: a dateTime that is always complete to the second and
/// carries a timezone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrecisionInstant {
    inner: PrecisionDateTime,
}

impl PrecisionInstant {
    pub fn parse(s: &str) -> Option<Self> {
        let inner = PrecisionDateTime::parse(s)?;
        if inner.precision() < DateTimePrecision::Second {
            return None;
        }
        Some(PrecisionInstant { inner })
    }

    pub fn original_string(&self) -> &str {
        self.inner.original_string()
    }

    pub fn as_datetime(&self) -> &PrecisionDateTime {
        &self.inner
    }

    pub fn to_chrono_datetime(&self) -> Option<ChronoDateTime<Utc>> {
        self.inner.to_chrono_datetime()
    }
}

fn parse_fixed(s: &str, width: usize) -> Option<u32> {
    if s.len() != width || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Splits `hh:mm:ss[.fff](Z|+hh:mm|-hh:mm)` into the time and offset minutes.
fn split_timezone(s: &str) -> Option<(&str, Option<i32>)> {
    if let Some(time) = s.strip_suffix('Z') {
        return Some((time, Some(0)));
    }
    let Some(pos) = s.rfind(['+', '-']) else {
        return Some((s, None));
    };
    let (time, tz) = s.split_at(pos);
    let sign = if tz.starts_with('-') { -1 } else { 1 };
    let (hours, minutes) = tz[1..].split_once(':')?;
    let hours = parse_fixed(hours, 2)? as i32;
    let minutes = parse_fixed(minutes, 2)? as i32;
    if hours > 14 || minutes > 59 {
        return None;
    }
    Some((time, Some(sign * (hours * 60 + minutes))))
}

macro_rules! string_backed {
    ($ty:ident, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.original_string())
            }
        }

        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(self.original_string())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                $ty::parse(&s).ok_or_else(|| de::Error::custom(format!(concat!("invalid FHIR ", $what, ": {}"), s)))
            }
        }
    };
}

string_backed!(PrecisionDate, "date");
string_backed!(PrecisionTime, "time");
string_backed!(PrecisionDateTime, "dateTime");
string_backed!(PrecisionInstant, "instant");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_require_fixed_width_components() {
        assert!(PrecisionDate::parse("2023-3-15").is_none());
        assert!(PrecisionDate::parse("23").is_none());
        assert!(PrecisionDate::parse("2023-13").is_none());
        assert!(PrecisionDate::parse("2024-02-29").is_some());
        assert!(PrecisionDate::parse("2023-02-29").is_none());
    }

    #[test]
    fn date_time_requires_timezone_with_time() {
        assert!(PrecisionDateTime::parse("2023-03-15T10:00:00").is_none());
        assert!(PrecisionDateTime::parse("2023-03-15T10:00").is_none());
        let dt = PrecisionDateTime::parse("2023-03-15T10:00:00+05:30").unwrap();
        assert_eq!(dt.timezone_offset(), Some(330));
        assert_eq!(dt.precision(), DateTimePrecision::Second);
        let dt = PrecisionDateTime::parse("2023-03-15T10:00:00-03:00").unwrap();
        assert_eq!(dt.timezone_offset(), Some(-180));
    }

    #[test]
    fn partial_date_times_keep_precision() {
        assert_eq!(PrecisionDateTime::parse("2023").unwrap().precision(), DateTimePrecision::Year);
        assert_eq!(PrecisionDateTime::parse("2023-07").unwrap().precision(), DateTimePrecision::YearMonth);
        assert!(PrecisionDateTime::parse("2023-07T10:00:00Z").is_none());
    }

    #[test]
    fn compare_across_timezones() {
        let a = PrecisionDateTime::parse("2023-03-15T10:00:00Z").unwrap();
        let b = PrecisionDateTime::parse("2023-03-15T11:30:00+02:00").unwrap();
        assert_eq!(a.compare(&b), Some(Ordering::Greater));
    }

    #[test]
    fn compare_partial_precision() {
        let year = PrecisionDateTime::parse("2023").unwrap();
        let day = PrecisionDateTime::parse("2023-05-01").unwrap();
        let later = PrecisionDateTime::parse("2024").unwrap();
        assert_eq!(year.compare(&day), None);
        assert_eq!(year.compare(&later), Some(Ordering::Less));
    }

    #[test]
    fn instant_needs_seconds_and_zone() {
        assert!(PrecisionInstant::parse("2023-03-15").is_none());
        assert!(PrecisionInstant::parse("2023-03-15T10:00:00.123Z").is_some());
    }

    #[test]
    fn time_fraction_and_bounds() {
        let t = PrecisionTime::parse("14:30:45.5").unwrap();
        assert!(t.has_fraction());
        assert_eq!(t.to_naive_time(), NaiveTime::from_hms_milli_opt(14, 30, 45, 500));
        assert!(PrecisionTime::parse("24:00:00").is_none());
        assert!(PrecisionTime::parse("10:00").is_none());
        assert!(PrecisionTime::parse("10:00:00.").is_none());
    }

    #[test]
    fn serde_keeps_original_text() {
        let dt: PrecisionDateTime = serde_json::from_str("\"2023-03-15T14:30:45.120Z\"").unwrap();
        assert_eq!(serde_json::to_string(&dt).unwrap(), "\"2023-03-15T14:30:45.120Z\"");
        assert!(serde_json::from_str::<PrecisionDate>("\"March\"").is_err());
    }
}
