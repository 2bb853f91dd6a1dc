mod gregorian;
mod grid;
mod jalali;
mod years;
pub(crate) use self::gregorian::Gregorian;
pub(crate) use self::grid::{build_month_grid, MonthGrid};
pub(crate) use self::jalali::Jalali;
pub(crate) use self::years::YearSpan;
use crate::locale::Locale;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::Weekday;

pub(crate) const DAYS_IN_WEEK: usize = 7;

pub(crate) const MONTHS_IN_YEAR: u8 = 12;

/// A day in some calendar system.  Which system is up to the
/// [`CalendarProvider`] that produced it; the weekday is always derived
/// through the provider and never stored.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct CalendarDate {
    year: i32,
    month: u8,
    day: u8,
}

impl CalendarDate {
    /// Construct a date without checking it against any calendar.  Use
    /// [`CalendarProvider::date()`] for a validated value.
    pub(crate) const fn new(year: i32, month: u8, day: u8) -> CalendarDate {
        CalendarDate { year, month, day }
    }

    pub(crate) fn year(&self) -> i32 {
        self.year
    }

    pub(crate) fn month(&self) -> u8 {
        self.month
    }

    pub(crate) fn day(&self) -> u8 {
        self.day
    }

    fn with_day(self, day: u8) -> CalendarDate {
        CalendarDate { day, ..self }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

/// Parses `YYYY/MM/DD`.  Only the shape is checked here; whether the day
/// exists is a question for a [`CalendarProvider`].
impl FromStr for CalendarDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<CalendarDate, CalendarError> {
        let bad = || CalendarError::Parse(s.to_owned());
        let mut parts = s.trim().split('/');
        let (Some(year), Some(month), Some(day), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(bad());
        };
        let year = year.parse::<i32>().map_err(|_| bad())?;
        let month = month.parse::<u8>().map_err(|_| bad())?;
        let day = day.parse::<u8>().map_err(|_| bad())?;
        Ok(CalendarDate { year, month, day })
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum CalendarError {
    #[error("year {0} is outside the supported range")]
    YearOutOfRange(i32),
    #[error("invalid month number: {0}")]
    InvalidMonth(u8),
    #[error("{year}/{month:02} has no day {day}")]
    InvalidDay { year: i32, month: u8, day: u8 },
    #[error("date arithmetic overflowed")]
    Overflow,
    #[error("invalid date {0:?}; expected YYYY/MM/DD")]
    Parse(String),
    #[error(transparent)]
    Gregorian(#[from] time::error::ComponentRange),
}

pub(crate) trait WeekdayExt {
    /// Position of the weekday in a week that begins on `week_start`
    fn index_from(&self, week_start: Weekday) -> usize;
}

impl WeekdayExt for Weekday {
    fn index_from(&self, week_start: Weekday) -> usize {
        let this = usize::from(self.number_days_from_sunday());
        let start = usize::from(week_start.number_days_from_sunday());
        (this + DAYS_IN_WEEK - start) % DAYS_IN_WEEK
    }
}

/// The date engine.  Implementors supply month lengths and a mapping to and
/// from Julian day numbers; everything else is derived from those.
pub(crate) trait CalendarProvider {
    fn week_start(&self) -> Weekday;

    fn month_len(&self, year: i32, month: u8) -> Result<u8, CalendarError>;

    fn to_julian_day(&self, date: CalendarDate) -> Result<i32, CalendarError>;

    fn from_julian_day(&self, jdn: i32) -> Result<CalendarDate, CalendarError>;

    fn month_name(&self, month: u8, locale: Locale) -> &'static str;

    fn date(&self, year: i32, month: u8, day: u8) -> Result<CalendarDate, CalendarError> {
        if !(1..=MONTHS_IN_YEAR).contains(&month) {
            return Err(CalendarError::InvalidMonth(month));
        }
        if day == 0 || day > self.month_len(year, month)? {
            return Err(CalendarError::InvalidDay { year, month, day });
        }
        Ok(CalendarDate::new(year, month, day))
    }

    fn validate(&self, date: CalendarDate) -> Result<CalendarDate, CalendarError> {
        self.date(date.year, date.month, date.day)
    }

    fn from_gregorian(&self, date: time::Date) -> Result<CalendarDate, CalendarError> {
        self.from_julian_day(date.to_julian_day())
    }

    fn to_gregorian(&self, date: CalendarDate) -> Result<time::Date, CalendarError> {
        Ok(time::Date::from_julian_day(self.to_julian_day(date)?)?)
    }

    fn weekday(&self, date: CalendarDate) -> Result<Weekday, CalendarError> {
        Ok(self.to_gregorian(date)?.weekday())
    }

    /// Column of `date` in a week starting on [`Self::week_start()`]
    fn week_index(&self, date: CalendarDate) -> Result<usize, CalendarError> {
        Ok(self.weekday(date)?.index_from(self.week_start()))
    }

    fn add_days(&self, date: CalendarDate, days: i32) -> Result<CalendarDate, CalendarError> {
        let jdn = self
            .to_julian_day(date)?
            .checked_add(days)
            .ok_or(CalendarError::Overflow)?;
        self.from_julian_day(jdn)
    }

    /// Move by whole months, clamping the day to the length of the target
    /// month
    fn add_months(&self, date: CalendarDate, months: i32) -> Result<CalendarDate, CalendarError> {
        let total = i64::from(date.year) * i64::from(MONTHS_IN_YEAR)
            + i64::from(date.month)
            - 1
            + i64::from(months);
        let year = i32::try_from(total.div_euclid(i64::from(MONTHS_IN_YEAR)))
            .map_err(|_| CalendarError::Overflow)?;
        let month = u8::try_from(total.rem_euclid(i64::from(MONTHS_IN_YEAR)) + 1)
            .map_err(|_| CalendarError::Overflow)?;
        self.clamped(year, month, date.day)
    }

    fn add_years(&self, date: CalendarDate, years: i32) -> Result<CalendarDate, CalendarError> {
        let year = date
            .year
            .checked_add(years)
            .ok_or(CalendarError::Overflow)?;
        self.clamped(year, date.month, date.day)
    }

    fn set_month(&self, date: CalendarDate, month: u8) -> Result<CalendarDate, CalendarError> {
        if !(1..=MONTHS_IN_YEAR).contains(&month) {
            return Err(CalendarError::InvalidMonth(month));
        }
        self.clamped(date.year, month, date.day)
    }

    fn set_year(&self, date: CalendarDate, year: i32) -> Result<CalendarDate, CalendarError> {
        self.clamped(year, date.month, date.day)
    }

    fn start_of_month(&self, date: CalendarDate) -> CalendarDate {
        date.with_day(1)
    }

    fn end_of_month(&self, date: CalendarDate) -> Result<CalendarDate, CalendarError> {
        Ok(date.with_day(self.month_len(date.year, date.month)?))
    }

    fn clamped(&self, year: i32, month: u8, day: u8) -> Result<CalendarDate, CalendarError> {
        let len = self.month_len(year, month)?;
        Ok(CalendarDate::new(year, month, day.clamp(1, len)))
    }
}

impl<T: CalendarProvider + ?Sized> CalendarProvider for &T {
    fn week_start(&self) -> Weekday {
        (**self).week_start()
    }

    fn month_len(&self, year: i32, month: u8) -> Result<u8, CalendarError> {
        (**self).month_len(year, month)
    }

    fn to_julian_day(&self, date: CalendarDate) -> Result<i32, CalendarError> {
        (**self).to_julian_day(date)
    }

    fn from_julian_day(&self, jdn: i32) -> Result<CalendarDate, CalendarError> {
        (**self).from_julian_day(jdn)
    }

    fn month_name(&self, month: u8, locale: Locale) -> &'static str {
        (**self).month_name(month, locale)
    }
}

/// Shared by the providers' name tables: `month` is 1-based and anything out
/// of range yields an empty string
fn lookup_name(names: &'static [&'static str; 12], month: u8) -> &'static str {
    usize::from(month)
        .checked_sub(1)
        .and_then(|i| names.get(i))
        .copied()
        .unwrap_or_default()
}
