use super::{lookup_name, CalendarDate, CalendarError, CalendarProvider};
use crate::locale::Locale;
use time::{Date, Month, Weekday};

static MONTHS_FA: [&str; 12] = [
    "ژانویه",
    "فوریه",
    "مارس",
    "آوریل",
    "مه",
    "ژوئن",
    "ژوئیه",
    "اوت",
    "سپتامبر",
    "اکتبر",
    "نوامبر",
    "دسامبر",
];

static MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// The proleptic Gregorian calendar as implemented by [`time::Date`], with
/// Sunday-first weeks
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Gregorian;

impl CalendarProvider for Gregorian {
    fn week_start(&self) -> Weekday {
        Weekday::Sunday
    }

    fn month_len(&self, year: i32, month: u8) -> Result<u8, CalendarError> {
        let m = Month::try_from(month).map_err(|_| CalendarError::InvalidMonth(month))?;
        Date::from_calendar_date(year, m, 1).map_err(|_| CalendarError::YearOutOfRange(year))?;
        Ok(m.length(year))
    }

    fn to_julian_day(&self, date: CalendarDate) -> Result<i32, CalendarError> {
        let date = self.validate(date)?;
        let m = Month::try_from(date.month())?;
        Ok(Date::from_calendar_date(date.year(), m, date.day())?.to_julian_day())
    }

    fn from_julian_day(&self, jdn: i32) -> Result<CalendarDate, CalendarError> {
        let d = Date::from_julian_day(jdn)?;
        Ok(CalendarDate::new(d.year(), u8::from(d.month()), d.day()))
    }

    fn month_name(&self, month: u8, locale: Locale) -> &'static str {
        match locale {
            Locale::Fa => lookup_name(&MONTHS_FA, month),
            Locale::En => lookup_name(&MONTHS_EN, month),
        }
    }
}
