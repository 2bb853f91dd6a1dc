use super::{lookup_name, CalendarDate, CalendarError, CalendarProvider};
use crate::locale::Locale;
use time::{Date, Month, Weekday};

/// Years at which the 33-year leap cycle of the astronomical solar Hijri
/// calendar gets "broken" (Borkowski).  Conversions are only defined for
/// years in `BREAKS[0]..BREAKS[last]`.
const BREAKS: [i32; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

/// Number of Gregorian years between the two calendars' eras
const ERA_OFFSET: i32 = 621;

/// Ordinal (0-based) of the first day of Mehr, after which months have 30
/// days
const FIRST_SHORT_MONTH_ORDINAL: i32 = 186;

static MONTHS_FA: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

static MONTHS_EN: [&str; 12] = [
    "Farvardin",
    "Ordibehesht",
    "Khordad",
    "Tir",
    "Mordad",
    "Shahrivar",
    "Mehr",
    "Aban",
    "Azar",
    "Dey",
    "Bahman",
    "Esfand",
];

/// The solar Hijri calendar, with Saturday-first weeks
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Jalali;

impl CalendarProvider for Jalali {
    fn week_start(&self) -> Weekday {
        Weekday::Saturday
    }

    fn month_len(&self, year: i32, month: u8) -> Result<u8, CalendarError> {
        let info = YearInfo::for_year(year)?;
        match month {
            1..=6 => Ok(31),
            7..=11 => Ok(30),
            12 if info.since_leap == 0 => Ok(30),
            12 => Ok(29),
            _ => Err(CalendarError::InvalidMonth(month)),
        }
    }

    fn to_julian_day(&self, date: CalendarDate) -> Result<i32, CalendarError> {
        let date = self.validate(date)?;
        let nowruz = YearInfo::for_year(date.year())?.nowruz()?;
        let m = i32::from(date.month());
        Ok(nowruz + (m - 1) * 31 - (m / 7) * (m - 7) + i32::from(date.day()) - 1)
    }

    fn from_julian_day(&self, jdn: i32) -> Result<CalendarDate, CalendarError> {
        // The Jalali year starts in March, so this guess is one too high from
        // January up to Nowruz
        let guess = Date::from_julian_day(jdn)?.year() - ERA_OFFSET;
        let after_nowruz = match YearInfo::for_year(guess) {
            Ok(info) => jdn >= info.nowruz()?,
            Err(_) => false,
        };
        let year = if after_nowruz { guess } else { guess - 1 };
        let info = YearInfo::for_year(year)?;
        let mut k = jdn - info.nowruz()?;
        if k >= info.days() {
            return Err(CalendarError::YearOutOfRange(year + 1));
        }
        if k < FIRST_SHORT_MONTH_ORDINAL {
            return Ok(CalendarDate::new(year, small(1 + k / 31)?, small(k % 31 + 1)?));
        }
        k -= FIRST_SHORT_MONTH_ORDINAL;
        Ok(CalendarDate::new(year, small(7 + k / 30)?, small(k % 30 + 1)?))
    }

    fn month_name(&self, month: u8, locale: Locale) -> &'static str {
        match locale {
            Locale::Fa => lookup_name(&MONTHS_FA, month),
            Locale::En => lookup_name(&MONTHS_EN, month),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct YearInfo {
    /// Years elapsed since the most recent leap year; 0 for a leap year
    since_leap: i32,
    gregorian_year: i32,
    /// Day of (Gregorian) March on which the year begins
    march_day: i32,
}

impl YearInfo {
    fn for_year(year: i32) -> Result<YearInfo, CalendarError> {
        let (first, last) = (BREAKS[0], BREAKS[BREAKS.len() - 1]);
        if !(first..last).contains(&year) {
            return Err(CalendarError::YearOutOfRange(year));
        }
        let gregorian_year = year + ERA_OFFSET;
        let mut leap_j = -14;
        let mut jp = first;
        let mut jump = 0;
        for &jm in &BREAKS[1..] {
            jump = jm - jp;
            if year < jm {
                break;
            }
            leap_j += jump / 33 * 8 + jump % 33 / 4;
            jp = jm;
        }
        let mut n = year - jp;
        leap_j += n / 33 * 8 + (n % 33 + 3) / 4;
        if jump % 33 == 4 && jump - n == 4 {
            leap_j += 1;
        }
        let leap_g = gregorian_year / 4 - (gregorian_year / 100 + 1) * 3 / 4 - 150;
        let march_day = 20 + leap_j - leap_g;
        if jump - n < 6 {
            n = n - jump + (jump + 4) / 33 * 33;
        }
        let mut since_leap = ((n + 1) % 33 - 1) % 4;
        if since_leap == -1 {
            since_leap = 4;
        }
        Ok(YearInfo {
            since_leap,
            gregorian_year,
            march_day,
        })
    }

    fn days(&self) -> i32 {
        if self.since_leap == 0 {
            366
        } else {
            365
        }
    }

    /// Julian day number of 1 Farvardin
    fn nowruz(&self) -> Result<i32, CalendarError> {
        let day = small(self.march_day)?;
        Ok(Date::from_calendar_date(self.gregorian_year, Month::March, day)?.to_julian_day())
    }
}

fn small(n: i32) -> Result<u8, CalendarError> {
    u8::try_from(n).map_err(|_| CalendarError::Overflow)
}
