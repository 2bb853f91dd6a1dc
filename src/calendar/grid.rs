use super::{CalendarDate, CalendarError, CalendarProvider, DAYS_IN_WEEK};
use std::slice::Chunks;

/// One cell of a month view
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct GridDay {
    pub(crate) date: CalendarDate,
    /// Set for the padding days borrowed from the neighbouring months
    pub(crate) outside_month: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
// Invariant: `days.len()` is a nonzero multiple of DAYS_IN_WEEK, and the
// days form an ascending run with no gaps
pub(crate) struct MonthGrid {
    year: i32,
    month: u8,
    days: Vec<GridDay>,
}

impl MonthGrid {
    pub(crate) fn year(&self) -> i32 {
        self.year
    }

    pub(crate) fn month(&self) -> u8 {
        self.month
    }

    pub(crate) fn len(&self) -> usize {
        self.days.len()
    }

    pub(crate) fn weeks(&self) -> Chunks<'_, GridDay> {
        self.days.chunks(DAYS_IN_WEEK)
    }
}

/// Lay out the month containing `cursor` as whole weeks: the days of the
/// month, preceded by the tail of the previous month back to the start of
/// the week and followed by the head of the next month up to the end of the
/// last week.  Only the cursor's year and month matter.
pub(crate) fn build_month_grid<C: CalendarProvider + ?Sized>(
    provider: &C,
    cursor: CalendarDate,
) -> Result<MonthGrid, CalendarError> {
    let start = provider.start_of_month(cursor);
    let end = provider.end_of_month(cursor)?;
    let leading = provider.week_index(start)?;
    let mut days = Vec::with_capacity(DAYS_IN_WEEK * 6);
    for back in (1..=leading).rev() {
        days.push(GridDay {
            date: provider.add_days(start, -offset(back)?)?,
            outside_month: true,
        });
    }
    days.extend((1..=end.day()).map(|day| GridDay {
        date: CalendarDate::new(start.year(), start.month(), day),
        outside_month: false,
    }));
    let mut trailing = DAYS_IN_WEEK - 1 - provider.week_index(end)?;
    // Finish the last row even if the weekday arithmetic above came up short
    trailing += (DAYS_IN_WEEK - (days.len() + trailing) % DAYS_IN_WEEK) % DAYS_IN_WEEK;
    for ahead in 1..=trailing {
        days.push(GridDay {
            date: provider.add_days(end, offset(ahead)?)?,
            outside_month: true,
        });
    }
    Ok(MonthGrid {
        year: start.year(),
        month: start.month(),
        days,
    })
}

fn offset(n: usize) -> Result<i32, CalendarError> {
    i32::try_from(n).map_err(|_| CalendarError::Overflow)
}
