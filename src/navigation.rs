use crate::calendar::{
    build_month_grid, CalendarDate, CalendarError, CalendarProvider, MonthGrid, YearSpan,
};
use crate::locale::Locale;

/// Number of years skipped by one page of the year picker
pub(crate) const YEAR_BLOCK_STEP: i32 = 12;

/// The displayed month (or year block) of a picker.  The cursor's day is
/// ignored when laying out the grid; the date picker uses it as the focused
/// day.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Navigator<C> {
    provider: C,
    today: CalendarDate,
    cursor: CalendarDate,
    grid: MonthGrid,
}

impl<C: CalendarProvider> Navigator<C> {
    pub(crate) fn new(provider: C, today: CalendarDate) -> Result<Self, CalendarError> {
        let today = provider.validate(today)?;
        let grid = build_month_grid(&provider, today)?;
        Ok(Navigator {
            provider,
            today,
            cursor: today,
            grid,
        })
    }

    pub(crate) fn provider(&self) -> &C {
        &self.provider
    }

    pub(crate) fn today(&self) -> CalendarDate {
        self.today
    }

    pub(crate) fn cursor(&self) -> CalendarDate {
        self.cursor
    }

    pub(crate) fn grid(&self) -> &MonthGrid {
        &self.grid
    }

    pub(crate) fn prev_month(&mut self) -> Result<(), CalendarError> {
        self.step(|p, c| p.add_months(c, -1))
    }

    pub(crate) fn next_month(&mut self) -> Result<(), CalendarError> {
        self.step(|p, c| p.add_months(c, 1))
    }

    /// `month` is 1-based
    pub(crate) fn set_month(&mut self, month: u8) -> Result<(), CalendarError> {
        self.step(|p, c| p.set_month(c, month))
    }

    pub(crate) fn set_year(&mut self, year: i32) -> Result<(), CalendarError> {
        self.step(|p, c| p.set_year(c, year))
    }

    pub(crate) fn prev_year_block(&mut self) -> Result<(), CalendarError> {
        self.step(|p, c| p.add_years(c, -YEAR_BLOCK_STEP))
    }

    pub(crate) fn next_year_block(&mut self) -> Result<(), CalendarError> {
        self.step(|p, c| p.add_years(c, YEAR_BLOCK_STEP))
    }

    pub(crate) fn move_days(&mut self, days: i32) -> Result<(), CalendarError> {
        self.step(|p, c| p.add_days(c, days))
    }

    pub(crate) fn jump_to_today(&mut self) -> Result<(), CalendarError> {
        let today = self.today;
        self.step(|_, _| Ok(today))
    }

    pub(crate) fn jump_to(&mut self, date: CalendarDate) -> Result<(), CalendarError> {
        self.step(|p, _| p.validate(date))
    }

    /// Whether the calendar can represent `year` at all
    pub(crate) fn has_year(&self, year: i32) -> bool {
        self.provider.month_len(year, 1).is_ok()
    }

    /// Years offered by the year dropdown
    pub(crate) fn year_options(&self, span: YearSpan) -> Vec<i32> {
        span.around(self.cursor.year())
    }

    /// The page of years shown by the year picker
    pub(crate) fn year_block(&self) -> Vec<i32> {
        YearSpan::BLOCK.around(self.cursor.year())
    }

    pub(crate) fn month_title(&self, locale: Locale) -> String {
        format!(
            "{} {}",
            self.provider.month_name(self.cursor.month(), locale),
            self.cursor.year()
        )
    }

    pub(crate) fn year_block_title(&self, locale: Locale) -> String {
        let block = self.year_block();
        match (block.first(), block.last()) {
            (Some(&first), Some(&last)) => locale.year_block_title(first, last),
            _ => String::new(),
        }
    }

    // Either the cursor and grid both move or neither does
    fn step<F>(&mut self, func: F) -> Result<(), CalendarError>
    where
        F: FnOnce(&C, CalendarDate) -> Result<CalendarDate, CalendarError>,
    {
        let cursor = func(&self.provider, self.cursor)?;
        if (cursor.year(), cursor.month()) != (self.grid.year(), self.grid.month()) {
            self.grid = build_month_grid(&self.provider, cursor)?;
        }
        log::debug!("cursor moved from {} to {}", self.cursor, cursor);
        self.cursor = cursor;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Jalali;

    fn nav(year: i32, month: u8, day: u8) -> Navigator<Jalali> {
        Navigator::new(Jalali, CalendarDate::new(year, month, day)).unwrap()
    }

    #[test]
    fn twelve_next_months_is_one_year() {
        let mut n = nav(1403, 5, 12);
        for _ in 0..12 {
            n.next_month().unwrap();
        }
        assert_eq!(n.cursor(), CalendarDate::new(1404, 5, 12));
        assert_eq!((n.grid().year(), n.grid().month()), (1404, 5));
    }

    #[test]
    fn prev_month_across_year() {
        let mut n = nav(1403, 1, 31);
        n.prev_month().unwrap();
        assert_eq!(n.cursor(), CalendarDate::new(1402, 12, 29));
        assert_eq!(n.grid().month(), 12);
    }

    #[test]
    fn set_year_keeps_month() {
        let mut n = nav(1403, 8, 3);
        n.set_year(1390).unwrap();
        assert_eq!(n.cursor(), CalendarDate::new(1390, 8, 3));
    }

    #[test]
    fn set_month_keeps_year() {
        let mut n = nav(1403, 8, 3);
        n.set_month(2).unwrap();
        assert_eq!(n.cursor(), CalendarDate::new(1403, 2, 3));
        assert_eq!(n.month_title(Locale::En), "Ordibehesht 1403");
    }

    #[test]
    fn failed_step_leaves_state_alone() {
        let mut n = nav(1403, 8, 3);
        let before = n.clone();
        assert_eq!(n.set_month(13), Err(CalendarError::InvalidMonth(13)));
        assert_eq!(n, before);
        assert_eq!(
            n.set_year(5000),
            Err(CalendarError::YearOutOfRange(5000))
        );
        assert_eq!(n, before);
    }

    #[test]
    fn year_blocks() {
        let mut n = nav(1403, 1, 1);
        assert_eq!(n.year_block(), (1399..=1410).collect::<Vec<_>>());
        assert_eq!(n.year_block_title(Locale::En), "1399 – 1410");
        n.next_year_block().unwrap();
        assert_eq!(n.cursor().year(), 1415);
        n.prev_year_block().unwrap();
        n.prev_year_block().unwrap();
        assert_eq!(n.year_block_title(Locale::En), "1387 – 1398");
    }

    #[test]
    fn move_days_follows_into_next_month() {
        let mut n = nav(1403, 6, 30);
        n.move_days(7).unwrap();
        assert_eq!(n.cursor(), CalendarDate::new(1403, 7, 6));
        assert_eq!(n.grid().month(), 7);
        n.jump_to_today().unwrap();
        assert_eq!(n.cursor(), CalendarDate::new(1403, 6, 30));
    }

    #[test]
    fn jump_to_validates() {
        let mut n = nav(1403, 6, 30);
        assert!(n.jump_to(CalendarDate::new(1404, 12, 30)).is_err());
        n.jump_to(CalendarDate::new(1404, 12, 29)).unwrap();
        assert_eq!(n.grid().year(), 1404);
    }

    #[test]
    fn edges_of_the_calendar() {
        let mut n = nav(3177, 11, 5);
        let before = n.clone();
        assert_eq!(n.next_month(), Err(CalendarError::YearOutOfRange(3178)));
        assert_eq!(n, before);
        assert!(n.has_year(3177));
        assert!(!n.has_year(3178));
        assert!(n.has_year(-61));
        assert!(!n.has_year(-62));
        assert_eq!(
            Navigator::new(Jalali, CalendarDate::new(-61, 1, 10)),
            Err(CalendarError::YearOutOfRange(-62))
        );
        let mut n = nav(-61, 2, 1);
        assert_eq!(n.prev_month(), Err(CalendarError::YearOutOfRange(-62)));
        assert_eq!(n.cursor(), CalendarDate::new(-61, 2, 1));
    }

    #[test]
    fn dropdown_years() {
        let n = nav(1403, 6, 30);
        let years = n.year_options(YearSpan::LEGACY_DROPDOWN);
        assert_eq!(years.len(), 100);
        assert!(years.contains(&1403));
    }
}
