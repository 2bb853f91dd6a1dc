use super::canvas::{centered, Canvas};
use super::dropdown::{Choice, Dropdown};
use super::{outcome, DayStyler, Hit, PickerInput, PickerOutput, PickerState, SelectsPosition};
use crate::calendar::{CalendarProvider, DAYS_IN_WEEK, MONTHS_IN_YEAR};
use crate::selection::Selection;
use crate::theme::{
    day::{FOCUS_STYLE, OUTSIDE_MONTH_STYLE, TODAY_STYLE},
    BASE_STYLE, NAV_STYLE, SELECT_STYLE, TITLE_STYLE, WEEKDAY_STYLE,
};
use ratatui::{buffer::Buffer, layout::Rect};

const CELL_WIDTH: u16 = 4;

pub(super) const WIDTH: u16 = CELL_WIDTH * 7;

/// Header, selectors, weekday names and up to six weeks
pub(super) const HEIGHT: u16 = 9;

const SELECT_WIDTH: u16 = WIDTH / 2;

const MAX_WEEKS: u16 = 6;

/// Rows of the parts of the picker that move with the selectors
struct Rows {
    selects: u16,
    weekdays: u16,
    first_week: u16,
}

impl Rows {
    fn new(selects: SelectsPosition) -> Rows {
        match selects {
            SelectsPosition::Top => Rows {
                selects: 1,
                weekdays: 2,
                first_week: 3,
            },
            SelectsPosition::Bottom => Rows {
                selects: HEIGHT - 1,
                weekdays: 1,
                first_week: 2,
            },
        }
    }
}

pub(super) fn render<C: CalendarProvider, S: DayStyler>(
    state: &mut PickerState<C, S>,
    area: Rect,
    buf: &mut Buffer,
) {
    let locale = state.settings.locale;
    let rows = Rows::new(state.settings.selects);
    let nav = &state.nav;
    let cursor = nav.cursor();
    let today = nav.today();
    let week_start = nav.provider().week_start();
    let hits = &mut state.hits;
    let mut canvas = Canvas::new(area, buf);

    let (prev, next) = if locale.is_rtl() {
        (
            canvas.mvprint_before(0, WIDTH, &state.settings.glyphs.right, NAV_STYLE),
            canvas.mvprint(0, 0, &state.settings.glyphs.left, NAV_STYLE),
        )
    } else {
        (
            canvas.mvprint(0, 0, &state.settings.glyphs.left, NAV_STYLE),
            canvas.mvprint_before(0, WIDTH, &state.settings.glyphs.right, NAV_STYLE),
        )
    };
    hits.push((prev, Hit::Prev));
    hits.push((next, Hit::Next));
    canvas.mvprint_centered(0, nav.month_title(locale), TITLE_STYLE);

    let (month_x, year_x) = if locale.is_rtl() {
        (SELECT_WIDTH, 0)
    } else {
        (0, SELECT_WIDTH)
    };
    let month_button = format!("{} ▾", nav.provider().month_name(cursor.month(), locale));
    let year_button = format!("{} ▾", cursor.year());
    for (x, label, hit) in [
        (month_x, month_button, Hit::MonthList),
        (year_x, year_button, Hit::YearList),
    ] {
        let padded = centered(&label, SELECT_WIDTH);
        let indent = u16::try_from(padded.len() - padded.trim_start().len()).unwrap_or(0);
        let region = canvas.mvprint(rows.selects, x + indent, label, SELECT_STYLE);
        hits.push((region, hit));
    }

    for i in 0u8..7 {
        let wd = week_start.nth_next(i);
        let x = column_x(locale.column(usize::from(i), DAYS_IN_WEEK));
        canvas.mvprint(
            rows.weekdays,
            x,
            centered(locale.weekday_abbr(wd), CELL_WIDTH),
            WEEKDAY_STYLE,
        );
    }

    for (y, week) in (rows.first_week..).zip(nav.grid().weeks()) {
        for (i, gd) in (0u8..).zip(week) {
            let wd = week_start.nth_next(i);
            let x = column_x(locale.column(usize::from(i), DAYS_IN_WEEK));
            let mut style = BASE_STYLE.patch(state.styler.day_style(gd.date, wd));
            if gd.outside_month {
                style = style.patch(OUTSIDE_MONTH_STYLE);
            }
            let text = if gd.date == today {
                style = style.patch(TODAY_STYLE);
                format!("[{:2}]", gd.date.day())
            } else {
                format!(" {:2} ", gd.date.day())
            };
            if gd.date == cursor {
                style = style.patch(FOCUS_STYLE);
            }
            let region = canvas.mvprint(y, x, text, style);
            hits.push((region, Hit::Day(gd.date)));
        }
    }

    if let Some(dd) = state.dropdown.as_mut() {
        let x = if matches!(dd.choice_at(0), Some(Choice::Year(_))) {
            year_x
        } else {
            month_x
        };
        let dd_area = Rect {
            x: area.x + x,
            y: area.y + rows.weekdays,
            width: SELECT_WIDTH,
            height: MAX_WEEKS + 1,
        }
        .intersection(area);
        dd.render(dd_area, buf, hits);
    }
}

fn column_x(column: usize) -> u16 {
    u16::try_from(column).unwrap_or(0) * CELL_WIDTH
}

impl<C: CalendarProvider, S: DayStyler> PickerState<C, S> {
    pub(super) fn handle_date_input(&mut self, input: PickerInput) -> PickerOutput {
        if self.dropdown.is_some() {
            return self.handle_dropdown_input(input);
        }
        let rtl = self.settings.locale.is_rtl();
        match input {
            PickerInput::Left => outcome(self.nav.move_days(if rtl { 1 } else { -1 })),
            PickerInput::Right => outcome(self.nav.move_days(if rtl { -1 } else { 1 })),
            PickerInput::Up => outcome(self.nav.move_days(-7)),
            PickerInput::Down => outcome(self.nav.move_days(7)),
            PickerInput::PrevPage => outcome(self.nav.prev_month()),
            PickerInput::NextPage => outcome(self.nav.next_month()),
            PickerInput::Select => PickerOutput::Commit(Selection::Date(self.nav.cursor())),
            PickerInput::Today => outcome(self.nav.jump_to_today()),
            PickerInput::MonthList => {
                self.dropdown = Some(self.month_dropdown());
                PickerOutput::Ok
            }
            PickerInput::YearList => {
                self.dropdown = Some(self.year_dropdown());
                PickerOutput::Ok
            }
            PickerInput::GoTo => PickerOutput::GoTo,
            PickerInput::Cancel => PickerOutput::Close,
            PickerInput::Click { .. } => PickerOutput::Invalid,
        }
    }

    fn handle_dropdown_input(&mut self, input: PickerInput) -> PickerOutput {
        let Some(dd) = self.dropdown.as_mut() else {
            return PickerOutput::Invalid;
        };
        match input {
            PickerInput::Up => ok_if(dd.previous()),
            PickerInput::Down => ok_if(dd.next()),
            PickerInput::Select => {
                let choice = dd.chosen();
                self.apply_choice(choice)
            }
            PickerInput::Cancel => {
                self.dropdown = None;
                PickerOutput::Ok
            }
            PickerInput::MonthList => {
                self.dropdown = Some(self.month_dropdown());
                PickerOutput::Ok
            }
            PickerInput::YearList => {
                self.dropdown = Some(self.year_dropdown());
                PickerOutput::Ok
            }
            _ => PickerOutput::Invalid,
        }
    }

    fn month_dropdown(&self) -> Dropdown {
        let locale = self.settings.locale;
        let entries = (1..=MONTHS_IN_YEAR)
            .map(|m| {
                (
                    self.nav.provider().month_name(m, locale).to_owned(),
                    Choice::Month(m),
                )
            })
            .collect();
        Dropdown::new(entries, Choice::Month(self.nav.cursor().month()))
    }

    fn year_dropdown(&self) -> Dropdown {
        let entries = self
            .nav
            .year_options(self.settings.year_span)
            .into_iter()
            .map(|y| (y.to_string(), Choice::Year(y)))
            .collect();
        Dropdown::new(entries, Choice::Year(self.nav.cursor().year()))
            .disable(|c| matches!(c, Choice::Year(y) if !self.nav.has_year(y)))
    }
}

fn ok_if(moved: bool) -> PickerOutput {
    if moved {
        PickerOutput::Ok
    } else {
        PickerOutput::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{rows, state};
    use super::super::{Picker, PickerMode};
    use super::*;
    use crate::calendar::CalendarDate;
    use crate::locale::Locale;
    use ratatui::widgets::StatefulWidget;

    fn draw<C: CalendarProvider, S: DayStyler>(st: &mut PickerState<C, S>) -> Buffer {
        let area = Rect::new(0, 0, 30, 11);
        let mut buf = Buffer::empty(area);
        Picker::new().render(area, &mut buf, st);
        buf
    }

    #[test]
    fn render_farvardin_1403() {
        let mut st = state(PickerMode::Date);
        let buf = draw(&mut st);
        assert_eq!(
            rows(&buf),
            [
                "┌────────────────────────────┐",
                "│‹      Farvardin 1403      ›│",
                "│ Sa  Su  Mo  Tu  We  Th  Fr │",
                "│ 26  27  28  29 [ 1]  2   3 │",
                "│  4   5   6   7   8   9  10 │",
                "│ 11  12  13  14  15  16  17 │",
                "│ 18  19  20  21  22  23  24 │",
                "│ 25  26  27  28  29  30  31 │",
                "│                            │",
                "│ Farvardin ▾      1403 ▾    │",
                "└────────────────────────────┘",
            ]
        );
    }

    #[test]
    fn render_selects_on_top() {
        let mut st = state(PickerMode::Date);
        st.settings.selects = SelectsPosition::Top;
        let buf = draw(&mut st);
        let lines = rows(&buf);
        assert_eq!(lines[2], "│ Farvardin ▾      1403 ▾    │");
        assert_eq!(lines[3], "│ Sa  Su  Mo  Tu  We  Th  Fr │");
        assert_eq!(lines[4], "│ 26  27  28  29 [ 1]  2   3 │");
    }

    #[test]
    fn render_right_to_left() {
        let mut st = state(PickerMode::Date);
        st.settings.locale = Locale::Fa;
        let buf = draw(&mut st);
        let lines = rows(&buf);
        // Saturday is the rightmost column and "previous" sits on the right
        assert!(lines[1].starts_with("│‹"));
        assert!(lines[1].ends_with("›│"));
        assert_eq!(lines[3], "│  3   2 [ 1] 29  28  27  26 │");
        assert_eq!(st.hits[0], (Rect::new(28, 1, 1, 1), Hit::Prev));
    }

    #[test]
    fn arrows_move_focus() {
        let mut st = state(PickerMode::Date);
        assert_eq!(st.handle_input(PickerInput::Right), PickerOutput::Ok);
        assert_eq!(st.handle_input(PickerInput::Down), PickerOutput::Ok);
        assert_eq!(st.nav.cursor(), CalendarDate::new(1403, 1, 9));
        assert_eq!(st.handle_input(PickerInput::Up), PickerOutput::Ok);
        assert_eq!(st.handle_input(PickerInput::Up), PickerOutput::Ok);
        assert_eq!(st.nav.cursor(), CalendarDate::new(1402, 12, 24));
        assert_eq!(st.nav.grid().month(), 12);
        st.settings.locale = Locale::Fa;
        assert_eq!(st.handle_input(PickerInput::Right), PickerOutput::Ok);
        assert_eq!(st.nav.cursor(), CalendarDate::new(1402, 12, 23));
    }

    #[test]
    fn select_commits_cursor() {
        let mut st = state(PickerMode::Date);
        st.handle_input(PickerInput::NextPage);
        assert_eq!(
            st.handle_input(PickerInput::Select),
            PickerOutput::Commit(Selection::Date(CalendarDate::new(1403, 2, 1)))
        );
        assert_eq!(st.handle_input(PickerInput::Cancel), PickerOutput::Close);
        assert_eq!(st.handle_input(PickerInput::GoTo), PickerOutput::GoTo);
    }

    #[test]
    fn month_dropdown_sets_month() {
        let mut st = state(PickerMode::Date);
        assert_eq!(st.handle_input(PickerInput::MonthList), PickerOutput::Ok);
        assert_eq!(st.handle_input(PickerInput::Up), PickerOutput::Invalid);
        assert_eq!(st.handle_input(PickerInput::Down), PickerOutput::Ok);
        assert_eq!(st.handle_input(PickerInput::Down), PickerOutput::Ok);
        assert_eq!(st.handle_input(PickerInput::Select), PickerOutput::Ok);
        assert!(st.dropdown.is_none());
        assert_eq!(st.nav.cursor(), CalendarDate::new(1403, 3, 1));
    }

    #[test]
    fn year_dropdown_sets_year() {
        let mut st = state(PickerMode::Date);
        st.handle_input(PickerInput::YearList);
        assert_eq!(
            st.dropdown.as_ref().and_then(Dropdown::chosen),
            Some(Choice::Year(1403))
        );
        st.handle_input(PickerInput::Up);
        st.handle_input(PickerInput::Select);
        assert_eq!(st.nav.cursor(), CalendarDate::new(1402, 1, 1));
    }

    #[test]
    fn year_dropdown_refuses_missing_years() {
        let mut st = state(PickerMode::Date);
        st.remember(&Selection::Year(3170));
        st.handle_input(PickerInput::YearList);
        for _ in 0..8 {
            assert_eq!(st.handle_input(PickerInput::Down), PickerOutput::Ok);
        }
        assert_eq!(st.handle_input(PickerInput::Select), PickerOutput::Invalid);
        assert!(st.dropdown.is_some());
        st.handle_input(PickerInput::Up);
        assert_eq!(st.handle_input(PickerInput::Select), PickerOutput::Ok);
        assert!(st.dropdown.is_none());
        assert_eq!(st.nav.cursor(), CalendarDate::new(3177, 1, 1));
    }

    #[test]
    fn escape_closes_dropdown_first() {
        let mut st = state(PickerMode::Date);
        st.handle_input(PickerInput::YearList);
        assert_eq!(st.handle_input(PickerInput::Cancel), PickerOutput::Ok);
        assert_eq!(st.handle_input(PickerInput::Cancel), PickerOutput::Close);
    }

    #[test]
    fn clicks() {
        let mut st = state(PickerMode::Date);
        draw(&mut st);
        assert_eq!(
            st.handle_input(PickerInput::Click { column: 6, row: 4 }),
            PickerOutput::Commit(Selection::Date(CalendarDate::new(1403, 1, 5)))
        );
        assert_eq!(
            st.handle_input(PickerInput::Click { column: 1, row: 1 }),
            PickerOutput::Ok
        );
        assert_eq!(st.nav.cursor(), CalendarDate::new(1402, 12, 1));
        draw(&mut st);
        assert_eq!(
            st.handle_input(PickerInput::Click { column: 20, row: 9 }),
            PickerOutput::Ok
        );
        assert!(st.dropdown.is_some());
        draw(&mut st);
        // The year list scrolls to show 1402 on its last row
        assert_eq!(
            st.handle_input(PickerInput::Click { column: 20, row: 3 }),
            PickerOutput::Ok
        );
        assert!(st.dropdown.is_none());
        assert_eq!(st.nav.cursor().year(), 1398);
    }
}
