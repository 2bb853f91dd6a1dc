use super::canvas::{centered, Canvas};
use super::{DayStyler, Hit, PickerInput, PickerOutput, PickerState};
use crate::calendar::{CalendarProvider, MONTHS_IN_YEAR};
use crate::theme::{
    day::{FOCUS_STYLE, TODAY_STYLE},
    BASE_STYLE,
};
use ratatui::{buffer::Buffer, layout::Rect};

const COLUMNS: u8 = 3;

const CELL_WIDTH: u16 = 12;

pub(super) const WIDTH: u16 = CELL_WIDTH * 3;

/// Four rows of months with a blank line between each
pub(super) const HEIGHT: u16 = 7;

pub(super) fn render<C: CalendarProvider, S: DayStyler>(
    state: &mut PickerState<C, S>,
    area: Rect,
    buf: &mut Buffer,
) {
    let locale = state.settings.locale;
    let today = state.nav.today().month();
    let mut canvas = Canvas::new(area, buf);
    for month in 1..=MONTHS_IN_YEAR {
        let index = month - 1;
        let y = u16::from(index / COLUMNS) * 2;
        let column = locale.column(usize::from(index % COLUMNS), usize::from(COLUMNS));
        let x = u16::try_from(column).unwrap_or(0) * CELL_WIDTH;
        let mut style = BASE_STYLE;
        if month == today {
            style = style.patch(TODAY_STYLE);
        }
        if month == state.month_focus {
            style = style.patch(FOCUS_STYLE);
        }
        let name = state.nav.provider().month_name(month, locale);
        let region = canvas.mvprint(y, x, centered(name, CELL_WIDTH), style);
        state.hits.push((region, Hit::Month(month)));
    }
}

impl<C: CalendarProvider, S: DayStyler> PickerState<C, S> {
    pub(super) fn handle_month_input(&mut self, input: PickerInput) -> PickerOutput {
        let rtl = self.settings.locale.is_rtl();
        let columns = i16::from(COLUMNS);
        let delta = match input {
            PickerInput::Left if rtl => 1,
            PickerInput::Left => -1,
            PickerInput::Right if rtl => -1,
            PickerInput::Right => 1,
            PickerInput::Up => -columns,
            PickerInput::Down => columns,
            PickerInput::Select => return self.commit_month(self.month_focus),
            PickerInput::Today => {
                self.month_focus = self.nav.today().month();
                return PickerOutput::Ok;
            }
            PickerInput::Cancel => return PickerOutput::Close,
            _ => return PickerOutput::Invalid,
        };
        match u8::try_from(i16::from(self.month_focus) + delta) {
            Ok(month) if (1..=MONTHS_IN_YEAR).contains(&month) => {
                self.month_focus = month;
                PickerOutput::Ok
            }
            _ => PickerOutput::Invalid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{rows, state};
    use super::super::{Picker, PickerMode};
    use super::*;
    use crate::locale::Locale;
    use crate::selection::Selection;
    use ratatui::{
        style::{Color, Modifier},
        widgets::StatefulWidget,
    };

    #[test]
    fn render_months() {
        let mut st = state(PickerMode::Month);
        st.month_focus = 5;
        let area = Rect::new(0, 0, 38, 9);
        let mut buf = Buffer::empty(area);
        Picker::new().render(area, &mut buf, &mut st);
        assert_eq!(
            rows(&buf),
            [
                "┌────────────────────────────────────┐",
                "│ Farvardin  Ordibehesht   Khordad   │",
                "│                                    │",
                "│    Tir        Mordad    Shahrivar  │",
                "│                                    │",
                "│    Mehr        Aban        Azar    │",
                "│                                    │",
                "│    Dey        Bahman      Esfand   │",
                "└────────────────────────────────────┘",
            ]
        );
        assert!(buf[(13, 3)].modifier.contains(Modifier::REVERSED));
        assert!(!buf[(25, 3)].modifier.contains(Modifier::REVERSED));
        assert_eq!(buf[(1, 1)].fg, Color::LightBlue);
    }

    #[test]
    fn right_to_left_mirrors_columns() {
        let mut st = state(PickerMode::Month);
        st.settings.locale = Locale::Fa;
        let area = Rect::new(0, 0, 38, 9);
        let mut buf = Buffer::empty(area);
        Picker::new().render(area, &mut buf, &mut st);
        assert_eq!(st.hits[0], (Rect::new(25, 1, 12, 1), Hit::Month(1)));
        assert_eq!(st.hits[2], (Rect::new(1, 1, 12, 1), Hit::Month(3)));
        // Left moves towards the end of the year
        assert_eq!(st.handle_input(PickerInput::Left), PickerOutput::Ok);
        assert_eq!(st.month_focus, 2);
    }

    #[test]
    fn focus_stays_inside_year() {
        let mut st = state(PickerMode::Month);
        assert_eq!(st.handle_input(PickerInput::Left), PickerOutput::Invalid);
        assert_eq!(st.handle_input(PickerInput::Up), PickerOutput::Invalid);
        for _ in 0..3 {
            assert_eq!(st.handle_input(PickerInput::Down), PickerOutput::Ok);
        }
        assert_eq!(st.month_focus, 10);
        assert_eq!(st.handle_input(PickerInput::Down), PickerOutput::Invalid);
        assert_eq!(st.handle_input(PickerInput::Right), PickerOutput::Ok);
        assert_eq!(st.handle_input(PickerInput::Today), PickerOutput::Ok);
        assert_eq!(st.month_focus, 1);
        assert_eq!(st.handle_input(PickerInput::PrevPage), PickerOutput::Invalid);
    }

    #[test]
    fn select_and_click_commit_titles() {
        let mut st = state(PickerMode::Month);
        st.handle_input(PickerInput::Right);
        assert_eq!(
            st.handle_input(PickerInput::Select),
            PickerOutput::Commit(Selection::Month {
                index: 2,
                title: String::from("Ordibehesht")
            })
        );
        let area = Rect::new(0, 0, 38, 9);
        let mut buf = Buffer::empty(area);
        Picker::new().render(area, &mut buf, &mut st);
        assert_eq!(
            st.handle_input(PickerInput::Click { column: 30, row: 7 }),
            PickerOutput::Commit(Selection::Month {
                index: 12,
                title: String::from("Esfand")
            })
        );
        assert_eq!(
            st.handle_input(PickerInput::Click { column: 30, row: 6 }),
            PickerOutput::Ok
        );
    }
}
