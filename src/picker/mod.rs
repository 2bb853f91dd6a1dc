mod canvas;
mod date;
mod dropdown;
mod month;
mod year;
use self::dropdown::{Choice, Dropdown};
use crate::calendar::{CalendarDate, CalendarError, CalendarProvider, YearSpan};
use crate::locale::{Locale, ParseChoiceError};
use crate::navigation::Navigator;
use crate::selection::Selection;
use crate::theme::{day::HOLIDAY_STYLE, BASE_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::{Margin, Position, Rect},
    style::Style,
    widgets::{Block, Clear, StatefulWidget, Widget},
};
use std::marker::PhantomData;
use std::str::FromStr;
use time::Weekday;

/// Per-day style hook for the date grid
pub(crate) trait DayStyler {
    fn day_style(&self, date: CalendarDate, weekday: Weekday) -> Style;
}

impl<T: DayStyler + ?Sized> DayStyler for &T {
    fn day_style(&self, date: CalendarDate, weekday: Weekday) -> Style {
        (**self).day_style(date, weekday)
    }
}

/// Highlights the weekly day off
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Weekend(pub(crate) Weekday);

impl DayStyler for Weekend {
    fn day_style(&self, _date: CalendarDate, weekday: Weekday) -> Style {
        if weekday == self.0 {
            HOLIDAY_STYLE
        } else {
            Style::new()
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum PickerMode {
    #[default]
    Date,
    Month,
    Year,
}

impl FromStr for PickerMode {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<PickerMode, ParseChoiceError> {
        match s.to_ascii_lowercase().as_str() {
            "date" | "datepicker" => Ok(PickerMode::Date),
            "month" | "monthpicker" => Ok(PickerMode::Month),
            "year" | "yearpicker" => Ok(PickerMode::Year),
            _ => Err(ParseChoiceError::new("picker mode", s)),
        }
    }
}

/// Where the month & year selectors go relative to the date grid
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum SelectsPosition {
    Top,
    #[default]
    Bottom,
}

impl FromStr for SelectsPosition {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<SelectsPosition, ParseChoiceError> {
        match s.to_ascii_lowercase().as_str() {
            "top" => Ok(SelectsPosition::Top),
            "bottom" => Ok(SelectsPosition::Bottom),
            _ => Err(ParseChoiceError::new("selects position", s)),
        }
    }
}

/// Navigation arrows.  In right-to-left layouts "previous" is drawn on the
/// right using `right`, and "next" on the left using `left`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Glyphs {
    pub(crate) left: String,
    pub(crate) right: String,
}

impl Default for Glyphs {
    fn default() -> Glyphs {
        Glyphs {
            left: String::from("‹"),
            right: String::from("›"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct PickerSettings {
    pub(crate) mode: PickerMode,
    pub(crate) selects: SelectsPosition,
    pub(crate) year_span: YearSpan,
    pub(crate) locale: Locale,
    pub(crate) glyphs: Glyphs,
}

impl Default for PickerSettings {
    fn default() -> PickerSettings {
        PickerSettings {
            mode: PickerMode::Date,
            selects: SelectsPosition::Bottom,
            year_span: YearSpan::DROPDOWN,
            locale: Locale::Fa,
            glyphs: Glyphs::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PickerInput {
    Left,
    Right,
    Up,
    Down,
    PrevPage,
    NextPage,
    Select,
    Today,
    MonthList,
    YearList,
    GoTo,
    Cancel,
    Click { column: u16, row: u16 },
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum PickerOutput {
    Ok,
    Invalid,
    Close,
    Commit(Selection),
    GoTo,
}

/// Clickable regions recorded while rendering
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Hit {
    Prev,
    Next,
    Day(CalendarDate),
    MonthList,
    YearList,
    Month(u8),
    Year(i32),
    DropdownItem(usize),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct PickerState<C, S> {
    nav: Navigator<C>,
    styler: S,
    settings: PickerSettings,
    /// 1-based month under the keyboard focus in the month picker
    month_focus: u8,
    /// Year under the keyboard focus in the year picker; always within the
    /// displayed block
    year_focus: i32,
    dropdown: Option<Dropdown>,
    hits: Vec<(Rect, Hit)>,
    area: Option<Rect>,
}

impl<C: CalendarProvider, S: DayStyler> PickerState<C, S> {
    pub(crate) fn new(nav: Navigator<C>, styler: S, settings: PickerSettings) -> Self {
        let cursor = nav.cursor();
        PickerState {
            nav,
            styler,
            settings,
            month_focus: cursor.month(),
            year_focus: cursor.year(),
            dropdown: None,
            hits: Vec::new(),
            area: None,
        }
    }

    pub(crate) fn mode(&self) -> PickerMode {
        self.settings.mode
    }

    pub(crate) fn locale(&self) -> Locale {
        self.settings.locale
    }

    /// Outer size, borders included
    pub(crate) fn size(&self) -> (u16, u16) {
        let (width, height) = match self.settings.mode {
            PickerMode::Date => (date::WIDTH, date::HEIGHT),
            PickerMode::Month => (month::WIDTH, month::HEIGHT),
            PickerMode::Year => (year::WIDTH, year::HEIGHT),
        };
        (width + 2, height + 2)
    }

    pub(crate) fn jump_to(&mut self, date: CalendarDate) -> Result<(), CalendarError> {
        self.nav.jump_to(date)
    }

    /// Forget per-opening state such as an open dropdown
    pub(crate) fn reset(&mut self) {
        self.dropdown = None;
        self.area = None;
        self.hits.clear();
    }

    /// Move the display to a committed selection so that reopening the
    /// picker shows it
    pub(crate) fn remember(&mut self, selection: &Selection) {
        let r = match *selection {
            Selection::Date(date) => self.nav.jump_to(date),
            Selection::Month { index, .. } => {
                self.month_focus = index;
                self.nav.set_month(index)
            }
            Selection::Year(year) => {
                self.year_focus = year;
                self.nav.set_year(year)
            }
        };
        if let Err(e) = r {
            log::warn!("could not move to selection {selection}: {e}");
        }
    }

    pub(crate) fn handle_input(&mut self, input: PickerInput) -> PickerOutput {
        if let PickerInput::Click { column, row } = input {
            return self.handle_click(Position::new(column, row));
        }
        match self.settings.mode {
            PickerMode::Date => self.handle_date_input(input),
            PickerMode::Month => self.handle_month_input(input),
            PickerMode::Year => self.handle_year_input(input),
        }
    }

    fn handle_click(&mut self, pos: Position) -> PickerOutput {
        if !self.area.is_some_and(|area| area.contains(pos)) {
            log::debug!("click outside the picker at {pos}");
            return PickerOutput::Close;
        }
        let hit = self
            .hits
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(pos))
            .map(|&(_, hit)| hit);
        if self.dropdown.is_some() && !matches!(hit, Some(Hit::DropdownItem(_))) {
            self.dropdown = None;
            return PickerOutput::Ok;
        }
        match hit {
            Some(Hit::Prev) => self.handle_input(PickerInput::PrevPage),
            Some(Hit::Next) => self.handle_input(PickerInput::NextPage),
            Some(Hit::Day(date)) => PickerOutput::Commit(Selection::Date(date)),
            Some(Hit::MonthList) => self.handle_input(PickerInput::MonthList),
            Some(Hit::YearList) => self.handle_input(PickerInput::YearList),
            Some(Hit::Month(month)) => self.commit_month(month),
            Some(Hit::Year(year)) => PickerOutput::Commit(Selection::Year(year)),
            Some(Hit::DropdownItem(index)) => {
                let choice = self.dropdown.as_ref().and_then(|dd| dd.choice_at(index));
                self.apply_choice(choice)
            }
            None => PickerOutput::Ok,
        }
    }

    fn commit_month(&self, month: u8) -> PickerOutput {
        let title = self
            .nav
            .provider()
            .month_name(month, self.settings.locale)
            .to_owned();
        PickerOutput::Commit(Selection::Month {
            index: month,
            title,
        })
    }

    fn apply_choice(&mut self, choice: Option<Choice>) -> PickerOutput {
        let Some(choice) = choice else {
            return PickerOutput::Invalid;
        };
        self.dropdown = None;
        let r = match choice {
            Choice::Month(month) => self.nav.set_month(month),
            Choice::Year(year) => self.nav.set_year(year),
        };
        outcome(r)
    }
}

fn outcome(r: Result<(), CalendarError>) -> PickerOutput {
    match r {
        Ok(()) => PickerOutput::Ok,
        Err(e) => {
            log::warn!("{e}");
            PickerOutput::Invalid
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Picker<C, S> {
    _data: PhantomData<(C, S)>,
}

impl<C, S> Picker<C, S> {
    pub(crate) fn new() -> Picker<C, S> {
        Picker { _data: PhantomData }
    }
}

impl<C: CalendarProvider, S: DayStyler> StatefulWidget for Picker<C, S> {
    type State = PickerState<C, S>;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        Clear.render(area, buf);
        Block::bordered().style(BASE_STYLE).render(area, buf);
        state.area = Some(area);
        state.hits.clear();
        let inner = area.inner(Margin::new(1, 1));
        match state.settings.mode {
            PickerMode::Date => date::render(state, inner, buf),
            PickerMode::Month => month::render(state, inner, buf),
            PickerMode::Year => year::render(state, inner, buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Jalali;

    pub(super) fn state(mode: PickerMode) -> PickerState<Jalali, Weekend> {
        let nav = Navigator::new(Jalali, CalendarDate::new(1403, 1, 1)).unwrap();
        PickerState::new(
            nav,
            Weekend(Weekday::Friday),
            PickerSettings {
                mode,
                locale: Locale::En,
                ..PickerSettings::default()
            },
        )
    }

    /// Each row of the buffer as a string
    pub(super) fn rows(buf: &Buffer) -> Vec<String> {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .filter_map(|x| buf.cell(Position::new(x, y)))
                    .map(|cell| cell.symbol())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn parse_choices() {
        assert_eq!("datePicker".parse::<PickerMode>(), Ok(PickerMode::Date));
        assert_eq!("year".parse::<PickerMode>(), Ok(PickerMode::Year));
        assert!("week".parse::<PickerMode>().is_err());
        assert_eq!("TOP".parse::<SelectsPosition>(), Ok(SelectsPosition::Top));
        assert!("left".parse::<SelectsPosition>().is_err());
    }

    #[test]
    fn weekend_styler() {
        let w = Weekend(Weekday::Friday);
        let d = CalendarDate::new(1403, 1, 3);
        assert_eq!(w.day_style(d, Weekday::Friday), HOLIDAY_STYLE);
        assert_eq!(w.day_style(d, Weekday::Saturday), Style::new());
    }

    #[test]
    fn sizes() {
        assert_eq!(state(PickerMode::Date).size(), (30, 11));
        assert_eq!(state(PickerMode::Month).size(), (38, 9));
        assert_eq!(state(PickerMode::Year).size(), (38, 11));
    }

    #[test]
    fn click_outside_closes() {
        let mut st = state(PickerMode::Month);
        let area = Rect::new(5, 5, 38, 9);
        let mut buf = Buffer::empty(Rect::new(0, 0, 50, 20));
        Picker::new().render(area, &mut buf, &mut st);
        assert_eq!(
            st.handle_input(PickerInput::Click { column: 1, row: 1 }),
            PickerOutput::Close
        );
        assert_eq!(
            st.handle_input(PickerInput::Click { column: 5, row: 5 }),
            PickerOutput::Ok
        );
    }

    #[test]
    fn click_before_render_closes() {
        let mut st = state(PickerMode::Date);
        assert_eq!(
            st.handle_input(PickerInput::Click { column: 0, row: 0 }),
            PickerOutput::Close
        );
    }

    #[test]
    fn remember_selection() {
        let mut st = state(PickerMode::Date);
        st.remember(&Selection::Date(CalendarDate::new(1399, 12, 30)));
        assert_eq!(st.nav.cursor(), CalendarDate::new(1399, 12, 30));
        st.remember(&Selection::Month {
            index: 7,
            title: String::from("Mehr"),
        });
        assert_eq!(st.nav.cursor(), CalendarDate::new(1399, 7, 30));
        st.remember(&Selection::Year(1402));
        assert_eq!(st.nav.cursor(), CalendarDate::new(1402, 7, 30));
    }
}
