use super::canvas::{centered, Canvas};
use super::{outcome, DayStyler, Hit, PickerInput, PickerOutput, PickerState};
use crate::calendar::CalendarProvider;
use crate::navigation::YEAR_BLOCK_STEP;
use crate::selection::Selection;
use crate::theme::{
    day::{FOCUS_STYLE, TODAY_STYLE},
    BASE_STYLE, DISABLED_STYLE, NAV_STYLE, TITLE_STYLE,
};
use ratatui::{buffer::Buffer, layout::Rect};

const COLUMNS: usize = 3;

const CELL_WIDTH: u16 = 12;

pub(super) const WIDTH: u16 = CELL_WIDTH * 3;

/// Header, then four rows of years with a blank line before each
pub(super) const HEIGHT: u16 = 9;

pub(super) fn render<C: CalendarProvider, S: DayStyler>(
    state: &mut PickerState<C, S>,
    area: Rect,
    buf: &mut Buffer,
) {
    let locale = state.settings.locale;
    let glyphs = &state.settings.glyphs;
    let mut canvas = Canvas::new(area, buf);
    let (prev, next) = if locale.is_rtl() {
        (
            canvas.mvprint_before(0, WIDTH, &glyphs.right, NAV_STYLE),
            canvas.mvprint(0, 0, &glyphs.left, NAV_STYLE),
        )
    } else {
        (
            canvas.mvprint(0, 0, &glyphs.left, NAV_STYLE),
            canvas.mvprint_before(0, WIDTH, &glyphs.right, NAV_STYLE),
        )
    };
    state.hits.push((prev, Hit::Prev));
    state.hits.push((next, Hit::Next));
    canvas.mvprint_centered(0, state.nav.year_block_title(locale), TITLE_STYLE);

    let this_year = state.nav.today().year();
    for (i, year) in state.nav.year_block().into_iter().enumerate() {
        let y = u16::try_from(i / COLUMNS).unwrap_or(0) * 2 + 2;
        let column = locale.column(i % COLUMNS, COLUMNS);
        let x = u16::try_from(column).unwrap_or(0) * CELL_WIDTH;
        let available = state.nav.has_year(year);
        let mut style = BASE_STYLE;
        if !available {
            style = style.patch(DISABLED_STYLE);
        }
        if year == this_year {
            style = style.patch(TODAY_STYLE);
        }
        if year == state.year_focus {
            style = style.patch(FOCUS_STYLE);
        }
        let region = canvas.mvprint(y, x, centered(&year.to_string(), CELL_WIDTH), style);
        if available {
            state.hits.push((region, Hit::Year(year)));
        }
    }
}

impl<C: CalendarProvider, S: DayStyler> PickerState<C, S> {
    pub(super) fn handle_year_input(&mut self, input: PickerInput) -> PickerOutput {
        let rtl = self.settings.locale.is_rtl();
        let columns = i32::try_from(COLUMNS).unwrap_or(1);
        match input {
            PickerInput::Left => self.move_year_focus(if rtl { 1 } else { -1 }),
            PickerInput::Right => self.move_year_focus(if rtl { -1 } else { 1 }),
            PickerInput::Up => self.move_year_focus(-columns),
            PickerInput::Down => self.move_year_focus(columns),
            PickerInput::PrevPage => {
                let r = self.nav.prev_year_block();
                if r.is_ok() {
                    self.year_focus -= YEAR_BLOCK_STEP;
                }
                outcome(r)
            }
            PickerInput::NextPage => {
                let r = self.nav.next_year_block();
                if r.is_ok() {
                    self.year_focus += YEAR_BLOCK_STEP;
                }
                outcome(r)
            }
            PickerInput::Select if self.nav.has_year(self.year_focus) => {
                PickerOutput::Commit(Selection::Year(self.year_focus))
            }
            PickerInput::Today => {
                let this_year = self.nav.today().year();
                let r = self.nav.set_year(this_year);
                if r.is_ok() {
                    self.year_focus = this_year;
                }
                outcome(r)
            }
            PickerInput::Cancel => PickerOutput::Close,
            _ => PickerOutput::Invalid,
        }
    }

    // Moving off either end of the block turns the page
    fn move_year_focus(&mut self, delta: i32) -> PickerOutput {
        let Some(target) = self
            .year_focus
            .checked_add(delta)
            .filter(|&y| self.nav.has_year(y))
        else {
            return PickerOutput::Invalid;
        };
        let block = self.nav.year_block();
        let r = match (block.first(), block.last()) {
            (Some(&first), _) if target < first => self.nav.prev_year_block(),
            (_, Some(&last)) if target > last => self.nav.next_year_block(),
            _ => Ok(()),
        };
        if r.is_ok() {
            self.year_focus = target;
        }
        outcome(r)
    }
}
