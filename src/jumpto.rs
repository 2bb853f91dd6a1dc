use crate::calendar::{CalendarDate, MONTHS_IN_YEAR};
use crate::theme::{
    jumpto::{READY_ENTER_STYLE, UNFILLED_CELL_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};

const OUTER_WIDTH: u16 = 17;
const OUTER_HEIGHT: u16 = 8;
const ENTER_POS: usize = 8;
const LONGEST_MONTH: u8 = 31;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct JumpTo;

impl StatefulWidget for JumpTo {
    type State = JumpToState;

    /*
     * .................
     * .┌── Go To… ───┐.
     * .│             │.
     * .│ YYYY/MM/DD  │.
     * .│             │.
     * .│   [ENTER]   │.
     * .└─────────────┘.
     * .................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(" Go To… ")
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        state.to_text().render(text_area, buf);
    }
}

/// Entry of a `YYYY/MM/DD` date, one digit at a time
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct JumpToState {
    year: [Option<u8>; 4],
    month: [Option<u8>; 2],
    day: [Option<u8>; 2],
    pos: usize,
}

impl JumpToState {
    pub(crate) fn new() -> JumpToState {
        JumpToState::default()
    }

    fn to_text(self) -> Text<'static> {
        Text::from_iter([
            Line::styled("", BASE_STYLE),
            self.to_line(),
            Line::styled("", BASE_STYLE),
            // Style a span and convert it to a line rather than creating a
            // styled line directly so that only the "[ENTER]" text and not any
            // of its centering padding will be underlined:
            Line::from(Span::styled(
                "[ENTER]",
                if self.pos == ENTER_POS {
                    READY_ENTER_STYLE
                } else {
                    BASE_STYLE
                },
            )),
        ])
        .centered()
    }

    fn to_line(self) -> Line<'static> {
        let mut spans = Vec::new();
        let mut first = true;
        for (fallback, digits) in [
            ("Y", self.year.as_slice()),
            ("M", self.month.as_slice()),
            ("D", self.day.as_slice()),
        ] {
            if !std::mem::replace(&mut first, false) {
                spans.push(Span::styled("/", BASE_STYLE));
            }
            for dg in digits {
                spans.push(match dg {
                    Some(d) => Span::styled(format!("{d}"), BASE_STYLE),
                    None => Span::styled(fallback, UNFILLED_CELL_STYLE),
                });
            }
        }
        Line::from_iter(spans)
    }

    fn slot(&mut self, pos: usize) -> Option<&mut Option<u8>> {
        match pos {
            0..4 => self.year.get_mut(pos),
            4..6 => self.month.get_mut(pos - 4),
            6..8 => self.day.get_mut(pos - 6),
            _ => None,
        }
    }

    pub(crate) fn handle_input(&mut self, input: JumpToInput) -> JumpToOutput {
        match (input, self.pos) {
            (JumpToInput::Digit(d), 0..ENTER_POS) if d < 10 => {
                if let Some(slot) = self.slot(self.pos) {
                    *slot = Some(d);
                }
                self.pos += 1;
                JumpToOutput::Ok
            }
            (JumpToInput::Backspace, 1..) => {
                self.pos -= 1;
                if let Some(slot) = self.slot(self.pos) {
                    *slot = None;
                }
                JumpToOutput::Ok
            }
            (JumpToInput::Enter, ENTER_POS) => {
                let (Some(year), Some(month), Some(day)) = (
                    number(&self.year),
                    number(&self.month),
                    number(&self.day),
                ) else {
                    return JumpToOutput::Invalid;
                };
                let (Ok(year), Ok(month), Ok(day)) =
                    (i32::try_from(year), u8::try_from(month), u8::try_from(day))
                else {
                    return JumpToOutput::Invalid;
                };
                if (1..=MONTHS_IN_YEAR).contains(&month) && (1..=LONGEST_MONTH).contains(&day) {
                    JumpToOutput::Jump(CalendarDate::new(year, month, day))
                } else {
                    JumpToOutput::Invalid
                }
            }
            _ => JumpToOutput::Invalid,
        }
    }
}

fn number(digits: &[Option<u8>]) -> Option<u32> {
    digits
        .iter()
        .try_fold(0u32, |acc, &d| Some(acc * 10 + u32::from(d?)))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum JumpToInput {
    Digit(u8),
    Backspace,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum JumpToOutput {
    Ok,
    Invalid,
    Jump(CalendarDate),
}
