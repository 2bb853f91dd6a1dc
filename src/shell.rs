use crate::locale::ParseChoiceError;
use crate::theme::{BASE_STYLE, HINT_STYLE, LABEL_STYLE, PLACEHOLDER_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Margin, Rect},
    text::Line,
    widgets::{Block, Widget},
};
use std::str::FromStr;

/// Width of the field's input box, borders included
pub(crate) const INPUT_WIDTH: u16 = 30;

/// How the picker is presented when the field is opened
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum PickerType {
    /// Centred over a dimmed screen
    #[default]
    Dialog,
    /// Anchored to the input box
    Popper,
}

impl FromStr for PickerType {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<PickerType, ParseChoiceError> {
        match s.to_ascii_lowercase().as_str() {
            "dialog" | "modal" => Ok(PickerType::Dialog),
            "popper" | "popover" => Ok(PickerType::Popper),
            _ => Err(ParseChoiceError::new("picker type", s)),
        }
    }
}

/// Where the field's input box sits on the screen
pub(crate) fn input_area(screen: Rect) -> Rect {
    Rect {
        x: screen.x.saturating_add(2),
        y: screen.y.saturating_add(2),
        width: INPUT_WIDTH,
        height: 3,
    }
    .intersection(screen)
}

/// Where to draw a picker of the given outer size.  A popper goes below the
/// input box, or above it if there is no room below, and is kept on screen.
pub(crate) fn picker_area(
    kind: PickerType,
    screen: Rect,
    anchor: Rect,
    (width, height): (u16, u16),
    align_right: bool,
) -> Rect {
    let width = width.min(screen.width);
    let height = height.min(screen.height);
    let (x, y) = match kind {
        PickerType::Dialog => (
            screen.x + (screen.width - width) / 2,
            screen.y + (screen.height - height) / 2,
        ),
        PickerType::Popper => {
            let x = if align_right {
                anchor.right().saturating_sub(width)
            } else {
                anchor.x
            };
            let y = if anchor.bottom().saturating_add(height) <= screen.bottom() {
                anchor.bottom()
            } else if anchor.y.saturating_sub(screen.y) >= height {
                anchor.y - height
            } else {
                screen.bottom() - height
            };
            (x.clamp(screen.x, screen.right() - width), y)
        }
    };
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// The form field: a label above a bordered box holding the current value
/// (or the placeholder), with a line of key hints underneath
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Field<'a> {
    pub(crate) label: Option<&'a str>,
    pub(crate) placeholder: Option<&'a str>,
    pub(crate) value: Option<&'a str>,
    pub(crate) hint: &'a str,
    pub(crate) align_right: bool,
}

impl Widget for Field<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let input = input_area(area);
        if input.is_empty() {
            return;
        }
        let alignment = if self.align_right {
            Alignment::Right
        } else {
            Alignment::Left
        };
        if let Some(label) = self.label {
            let label_area = Rect {
                y: input.y.saturating_sub(1),
                height: 1,
                ..input
            };
            Line::styled(label, LABEL_STYLE)
                .alignment(alignment)
                .render(label_area.intersection(area), buf);
        }
        Block::bordered().style(BASE_STYLE).render(input, buf);
        let text = match (self.value, self.placeholder) {
            (Some(value), _) => Line::styled(value, BASE_STYLE),
            (None, Some(placeholder)) => Line::styled(placeholder, PLACEHOLDER_STYLE),
            (None, None) => Line::default(),
        };
        text.alignment(alignment)
            .render(input.inner(Margin::new(1, 1)), buf);
        let hint_area = Rect {
            x: input.x,
            y: input.bottom(),
            width: area.right().saturating_sub(input.x),
            height: 1,
        };
        Line::styled(self.hint, HINT_STYLE).render(hint_area.intersection(area), buf);
    }
}
