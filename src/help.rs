use ratatui::{
    buffer::Buffer,
    layout::Flex,
    layout::{Alignment, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

static TEXT: &[&str] = &[
    "ENTER, SPACE    Open the picker / select\n",
    "ARROWS          Move the focus\n",
    "<, PAGE UP      Previous month or years\n",
    ">, PAGE DOWN    Next month or years\n",
    "m               Month list\n",
    "y               Year list\n",
    "t, HOME         Jump to today\n",
    "g               Input date to go to\n",
    "?               Show this help\n",
    "ESC             Close the picker\n",
    "q               Quit\n",
    "\n",
    "Press the Any Key to dismiss.\n",
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = TEXT.iter().map(|&s| Line::raw(s)).collect::<Vec<_>>();
        let text = Text::from(lines);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .min(area.height)
            .saturating_add(2);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(area.width)
            .saturating_add(2);
        let para = Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center),
            )
            .style(self.0);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        let outer_area = Rect {
            x: help_area.x.saturating_sub(1),
            y: help_area.y,
            width: help_area.width.saturating_add(2),
            height: help_area.height,
        }
        .intersection(area);
        Clear.render(outer_area, buf);
        Block::new().style(self.0).render(outer_area, buf);
        para.render(help_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::BASE_STYLE;

    #[test]
    fn help_box_is_centred() {
        let area = Rect::new(0, 0, 60, 21);
        let mut buf = Buffer::empty(area);
        Help(BASE_STYLE).render(area, &mut buf);
        let row = |y: u16| {
            (0..60)
                .map(|x| buf[(x, y)].symbol().to_owned())
                .collect::<String>()
        };
        assert_eq!(
            row(3),
            "         ┌─────────────── Commands ───────────────┐         "
        );
        assert_eq!(
            row(4),
            "         │ENTER, SPACE    Open the picker / select│         "
        );
        assert_eq!(
            row(17),
            "         └────────────────────────────────────────┘         "
        );
        assert_eq!(buf[(8, 10)].bg, BASE_STYLE.bg.unwrap_or_default());
    }
}
