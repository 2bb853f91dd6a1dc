use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Text,
    widgets::{Paragraph, Widget},
};

/// Draws into `area` of a buffer using coordinates relative to the area's
/// top-left corner, clipping at its edges
#[derive(Debug, Eq, PartialEq)]
pub(super) struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> Canvas<'a> {
    pub(super) fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    /// Returns the absolute region actually drawn on, which is empty if the
    /// position lies outside the area
    pub(super) fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) -> Rect {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style);
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // area, though we need to be sure that the Rect passed to the
            // Paragraph is entirely within the frame lest a panic result.
            let region = Rect {
                x: x + self.area.x,
                y: y + self.area.y,
                width: (self.area.width - x).min(width),
                height: 1,
            };
            Paragraph::new(text).render(region, self.buf);
            region
        } else {
            Rect::default()
        }
    }

    /// Like `mvprint()`, but with the text ending at column `right` (exclusive)
    pub(super) fn mvprint_before<S: AsRef<str>>(
        &mut self,
        y: u16,
        right: u16,
        s: S,
        style: Style,
    ) -> Rect {
        let width = str_width(s.as_ref());
        self.mvprint(y, right.saturating_sub(width), s, style)
    }

    /// Like `mvprint()`, but centred on the row
    pub(super) fn mvprint_centered<S: AsRef<str>>(&mut self, y: u16, s: S, style: Style) -> Rect {
        let width = str_width(s.as_ref());
        self.mvprint(y, self.area.width.saturating_sub(width) / 2, s, style)
    }
}

pub(super) fn str_width(s: &str) -> u16 {
    u16::try_from(Text::raw(s).width()).unwrap_or(u16::MAX)
}

/// Pads `s` to `width` columns, centred, with any odd column on the right
pub(super) fn centered(s: &str, width: u16) -> String {
    let pad = width.saturating_sub(str_width(s));
    let left = usize::from(pad / 2);
    let right = usize::from(pad - pad / 2);
    format!("{}{s}{}", " ".repeat(left), " ".repeat(right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_padding() {
        assert_eq!(centered("Sa", 4), " Sa ");
        assert_eq!(centered("Tir", 12), "    Tir     ");
        assert_eq!(centered("toolongforit", 4), "toolongforit");
    }

    #[test]
    fn mvprint_clips() {
        let area = Rect::new(2, 1, 6, 2);
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 4));
        let mut canvas = Canvas::new(area, &mut buf);
        let region = canvas.mvprint(0, 3, "abcdef", Style::new());
        assert_eq!(region, Rect::new(5, 1, 3, 1));
        assert_eq!(canvas.mvprint(2, 0, "x", Style::new()), Rect::default());
        let region = canvas.mvprint_before(1, 6, "yz", Style::new());
        assert_eq!(region, Rect::new(6, 2, 2, 1));
        assert_eq!(
            buf,
            Buffer::with_lines(["          ", "     abc  ", "      yz  ", "          "])
        );
    }
}
