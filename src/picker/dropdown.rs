use super::Hit;
use crate::theme::{day::FOCUS_STYLE, BASE_STYLE, DISABLED_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::{Margin, Rect},
    widgets::{Block, Clear, List, ListItem, ListState, StatefulWidget, Widget},
};

/// What picking an entry of a dropdown sets
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Choice {
    Month(u8),
    Year(i32),
}

/// The month or year selector list of the date picker
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(super) struct Dropdown {
    entries: Vec<(String, Choice)>,
    /// Parallel to `entries`; missing means enabled
    disabled: Vec<bool>,
    list: ListState,
}

impl Dropdown {
    pub(super) fn new(entries: Vec<(String, Choice)>, current: Choice) -> Dropdown {
        let selected = entries.iter().position(|&(_, c)| c == current);
        Dropdown {
            entries,
            disabled: Vec::new(),
            list: ListState::default().with_selected(selected.or(Some(0))),
        }
    }

    /// Grey out the entries for which `func` returns `true`.  They can still
    /// be scrolled past but not chosen.
    pub(super) fn disable<F: Fn(Choice) -> bool>(mut self, func: F) -> Dropdown {
        self.disabled = self.entries.iter().map(|&(_, c)| func(c)).collect();
        self
    }

    fn is_enabled(&self, index: usize) -> bool {
        !self.disabled.get(index).copied().unwrap_or(false)
    }

    pub(super) fn previous(&mut self) -> bool {
        match self.list.selected() {
            Some(i) if i > 0 => {
                self.list.select(Some(i - 1));
                true
            }
            _ => false,
        }
    }

    pub(super) fn next(&mut self) -> bool {
        match self.list.selected() {
            Some(i) if i + 1 < self.entries.len() => {
                self.list.select(Some(i + 1));
                true
            }
            _ => false,
        }
    }

    pub(super) fn chosen(&self) -> Option<Choice> {
        self.list
            .selected()
            .filter(|&i| self.is_enabled(i))
            .and_then(|i| self.choice_at(i))
    }

    pub(super) fn choice_at(&self, index: usize) -> Option<Choice> {
        self.entries.get(index).map(|&(_, c)| c)
    }

    pub(super) fn render(&mut self, area: Rect, buf: &mut Buffer, hits: &mut Vec<(Rect, Hit)>) {
        Clear.render(area, buf);
        let items = self.entries.iter().enumerate().map(|(i, (label, _))| {
            let item = ListItem::new(label.as_str());
            if self.is_enabled(i) {
                item
            } else {
                item.style(DISABLED_STYLE)
            }
        });
        let list = List::new(items)
            .block(Block::bordered())
            .style(BASE_STYLE)
            .highlight_style(FOCUS_STYLE)
            .highlight_symbol("» ");
        StatefulWidget::render(list, area, buf, &mut self.list);
        let inner = area.inner(Margin::new(1, 1));
        let offset = self.list.offset();
        for (row, index) in (0..inner.height).zip(offset..self.entries.len()) {
            if !self.is_enabled(index) {
                continue;
            }
            hits.push((
                Rect {
                    x: inner.x,
                    y: inner.y + row,
                    width: inner.width,
                    height: 1,
                },
                Hit::DropdownItem(index),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Modifier;

    fn years() -> Dropdown {
        Dropdown::new(
            (1400..1410)
                .map(|y| (y.to_string(), Choice::Year(y)))
                .collect(),
            Choice::Year(1403),
        )
    }

    #[test]
    fn starts_on_current() {
        assert_eq!(years().chosen(), Some(Choice::Year(1403)));
    }

    #[test]
    fn stops_at_ends() {
        let mut dd = years();
        for _ in 0..6 {
            assert!(dd.next());
        }
        assert!(!dd.next());
        assert_eq!(dd.chosen(), Some(Choice::Year(1409)));
        for _ in 0..9 {
            assert!(dd.previous());
        }
        assert!(!dd.previous());
        assert_eq!(dd.chosen(), Some(Choice::Year(1400)));
    }

    #[test]
    fn disabled_entries_cannot_be_chosen() {
        let mut dd = years().disable(|c| matches!(c, Choice::Year(y) if y >= 1408));
        for _ in 0..5 {
            dd.next();
        }
        assert_eq!(dd.chosen(), None);
        dd.previous();
        assert_eq!(dd.chosen(), Some(Choice::Year(1407)));
        dd.next();
        let area = Rect::new(0, 0, 12, 5);
        let mut buf = Buffer::empty(area);
        let mut hits = Vec::new();
        dd.render(area, &mut buf, &mut hits);
        assert_eq!(
            hits,
            [
                (Rect::new(1, 1, 10, 1), Hit::DropdownItem(6)),
                (Rect::new(1, 2, 10, 1), Hit::DropdownItem(7)),
            ]
        );
        assert!(buf[(3, 3)].modifier.contains(Modifier::DIM));
        assert!(!buf[(3, 2)].modifier.contains(Modifier::DIM));
    }

    #[test]
    fn render_scrolls_to_selection() {
        let mut dd = years();
        for _ in 0..5 {
            dd.next();
        }
        let area = Rect::new(0, 0, 12, 5);
        let mut buf = Buffer::empty(area);
        let mut hits = Vec::new();
        dd.render(area, &mut buf, &mut hits);
        assert_eq!(hits.len(), 3);
        let last = hits[2];
        assert_eq!(last, (Rect::new(1, 3, 10, 1), Hit::DropdownItem(8)));
        assert_eq!(dd.choice_at(8), Some(Choice::Year(1408)));
    }
}
