use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const LABEL_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const PLACEHOLDER_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const HINT_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const NAV_STYLE: Style = BASE_STYLE.fg(Color::LightCyan);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const SELECT_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);

/// Years the calendar cannot represent
pub(crate) const DISABLED_STYLE: Style = Style::new()
    .fg(Color::DarkGray)
    .add_modifier(Modifier::DIM);

/// Laid over the form while a dialog picker is open
pub(crate) const BACKDROP_STYLE: Style = Style::new().add_modifier(Modifier::DIM);

pub(crate) mod day {
    use super::*;

    pub(crate) const OUTSIDE_MONTH_STYLE: Style = Style::new().add_modifier(Modifier::DIM);

    pub(crate) const TODAY_STYLE: Style = Style::new().fg(Color::LightBlue);

    pub(crate) const HOLIDAY_STYLE: Style = Style::new().fg(Color::LightRed);

    pub(crate) const FOCUS_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
}

pub(crate) mod jumpto {
    use super::*;

    pub(crate) const UNFILLED_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const READY_ENTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}
