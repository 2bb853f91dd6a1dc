use crate::calendar::CalendarDate;
use std::fmt;

/// What the user picked, tagged by picker mode
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Selection {
    Date(CalendarDate),
    /// `index` is 1-based
    Month { index: u8, title: String },
    Year(i32),
}

impl Selection {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Selection::Date(_) => "date",
            Selection::Month { .. } => "month",
            Selection::Year(_) => "year",
        }
    }

    /// The line printed for the caller: `NAME=VALUE` if the field is named,
    /// otherwise just the value
    pub(crate) fn output_line(&self, name: Option<&str>) -> String {
        match name {
            Some(name) => format!("{name}={self}"),
            None => self.to_string(),
        }
    }
}

/// Dates as `YYYY/MM/DD`, months by title, years as plain integers
impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Date(date) => write!(f, "{date}"),
            Selection::Month { title, .. } => write!(f, "{title}"),
            Selection::Year(year) => write!(f, "{year}"),
        }
    }
}

/// Receives every committed selection
pub(crate) trait ChangeListener {
    fn on_change(&mut self, selection: &Selection);
}

/// Keeps the most recent selection for printing at exit
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct LatestSelection(Option<Selection>);

impl LatestSelection {
    pub(crate) fn into_inner(self) -> Option<Selection> {
        self.0
    }
}

impl ChangeListener for LatestSelection {
    fn on_change(&mut self, selection: &Selection) {
        log::info!("selected {} {selection}", selection.kind());
        self.0 = Some(selection.clone());
    }
}
