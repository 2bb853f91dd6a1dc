use std::str::FromStr;
use thiserror::Error;
use time::Weekday;

/// Language of the labels, which also decides the layout direction
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum Locale {
    /// Persian, laid out right-to-left
    #[default]
    Fa,
    /// English transliterations, left-to-right
    En,
}

impl Locale {
    pub(crate) fn is_rtl(self) -> bool {
        self == Locale::Fa
    }

    pub(crate) fn weekday_abbr(self, wd: Weekday) -> &'static str {
        match (self, wd) {
            (Locale::Fa, Weekday::Saturday) => "ش",
            (Locale::Fa, Weekday::Sunday) => "ی",
            (Locale::Fa, Weekday::Monday) => "د",
            (Locale::Fa, Weekday::Tuesday) => "س",
            (Locale::Fa, Weekday::Wednesday) => "چ",
            (Locale::Fa, Weekday::Thursday) => "پ",
            (Locale::Fa, Weekday::Friday) => "ج",
            (Locale::En, Weekday::Saturday) => "Sa",
            (Locale::En, Weekday::Sunday) => "Su",
            (Locale::En, Weekday::Monday) => "Mo",
            (Locale::En, Weekday::Tuesday) => "Tu",
            (Locale::En, Weekday::Wednesday) => "We",
            (Locale::En, Weekday::Thursday) => "Th",
            (Locale::En, Weekday::Friday) => "Fr",
        }
    }

    /// Caption of a page of the year picker
    pub(crate) fn year_block_title(self, first: i32, last: i32) -> String {
        match self {
            Locale::Fa => format!("از {first} تا {last}"),
            Locale::En => format!("{first} – {last}"),
        }
    }

    /// Visual column for the `index`-th of `width` logical columns
    pub(crate) fn column(self, index: usize, width: usize) -> usize {
        if self.is_rtl() {
            width.saturating_sub(index + 1)
        } else {
            index
        }
    }
}

impl FromStr for Locale {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Locale, ParseChoiceError> {
        match s.to_ascii_lowercase().as_str() {
            "fa" | "fa-ir" | "persian" => Ok(Locale::Fa),
            "en" | "en-us" | "english" => Ok(Locale::En),
            _ => Err(ParseChoiceError::new("locale", s)),
        }
    }
}

/// An option value that is not one of the accepted choices
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid {what}: {value:?}")]
pub(crate) struct ParseChoiceError {
    what: &'static str,
    value: String,
}

impl ParseChoiceError {
    pub(crate) fn new(what: &'static str, value: &str) -> ParseChoiceError {
        ParseChoiceError {
            what,
            value: value.to_owned(),
        }
    }
}
