mod app;
mod calendar;
mod help;
mod jumpto;
mod locale;
mod navigation;
mod picker;
mod selection;
mod shell;
mod theme;
use crate::app::{App, FieldOptions};
use crate::calendar::{CalendarDate, CalendarProvider, Gregorian, Jalali, YearSpan};
use crate::locale::{Locale, ParseChoiceError};
use crate::navigation::Navigator;
use crate::picker::{Glyphs, PickerMode, PickerSettings, PickerState, SelectsPosition, Weekend};
use crate::selection::{LatestSelection, Selection};
use crate::shell::PickerType;
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use time::{
    format_description::FormatItem, macros::format_description, Date, OffsetDateTime, Weekday,
};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

const DEFAULT_LOG_LEVEL: &str = "info";

/// Which date engine drives the picker
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
enum CalendarKind {
    #[default]
    Jalali,
    Gregorian,
}

impl FromStr for CalendarKind {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<CalendarKind, ParseChoiceError> {
        match s.to_ascii_lowercase().as_str() {
            "jalali" | "persian" | "shamsi" => Ok(CalendarKind::Jalali),
            "gregorian" => Ok(CalendarKind::Gregorian),
            _ => Err(ParseChoiceError::new("calendar", s)),
        }
    }
}

/// Preset ranges of years offered by the date picker's year list
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct YearSpanArg(YearSpan);

impl FromStr for YearSpanArg {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<YearSpanArg, ParseChoiceError> {
        match s.to_ascii_lowercase().as_str() {
            "wide" => Ok(YearSpanArg(YearSpan::DROPDOWN)),
            "legacy" => Ok(YearSpanArg(YearSpan::LEGACY_DROPDOWN)),
            _ => Err(ParseChoiceError::new("year span", s)),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct PickerOptions {
    label: Option<String>,
    placeholder: Option<String>,
    name: Option<String>,
    picker_type: PickerType,
    mode: PickerMode,
    selects: SelectsPosition,
    value: Option<String>,
    calendar: CalendarKind,
    locale: Locale,
    glyphs: Glyphs,
    year_span: Option<YearSpan>,
    today: Option<Date>,
    log_file: Option<PathBuf>,
    once: bool,
}

impl PickerOptions {
    fn run(&self) -> anyhow::Result<Option<Selection>> {
        let today = match self.today {
            Some(d) => d,
            None => OffsetDateTime::now_local()
                .context("failed to determine local date")?
                .date(),
        };
        match self.calendar {
            CalendarKind::Jalali => self.run_with(Jalali, Weekend(Weekday::Friday), today),
            CalendarKind::Gregorian => self.run_with(Gregorian, Weekend(Weekday::Sunday), today),
        }
    }

    fn run_with<C: CalendarProvider>(
        &self,
        provider: C,
        styler: Weekend,
        today: Date,
    ) -> anyhow::Result<Option<Selection>> {
        let today = provider
            .from_gregorian(today)
            .with_context(|| format!("{today} is outside the supported range of years"))?;
        let mut nav = Navigator::new(provider, today)?;
        if let (PickerMode::Date, Some(value)) = (self.mode, self.value.as_deref()) {
            match value.parse::<CalendarDate>() {
                Ok(date) => {
                    if let Err(e) = nav.jump_to(date) {
                        log::warn!("ignoring initial value {value:?}: {e}");
                    }
                }
                Err(e) => log::warn!("ignoring initial value {value:?}: {e}"),
            }
        }
        let settings = PickerSettings {
            mode: self.mode,
            selects: self.selects,
            year_span: self.year_span.unwrap_or(YearSpan::DROPDOWN),
            locale: self.locale,
            glyphs: self.glyphs.clone(),
        };
        let picker = PickerState::new(nav, styler, settings);
        let field = FieldOptions {
            label: self.label.clone(),
            placeholder: self.placeholder.clone().or_else(|| self.label.clone()),
            picker_type: self.picker_type,
        };
        let app = App::new(picker, field, LatestSelection::default())
            .value(self.value.clone())
            .once(self.once);
        let latest = with_terminal(|terminal| Ok(app.run(terminal)?))?;
        Ok(latest.into_inner())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(PickerOptions),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = PickerOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('l') | Arg::Long("label") => {
                    opts.label = Some(parser.value()?.string()?);
                }
                Arg::Short('p') | Arg::Long("placeholder") => {
                    opts.placeholder = Some(parser.value()?.string()?);
                }
                Arg::Short('n') | Arg::Long("name") => {
                    opts.name = Some(parser.value()?.string()?);
                }
                Arg::Short('t') | Arg::Long("type") => {
                    opts.picker_type = parser.value()?.parse()?;
                }
                Arg::Short('m') | Arg::Long("mode") => opts.mode = parser.value()?.parse()?,
                Arg::Short('s') | Arg::Long("selects") => {
                    opts.selects = parser.value()?.parse()?;
                }
                Arg::Long("value") => opts.value = Some(parser.value()?.string()?),
                Arg::Long("calendar") => opts.calendar = parser.value()?.parse()?,
                Arg::Long("locale") => opts.locale = parser.value()?.parse()?,
                Arg::Long("left-icon") => opts.glyphs.left = parser.value()?.string()?,
                Arg::Long("right-icon") => opts.glyphs.right = parser.value()?.string()?,
                Arg::Long("year-span") => {
                    opts.year_span = Some(parser.value()?.parse::<YearSpanArg>()?.0);
                }
                Arg::Long("today") => {
                    let value = parser.value()?.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => opts.today = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                Arg::Long("log-file") => opts.log_file = Some(parser.value()?.into()),
                Arg::Long("once") => opts.once = true,
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<ExitCode> {
        match self {
            Command::Run(opts) => {
                let _logger = opts.log_file.as_deref().map(init_logging).transpose()?;
                match opts.run()? {
                    Some(selection) => {
                        println!("{}", selection.output_line(opts.name.as_deref()));
                        Ok(ExitCode::SUCCESS)
                    }
                    None => Ok(ExitCode::FAILURE),
                }
            }
            Command::Help => {
                println!("Usage: jdpicker [OPTIONS]");
                println!();
                println!("Terminal Jalali (solar Hijri) date, month & year picker");
                println!();
                println!("Options:");
                println!("  -l, --label <TEXT>          Label shown above the input");
                println!("  -p, --placeholder <TEXT>    Text shown while nothing is selected");
                println!("  -n, --name <NAME>           Print the selection as NAME=VALUE");
                println!("  -t, --type dialog|popper    How the picker is presented [default: dialog]");
                println!("  -m, --mode date|month|year  What is picked [default: date]");
                println!("  -s, --selects top|bottom    Month & year selectors' position [default: bottom]");
                println!("      --value <TEXT>          Initial value");
                println!("      --calendar jalali|gregorian");
                println!("                              Calendar system [default: jalali]");
                println!("      --locale fa|en          Language & direction of labels [default: fa]");
                println!("      --left-icon <GLYPH>     Left navigation glyph [default: ‹]");
                println!("      --right-icon <GLYPH>    Right navigation glyph [default: ›]");
                println!("      --year-span wide|legacy");
                println!("                              Years offered by the year list [default: wide]");
                println!("      --today <YYYY-MM-DD>    Use the given Gregorian date as today");
                println!("      --log-file <PATH>       Write logs to the given file");
                println!("      --once                  Exit after the first selection");
                println!("  -h, --help                  Display this help message and exit");
                println!("  -V, --version               Show the program version and exit");
                Ok(ExitCode::SUCCESS)
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    Command::from_parser(Parser::from_env())?.run()
}

fn init_logging(path: &Path) -> anyhow::Result<LoggerHandle> {
    Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?
        .log_to_file(FileSpec::try_from(path)?)
        .start()
        .context("failed to start logger")
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = MouseCapture::enable()
        .context("failed to enable mouse capture")
        .and_then(|mouse| {
            let r = func(terminal);
            drop(mouse);
            r
        });
    ratatui::restore();
    r
}

/// Reports mouse clicks to the program for as long as it is alive
#[derive(Debug)]
struct MouseCapture;

impl MouseCapture {
    fn enable() -> io::Result<MouseCapture> {
        execute!(io::stdout(), EnableMouseCapture)?;
        Ok(MouseCapture)
    }
}

impl Drop for MouseCapture {
    fn drop(&mut self) {
        if let Err(e) = execute!(io::stdout(), DisableMouseCapture) {
            log::warn!("failed to disable mouse capture: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_args(args))
    }

    #[test]
    fn defaults() {
        assert_eq!(parse(&[]).unwrap(), Command::Run(PickerOptions::default()));
    }

    #[test]
    fn all_options() {
        let cmd = parse(&[
            "-l",
            "Birthday",
            "--name=dob",
            "-t",
            "popper",
            "--mode",
            "month",
            "-s",
            "top",
            "--value",
            "1403/05/02",
            "--calendar",
            "gregorian",
            "--locale",
            "en",
            "--left-icon",
            "<",
            "--right-icon",
            ">",
            "--year-span",
            "legacy",
            "--today",
            "2024-03-20",
            "--log-file",
            "picker.log",
            "--once",
        ])
        .unwrap();
        assert_eq!(
            cmd,
            Command::Run(PickerOptions {
                label: Some(String::from("Birthday")),
                placeholder: None,
                name: Some(String::from("dob")),
                picker_type: PickerType::Popper,
                mode: PickerMode::Month,
                selects: SelectsPosition::Top,
                value: Some(String::from("1403/05/02")),
                calendar: CalendarKind::Gregorian,
                locale: Locale::En,
                glyphs: Glyphs {
                    left: String::from("<"),
                    right: String::from(">"),
                },
                year_span: Some(YearSpan::LEGACY_DROPDOWN),
                today: Some(date!(2024 - 03 - 20)),
                log_file: Some(PathBuf::from("picker.log")),
                once: true,
            })
        );
    }

    #[test]
    fn bad_choices() {
        assert!(parse(&["--mode", "week"]).is_err());
        assert!(parse(&["--calendar", "hebrew"]).is_err());
        assert!(parse(&["--today", "1403/01/01"]).is_err());
        assert!(parse(&["stray"]).is_err());
    }

    #[test]
    fn help_wins() {
        assert_eq!(parse(&["--once", "-h"]).unwrap(), Command::Help);
        assert_eq!(parse(&["-V"]).unwrap(), Command::Version);
    }
}
