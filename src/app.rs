use crate::calendar::CalendarProvider;
use crate::help::Help;
use crate::jumpto::{JumpTo, JumpToInput, JumpToOutput, JumpToState};
use crate::picker::{DayStyler, Picker, PickerInput, PickerMode, PickerOutput, PickerState};
use crate::selection::{ChangeListener, Selection};
use crate::shell::{input_area, picker_area, Field, PickerType};
use crate::theme::{BACKDROP_STYLE, BASE_STYLE};
use crossterm::event::{
    read, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Position, Rect},
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};

/// The parts of the form field that are fixed for the whole session
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct FieldOptions {
    pub(crate) label: Option<String>,
    pub(crate) placeholder: Option<String>,
    pub(crate) picker_type: PickerType,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<C, S, L> {
    picker: PickerState<C, S>,
    field: FieldOptions,
    value: Option<String>,
    listener: L,
    once: bool,
    state: AppState,
    screen: Rect,
}

impl<C: CalendarProvider, S: DayStyler, L: ChangeListener> App<C, S, L> {
    pub(crate) fn new(picker: PickerState<C, S>, field: FieldOptions, listener: L) -> Self {
        App {
            picker,
            field,
            value: None,
            listener,
            once: false,
            state: AppState::Closed,
            screen: Rect::default(),
        }
    }

    /// Text shown in the input box before anything is selected
    pub(crate) fn value(mut self, value: Option<String>) -> Self {
        self.value = value;
        self
    }

    /// Quit as soon as something is selected
    pub(crate) fn once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<L> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(self.listener)
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(&mut *self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        let event = read()?;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = event.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        } else if let Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) = event
        {
            if !self.handle_click(column, row) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Closed => match key {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.open();
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping { picking: false };
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                _ => false,
            },
            AppState::Picking => {
                let input = match key {
                    KeyCode::Left => PickerInput::Left,
                    KeyCode::Right => PickerInput::Right,
                    KeyCode::Up => PickerInput::Up,
                    KeyCode::Down => PickerInput::Down,
                    KeyCode::PageUp | KeyCode::Char('<') => PickerInput::PrevPage,
                    KeyCode::PageDown | KeyCode::Char('>') => PickerInput::NextPage,
                    KeyCode::Enter | KeyCode::Char(' ') => PickerInput::Select,
                    KeyCode::Home | KeyCode::Char('t') => PickerInput::Today,
                    KeyCode::Char('m') => PickerInput::MonthList,
                    KeyCode::Char('y') => PickerInput::YearList,
                    KeyCode::Char('g') => PickerInput::GoTo,
                    KeyCode::Esc | KeyCode::Char('q') => PickerInput::Cancel,
                    KeyCode::Char('?') => {
                        self.state = AppState::Helping { picking: true };
                        return true;
                    }
                    _ => return false,
                };
                let output = self.picker.handle_input(input);
                self.apply(output)
            }
            AppState::Helping { picking } => {
                self.state = if *picking {
                    AppState::Picking
                } else {
                    AppState::Closed
                };
                true
            }
            AppState::Jumping(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Picking;
                    true
                } else {
                    let output = match key {
                        KeyCode::Char(c) => match c.to_digit(10).map(u8::try_from) {
                            Some(Ok(d)) => state.handle_input(JumpToInput::Digit(d)),
                            _ => JumpToOutput::Invalid,
                        },
                        KeyCode::Backspace | KeyCode::Delete => {
                            state.handle_input(JumpToInput::Backspace)
                        }
                        KeyCode::Enter => state.handle_input(JumpToInput::Enter),
                        _ => JumpToOutput::Invalid,
                    };
                    match output {
                        JumpToOutput::Ok => true,
                        JumpToOutput::Invalid => false,
                        JumpToOutput::Jump(date) => match self.picker.jump_to(date) {
                            Ok(()) => {
                                self.state = AppState::Picking;
                                true
                            }
                            Err(e) => {
                                log::warn!("cannot go to {date}: {e}");
                                false
                            }
                        },
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    // Returns `false` if the click could not be acted on
    fn handle_click(&mut self, column: u16, row: u16) -> bool {
        match self.state {
            AppState::Closed => {
                if input_area(self.screen).contains(Position::new(column, row)) {
                    self.open();
                }
                true
            }
            AppState::Picking => {
                let output = self.picker.handle_input(PickerInput::Click { column, row });
                self.apply(output)
            }
            _ => true,
        }
    }

    fn apply(&mut self, output: PickerOutput) -> bool {
        match output {
            PickerOutput::Ok => true,
            PickerOutput::Invalid => false,
            PickerOutput::Close => {
                self.close();
                true
            }
            PickerOutput::Commit(selection) => {
                self.commit(selection);
                true
            }
            PickerOutput::GoTo if self.picker.mode() == PickerMode::Date => {
                self.state = AppState::Jumping(JumpToState::new());
                true
            }
            PickerOutput::GoTo => false,
        }
    }

    fn commit(&mut self, selection: Selection) {
        self.listener.on_change(&selection);
        self.picker.remember(&selection);
        self.value = Some(selection.to_string());
        if self.once {
            self.state = AppState::Quitting;
        } else {
            self.close();
        }
    }

    fn open(&mut self) {
        log::debug!("opening picker");
        self.picker.reset();
        self.state = AppState::Picking;
    }

    fn close(&mut self) {
        self.picker.reset();
        self.state = AppState::Closed;
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn picker_open(&self) -> bool {
        matches!(
            self.state,
            AppState::Picking | AppState::Helping { picking: true } | AppState::Jumping(_)
        )
    }

    fn hint(&self) -> &'static str {
        if self.picker_open() {
            "ENTER: select  ESC: close  ?: help"
        } else {
            "ENTER: open  ?: help  q: quit"
        }
    }
}

impl<C: CalendarProvider, S: DayStyler, L: ChangeListener> Widget for &mut App<C, S, L> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        self.screen = area;
        let rtl = self.picker.locale().is_rtl();
        Field {
            label: self.field.label.as_deref(),
            placeholder: self.field.placeholder.as_deref(),
            value: self.value.as_deref(),
            hint: self.hint(),
            align_right: rtl,
        }
        .render(area, buf);
        if self.picker_open() {
            let picker_rect = picker_area(
                self.field.picker_type,
                area,
                input_area(area),
                self.picker.size(),
                rtl,
            );
            if self.field.picker_type == PickerType::Dialog {
                buf.set_style(area, BACKDROP_STYLE);
            }
            Picker::new().render(picker_rect, buf, &mut self.picker);
        }
        if matches!(self.state, AppState::Helping { .. }) {
            Help(BASE_STYLE).render(area, buf);
        } else if let AppState::Jumping(ref mut state) = self.state {
            JumpTo.render(area, buf, state);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Closed,
    Picking,
    /// `picking` records whether to return to the open picker
    Helping {
        picking: bool,
    },
    Jumping(JumpToState),
    Quitting,
}
