use crate::button::Button;
use crate::help::Help;
use crate::picker::{CalendarPopup, DatePicker, DatePickerOutput, DatePickerState};
use crate::theme::{BASE_STYLE, STATUS_STYLE};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind, read,
};
use ratatui::{
    Terminal,
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect},
    text::Line,
    widgets::{StatefulWidget, Widget},
};
use std::io::{self, Write};

static BUTTON_LABEL: &str = "Get selected date";

static HINT: &str = "TAB: switch focus  ?: help  ESC: quit";

const INPUT_WIDTH: u16 = 24;

const BUTTON_WIDTH: u16 = 21;

/// Height of the input and the button, borders included
const CONTROL_HEIGHT: u16 = 3;

/// The demo host: a date picker, a button that reports the picked date, and
/// a status line
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    picker: DatePickerState,
    // The host's copy of the value, updated from the picker's change
    // notifications only
    date_value: String,
    focus: Option<Focus>,
    button_area: Rect,
    status: Option<String>,
    state: AppState,
}

impl App {
    pub(crate) fn new(picker: DatePickerState) -> App {
        App {
            date_value: picker.value().to_owned(),
            picker,
            focus: None,
            button_area: Rect::default(),
            status: None,
            state: AppState::Running,
        }
    }

    /// Run the event loop until the user quits, returning the last date
    /// reported by the picker
    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<String>
    where
        io::Error: From<B::Error>,
    {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(self.date_value)
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        terminal.draw(|frame| {
            frame.render_widget(&mut *self, frame.area());
            if self.state == AppState::Running {
                if let Some(pos) = self.picker.caret_position() {
                    frame.set_cursor_position(pos);
                }
            }
        })?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        let ok = match read()? {
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => self.handle_click(Position::new(column, row)),
            event => match event.as_key_press_event() {
                Some(KeyEvent {
                    code, modifiers, ..
                }) => {
                    if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                        self.state = AppState::Quitting;
                        true
                    } else {
                        normal_modifiers.contains(modifiers) && self.handle_key(code)
                    }
                }
                // Redraw on resize, and we might as well redraw on other
                // stuff too
                None => true,
            },
        };
        if !ok {
            self.beep()?;
        }
        Ok(())
    }

    // Returns `false` if the key could not be acted on
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Helping => {
                self.state = AppState::Running;
                true
            }
            AppState::Quitting => false,
            AppState::Running => match (self.focus, key) {
                (_, KeyCode::Esc) => {
                    self.state = AppState::Quitting;
                    true
                }
                (_, KeyCode::Tab | KeyCode::BackTab) => {
                    self.cycle_focus();
                    true
                }
                (Some(Focus::Input), key) => {
                    let output = self.picker.handle_key(key);
                    self.apply(output)
                }
                (Some(Focus::Button), KeyCode::Enter | KeyCode::Char(' ')) => {
                    self.report();
                    true
                }
                (_, KeyCode::Char('?')) => {
                    self.state = AppState::Helping;
                    true
                }
                (_, KeyCode::Char('q')) => {
                    self.state = AppState::Quitting;
                    true
                }
                _ => false,
            },
        }
    }

    // Returns `false` if the click could not be acted on
    fn handle_click(&mut self, pos: Position) -> bool {
        match self.state {
            AppState::Helping => {
                self.state = AppState::Running;
                true
            }
            AppState::Quitting => false,
            AppState::Running => {
                let output = self.picker.handle_click(pos);
                if self.picker.is_focused() {
                    self.focus = Some(Focus::Input);
                } else if self.button_area.contains(pos) {
                    self.focus = Some(Focus::Button);
                    self.report();
                } else if self.focus == Some(Focus::Input) {
                    self.focus = None;
                }
                self.apply(output)
            }
        }
    }

    fn cycle_focus(&mut self) {
        if self.focus == Some(Focus::Input) {
            self.picker.blur();
            self.focus = Some(Focus::Button);
        } else {
            self.picker.focus();
            self.focus = Some(Focus::Input);
        }
    }

    fn apply(&mut self, output: DatePickerOutput) -> bool {
        match output {
            DatePickerOutput::Ok => true,
            DatePickerOutput::Invalid => false,
            DatePickerOutput::Changed(value) => {
                log::debug!("Date picker changed to {value}");
                self.date_value = value;
                true
            }
        }
    }

    fn report(&mut self) {
        let value = &self.date_value;
        log::info!("dateValue: {value}");
        self.status = Some(format!("dateValue: {value}"));
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [controls, _, status] = Layout::vertical([
            Constraint::Length(CONTROL_HEIGHT),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);
        let [input, _, button, _] = Layout::horizontal([
            Constraint::Length(INPUT_WIDTH),
            Constraint::Length(1),
            Constraint::Length(BUTTON_WIDTH),
            Constraint::Fill(1),
        ])
        .areas(controls);
        self.button_area = button;
        DatePicker.render(input, buf, &mut self.picker);
        Button::new(BUTTON_LABEL)
            .focused(self.focus == Some(Focus::Button))
            .render(button, buf);
        Line::styled(self.status.as_deref().unwrap_or(HINT), STATUS_STYLE).render(status, buf);
        CalendarPopup.render(area, buf, &mut self.picker);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Focus {
    Input,
    Button,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Running,
    Helping,
    Quitting,
}
