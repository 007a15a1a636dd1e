use super::grid::{Cursor, DAYS_IN_WEEK, LeapRule, MonthGrid, OutOfTimeError};
use super::widget::{CELL_WIDTH, GRID_TOP, TOOLBAR_ROW, toolbar_action_at};
use crossterm::event::KeyCode;
use ratatui::layout::{Margin, Position, Rect};
use time::Date;

/// Whether the calendar popup is shown
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Visibility {
    #[default]
    Closed,
    Open,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ToolbarAction {
    PreviousYear,
    PreviousMonth,
    NextMonth,
    NextYear,
}

/// Result of feeding an event to a [`DatePickerState`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum DatePickerOutput {
    /// The event was handled (possibly by doing nothing)
    Ok,
    /// The event could not be acted on
    Invalid,
    /// A day was selected; carries the new `YYYY-MM-DD` value
    Changed(String),
}

/// State shared by [`DatePicker`](super::DatePicker) and
/// [`CalendarPopup`](super::CalendarPopup).
///
/// The state owns the picker's value: a day selection or a manual edit
/// replaces it, and hosts learn about selections through
/// [`DatePickerOutput::Changed`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DatePickerState {
    pub(super) today: Date,
    value: String,
    // Caret position in the input, counted in chars
    caret: usize,
    focused: bool,
    visibility: Visibility,
    cursor: Cursor,
    leap_rule: LeapRule,
    grid: MonthGrid,
    // Where the widgets were last drawn, for hit-testing clicks
    pub(super) input_area: Rect,
    pub(super) popup_area: Option<Rect>,
}

impl DatePickerState {
    pub(crate) fn new(today: Date) -> Self {
        let cursor = Cursor::containing(today);
        let leap_rule = LeapRule::default();
        DatePickerState {
            today,
            value: String::new(),
            caret: 0,
            focused: false,
            visibility: Visibility::Closed,
            cursor,
            leap_rule,
            grid: MonthGrid::new(cursor, leap_rule),
            input_area: Rect::default(),
            popup_area: None,
        }
    }

    /// Start with `date` selected and its month displayed
    pub(crate) fn start_date(mut self, date: Date) -> Self {
        self.set_cursor(Cursor::containing(date));
        let value = self.cursor.format_day(date.day());
        self.with_value(value)
    }

    pub(crate) fn with_value(mut self, value: String) -> Self {
        self.caret = value.chars().count();
        self.value = value;
        self
    }

    pub(crate) fn leap_rule(mut self, leap_rule: LeapRule) -> Self {
        self.leap_rule = leap_rule;
        self.grid = MonthGrid::new(self.cursor, leap_rule);
        self
    }

    pub(crate) fn value(&self) -> &str {
        &self.value
    }

    pub(crate) fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub(crate) fn grid(&self) -> &MonthGrid {
        &self.grid
    }

    pub(crate) fn is_open(&self) -> bool {
        self.visibility == Visibility::Open
    }

    pub(crate) fn is_focused(&self) -> bool {
        self.focused
    }

    /// Where the terminal cursor should be shown, if the input is focused
    pub(crate) fn caret_position(&self) -> Option<Position> {
        if !self.focused {
            return None;
        }
        let inner = self.input_area.inner(Margin::new(1, 1));
        if inner.is_empty() {
            return None;
        }
        let offset = self.caret_column().saturating_sub(self.input_scroll(inner.width));
        Some(Position::new(
            inner.x.saturating_add(offset.min(inner.width - 1)),
            inner.y,
        ))
    }

    /// Number of columns the input text is scrolled left by so that the
    /// caret stays within an input of the given inner width
    pub(super) fn input_scroll(&self, width: u16) -> u16 {
        self.caret_column().saturating_sub(width.saturating_sub(1))
    }

    fn caret_column(&self) -> u16 {
        u16::try_from(self.caret).unwrap_or(u16::MAX)
    }

    pub(crate) fn focus(&mut self) {
        if !self.focused {
            log::debug!("Date input focused");
        }
        self.focused = true;
        self.visibility = Visibility::Open;
    }

    pub(crate) fn blur(&mut self) {
        self.focused = false;
    }

    pub(crate) fn close(&mut self) {
        self.visibility = Visibility::Closed;
    }

    pub(crate) fn navigate(&mut self, action: ToolbarAction) -> Result<(), OutOfTimeError> {
        let cursor = match action {
            ToolbarAction::PreviousYear => self.cursor.previous_year(),
            ToolbarAction::PreviousMonth => self.cursor.previous_month(),
            ToolbarAction::NextMonth => self.cursor.next_month(),
            ToolbarAction::NextYear => self.cursor.next_year(),
        }?;
        self.set_cursor(cursor);
        Ok(())
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        if cursor != self.cursor {
            self.cursor = cursor;
            self.grid = MonthGrid::new(cursor, self.leap_rule);
        }
    }

    /// Select the grid cell at `index` (row-major, Monday first).  Padding
    /// cells are ignored.
    pub(crate) fn select_cell(&mut self, index: usize) -> DatePickerOutput {
        match self.grid.get(index) {
            Some(cell) if cell.enabled => {
                self.value = self.cursor.format_day(cell.day);
                self.caret = self.value.chars().count();
                self.close();
                log::debug!("Selected {}", self.value);
                DatePickerOutput::Changed(self.value.clone())
            }
            _ => DatePickerOutput::Ok,
        }
    }

    /// Handle a left click anywhere on the screen
    pub(crate) fn handle_click(&mut self, pos: Position) -> DatePickerOutput {
        // The popup is drawn over the input, so it gets first claim on clicks
        if let Some(popup) = self.popup_area.filter(|_| self.is_open()) {
            if popup.contains(pos) {
                return self.click_popup(popup, pos);
            }
        }
        if self.input_area.contains(pos) {
            self.focus();
            return DatePickerOutput::Ok;
        }
        if self.focused || self.is_open() {
            log::debug!("Click outside date picker; closing");
        }
        self.blur();
        self.close();
        DatePickerOutput::Ok
    }

    fn click_popup(&mut self, popup: Rect, pos: Position) -> DatePickerOutput {
        let inner = popup.inner(Margin::new(1, 1));
        if !inner.contains(pos) {
            // Border
            return DatePickerOutput::Ok;
        }
        let row = pos.y - inner.y;
        let col = pos.x - inner.x;
        if row == TOOLBAR_ROW {
            match toolbar_action_at(col).map(|action| self.navigate(action)) {
                Some(Ok(())) | None => DatePickerOutput::Ok,
                Some(Err(_)) => DatePickerOutput::Invalid,
            }
        } else if row >= GRID_TOP {
            let week = usize::from(row - GRID_TOP);
            let weekday = usize::from(col / CELL_WIDTH);
            if weekday < DAYS_IN_WEEK {
                self.select_cell(week * DAYS_IN_WEEK + weekday)
            } else {
                DatePickerOutput::Ok
            }
        } else {
            DatePickerOutput::Ok
        }
    }

    /// Handle a key press while the input has focus.  Keys only edit the
    /// text; they never move the calendar.
    pub(crate) fn handle_key(&mut self, key: KeyCode) -> DatePickerOutput {
        if !self.focused {
            return DatePickerOutput::Invalid;
        }
        let ok = match key {
            KeyCode::Char(ch) => {
                let i = self.byte_index();
                self.value.insert(i, ch);
                self.caret += 1;
                true
            }
            KeyCode::Backspace if self.caret > 0 => {
                self.caret -= 1;
                let i = self.byte_index();
                self.value.remove(i);
                true
            }
            KeyCode::Delete if self.caret < self.value.chars().count() => {
                let i = self.byte_index();
                self.value.remove(i);
                true
            }
            KeyCode::Left if self.caret > 0 => {
                self.caret -= 1;
                true
            }
            KeyCode::Right if self.caret < self.value.chars().count() => {
                self.caret += 1;
                true
            }
            KeyCode::Home => {
                self.caret = 0;
                true
            }
            KeyCode::End => {
                self.caret = self.value.chars().count();
                true
            }
            _ => false,
        };
        if ok {
            DatePickerOutput::Ok
        } else {
            DatePickerOutput::Invalid
        }
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.caret)
            .unwrap_or(self.value.len())
    }
}
