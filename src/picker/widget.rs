use super::grid::DayCell;
use super::state::{DatePickerState, ToolbarAction};
use crate::theme::{BASE_STYLE, FOCUSED_BORDER_STYLE, popup::*};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Text,
    widgets::{Block, Clear, Paragraph, StatefulWidget, Widget},
};
use std::iter::zip;

static HEADER: &str = "Mo Tu We Th Fr Sa Su";

static INPUT_TITLE: &str = " Date ";

/// Columns per day cell: two for the day number and one gap
pub(super) const CELL_WIDTH: u16 = 3;

/// Width of the popup's contents, i.e., seven day cells without the final
/// gap
const INNER_WIDTH: u16 = 20;

const POPUP_WIDTH: u16 = INNER_WIDTH + 2;

/// Toolbar, weekday header, six weeks, and the top and bottom borders
const POPUP_HEIGHT: u16 = 10;

// Rows within the popup's borders
pub(super) const TOOLBAR_ROW: u16 = 0;
const HEADER_ROW: u16 = 1;
pub(super) const GRID_TOP: u16 = 2;

/// Column, glyph, and action of each toolbar button
static TOOLBAR_ICONS: [(u16, &str, ToolbarAction); 4] = [
    (0, "<<", ToolbarAction::PreviousYear),
    (3, "<", ToolbarAction::PreviousMonth),
    (16, ">", ToolbarAction::NextMonth),
    (18, ">>", ToolbarAction::NextYear),
];

pub(super) fn toolbar_action_at(col: u16) -> Option<ToolbarAction> {
    TOOLBAR_ICONS
        .iter()
        .find(|&&(x, icon, _)| col >= x && usize::from(col - x) < icon.len())
        .map(|&(_, _, action)| action)
}

/// The text input half of the date picker.  Render it into the input's own
/// area.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct DatePicker;

impl StatefulWidget for DatePicker {
    type State = DatePickerState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        state.input_area = area;
        let border_style = if state.is_focused() {
            FOCUSED_BORDER_STYLE
        } else {
            BASE_STYLE
        };
        let block = Block::bordered()
            .title(INPUT_TITLE)
            .border_style(border_style)
            .style(BASE_STYLE);
        let inner = block.inner(area);
        block.render(area, buf);
        // Keep the caret in view when the value is wider than the input
        let scroll = state.input_scroll(inner.width);
        Paragraph::new(state.value())
            .scroll((0, scroll))
            .render(inner, buf);
    }
}

/// The calendar popup half of the date picker.  Render it over the whole
/// screen after everything else; it positions itself below the input and
/// draws nothing while closed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct CalendarPopup;

impl StatefulWidget for CalendarPopup {
    type State = DatePickerState;

    /*
     * ┌────────────────────┐
     * │<< <  2023-11   > >>│
     * │Mo Tu We Th Fr Sa Su│
     * │30 31  1  2  3  4  5│
     * │ 6  7  8  9 10 11 12│
     * │   ...              │
     * └────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if !state.is_open() {
            state.popup_area = None;
            return;
        }
        let popup = popup_area(area, state.input_area);
        state.popup_area = Some(popup);
        Clear.render(popup, buf);
        let block = Block::bordered().style(BASE_STYLE);
        let inner = block.inner(popup);
        block.render(popup, buf);
        let mut canvas = BufferCanvas::new(inner, buf);
        canvas.draw_toolbar(state.cursor().label());
        canvas.draw_header();
        for (week_no, week) in zip(0u16.., state.grid().weeks()) {
            for (wd, &cell) in zip(0u16.., week) {
                canvas.draw_day(week_no, wd, cell, day_style(state, cell));
            }
        }
    }
}

// Directly below the input, shifted to stay on screen
fn popup_area(screen: Rect, input: Rect) -> Rect {
    let width = POPUP_WIDTH.min(screen.width);
    let height = POPUP_HEIGHT.min(screen.height);
    let x = input
        .x
        .min(screen.right().saturating_sub(width))
        .max(screen.x);
    let y = input
        .bottom()
        .min(screen.bottom().saturating_sub(height))
        .max(screen.y);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn day_style(state: &DatePickerState, cell: DayCell) -> Style {
    if !cell.enabled {
        return PADDING_DAY_STYLE;
    }
    let cursor = state.cursor();
    let mut style = DAY_STYLE;
    if cursor.contains(state.today) && state.today.day() == cell.day {
        style = style.patch(TODAY_STYLE);
    }
    if state.value() == cursor.format_day(cell.day) {
        style = style.patch(SELECTED_DAY_STYLE);
    }
    style
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_toolbar(&mut self, label: String) {
        for (x, icon, _) in TOOLBAR_ICONS {
            self.mvprint(TOOLBAR_ROW, x, icon, TOOLBAR_ICON_STYLE);
        }
        let width = u16::try_from(label.len()).unwrap_or(INNER_WIDTH);
        let x = INNER_WIDTH.saturating_sub(width) / 2;
        self.mvprint(TOOLBAR_ROW, x, label, TOOLBAR_LABEL_STYLE);
    }

    fn draw_header(&mut self) {
        self.mvprint(HEADER_ROW, 0, HEADER, WEEKDAY_STYLE);
    }

    fn draw_day(&mut self, week_no: u16, wd: u16, cell: DayCell, style: Style) {
        self.mvprint(
            GRID_TOP + week_no,
            CELL_WIDTH * wd,
            format!("{:2}", cell.day),
            style,
        );
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style);
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Keep the Paragraph's Rect inside the popup so that narrow
            // screens truncate instead of panicking
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use ratatui::{
        layout::Position,
        style::{Color, Modifier},
    };
    use time::macros::date;

    fn buffer_lines(buf: &Buffer) -> Vec<String> {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol())
                    .collect()
            })
            .collect()
    }

    fn render(state: &mut DatePickerState, area: Rect) -> Buffer {
        let mut buffer = Buffer::empty(area);
        DatePicker.render(Rect::new(area.x, area.y, 24, 3), &mut buffer, state);
        CalendarPopup.render(area, &mut buffer, state);
        buffer
    }

    #[test]
    fn test_toolbar_action_at() {
        assert_eq!(toolbar_action_at(0), Some(ToolbarAction::PreviousYear));
        assert_eq!(toolbar_action_at(1), Some(ToolbarAction::PreviousYear));
        assert_eq!(toolbar_action_at(2), None);
        assert_eq!(toolbar_action_at(3), Some(ToolbarAction::PreviousMonth));
        assert_eq!(toolbar_action_at(9), None);
        assert_eq!(toolbar_action_at(16), Some(ToolbarAction::NextMonth));
        assert_eq!(toolbar_action_at(17), None);
        assert_eq!(toolbar_action_at(18), Some(ToolbarAction::NextYear));
        assert_eq!(toolbar_action_at(19), Some(ToolbarAction::NextYear));
        assert_eq!(toolbar_action_at(20), None);
    }

    #[test]
    fn test_render_closed() {
        let mut state =
            DatePickerState::new(date!(2023 - 11 - 16)).start_date(date!(2023 - 11 - 16));
        let buffer = render(&mut state, Rect::new(0, 0, 24, 13));
        assert_eq!(state.input_area, Rect::new(0, 0, 24, 3));
        assert_eq!(state.popup_area, None);
        let lines = buffer_lines(&buffer);
        assert_eq!(lines[0], "┌ Date ────────────────┐");
        assert_eq!(lines[1], "│2023-11-16            │");
        assert_eq!(lines[2], "└──────────────────────┘");
        assert!(lines[3..].iter().all(|ln| ln.trim().is_empty()));
    }

    #[test]
    fn test_render_long_value_scrolls() {
        let mut state = DatePickerState::new(date!(2023 - 11 - 16))
            .with_value(String::from("abcdefghijklmnopqrstuvwxyz"));
        let buffer = render(&mut state, Rect::new(0, 0, 24, 13));
        // Caret after the last char, in the rightmost inner column
        assert_eq!(buffer_lines(&buffer)[1], "│fghijklmnopqrstuvwxyz │");
        state.focus();
        assert_eq!(state.caret_position(), Some(Position::new(22, 1)));
        state.handle_key(KeyCode::Home);
        let buffer = render(&mut state, Rect::new(0, 0, 24, 13));
        assert_eq!(buffer_lines(&buffer)[1], "│abcdefghijklmnopqrstuv│");
        assert_eq!(state.caret_position(), Some(Position::new(1, 1)));
    }

    #[test]
    fn test_render_open() {
        let mut state =
            DatePickerState::new(date!(2023 - 11 - 16)).start_date(date!(2023 - 11 - 16));
        state.focus();
        let buffer = render(&mut state, Rect::new(0, 0, 24, 13));
        assert_eq!(state.popup_area, Some(Rect::new(0, 3, 22, 10)));
        assert_eq!(
            buffer_lines(&buffer),
            [
                "┌ Date ────────────────┐",
                "│2023-11-16            │",
                "└──────────────────────┘",
                "┌────────────────────┐  ",
                "│<< <  2023-11   > >>│  ",
                "│Mo Tu We Th Fr Sa Su│  ",
                "│30 31  1  2  3  4  5│  ",
                "│ 6  7  8  9 10 11 12│  ",
                "│13 14 15 16 17 18 19│  ",
                "│20 21 22 23 24 25 26│  ",
                "│27 28 29 30  1  2  3│  ",
                "│ 4  5  6  7  8  9 10│  ",
                "└────────────────────┘  ",
            ]
        );
        // Focused input border
        assert_eq!(buffer[(0, 0)].fg, Color::LightYellow);
        // Leading padding
        assert_eq!(buffer[(1, 6)].fg, Color::DarkGray);
        // The 1st
        assert_eq!(buffer[(8, 6)].fg, Color::White);
        // The 16th is both today and selected
        let sixteenth = &buffer[(11, 8)];
        assert!(sixteenth.modifier.contains(Modifier::REVERSED));
        assert!(sixteenth.modifier.contains(Modifier::UNDERLINED));
        // The 17th is neither
        assert!(buffer[(14, 8)].modifier.is_empty());
        // Trailing padding
        assert_eq!(buffer[(19, 11)].fg, Color::DarkGray);
    }

    #[test]
    fn test_selection_highlight_only_in_its_month() {
        let mut state =
            DatePickerState::new(date!(2023 - 11 - 16)).start_date(date!(2023 - 11 - 16));
        state.focus();
        state.navigate(ToolbarAction::NextMonth).unwrap();
        let buffer = render(&mut state, Rect::new(0, 0, 24, 13));
        let lines = buffer_lines(&buffer);
        assert_eq!(lines[4], "│<< <  2023-12   > >>│  ");
        // December 16th, 2023 is a Saturday in the third row
        assert_eq!(&lines[8], "│11 12 13 14 15 16 17│  ");
        assert!(!buffer[(17, 8)].modifier.contains(Modifier::REVERSED));
        assert!(!buffer[(17, 8)].modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_popup_stays_on_screen() {
        let mut state = DatePickerState::new(date!(2023 - 11 - 16));
        state.focus();
        let mut buffer = Buffer::empty(Rect::new(0, 0, 30, 12));
        DatePicker.render(Rect::new(8, 7, 20, 3), &mut buffer, &mut state);
        CalendarPopup.render(buffer.area, &mut buffer, &mut state);
        assert_eq!(state.popup_area, Some(Rect::new(8, 2, 22, 10)));
    }
}
