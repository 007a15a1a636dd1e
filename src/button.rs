use crate::theme::{BASE_STYLE, FOCUSED_BORDER_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Paragraph, Widget},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Button<'a> {
    label: &'a str,
    focused: bool,
}

impl<'a> Button<'a> {
    pub(crate) fn new(label: &'a str) -> Self {
        Button {
            label,
            focused: false,
        }
    }

    pub(crate) fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for Button<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .border_style(if self.focused {
                FOCUSED_BORDER_STYLE
            } else {
                BASE_STYLE
            })
            .style(BASE_STYLE);
        Paragraph::new(self.label)
            .centered()
            .block(block)
            .render(area, buf);
    }
}
