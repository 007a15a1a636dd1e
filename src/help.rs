use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Paragraph, Widget},
};

static TEXT: &[&str] = &[
    "Click the input     Open the calendar",
    "Click outside       Close the calendar",
    "<< / >>             Previous / next year",
    "<  / >              Previous / next month",
    "TAB                 Switch focus",
    "ENTER               Press the focused button",
    "?                   Show this help",
    "q, ESC              Quit",
    "",
    "Press the Any Key to dismiss.",
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from_iter(TEXT.iter().map(|&s| Line::raw(s)));
        // Borders plus one column of padding on either side
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(4);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2);
        let [row] = Layout::vertical([height]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(row);
        Clear.render(help_area, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Controls ")
                    .title_alignment(Alignment::Center)
                    .padding(Padding::horizontal(1)),
            )
            .style(self.0)
            .render(help_area, buf);
    }
}
