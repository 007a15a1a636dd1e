use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const FOCUSED_BORDER_STYLE: Style = BASE_STYLE.fg(Color::LightYellow);

pub(crate) const STATUS_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub(crate) mod popup {
    use super::*;

    pub(crate) const TOOLBAR_ICON_STYLE: Style = BASE_STYLE
        .fg(Color::LightCyan)
        .add_modifier(Modifier::BOLD);

    pub(crate) const TOOLBAR_LABEL_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

    pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

    pub(crate) const DAY_STYLE: Style = BASE_STYLE;

    pub(crate) const PADDING_DAY_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const TODAY_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

    pub(crate) const SELECTED_DAY_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
}
