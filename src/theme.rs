use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub border: Color,

    // Specific components
    pub header: Style,
    pub name: Style,
    pub email: Style,
    pub link: Style,
    pub delete: Style,
    pub selection: Style,
    pub focused_control: Style,
    pub footer: Style,
    pub loading: Style,
    pub error: Style,
    pub popup_title: Style,
    pub popup_border: Style,
    pub popup_text: Style,
    pub section_title: Style,
    pub label: Style,
    pub button: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border: Color::Cyan,

            header: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            name: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            email: Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            link: Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
            delete: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            selection: Style::default().bg(Color::DarkGray),
            focused_control: Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD),
            footer: Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            loading: Style::default().fg(Color::Cyan),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            popup_title: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            popup_border: Style::default().fg(Color::Magenta).bg(Color::Black),
            popup_text: Style::default().fg(Color::White),
            section_title: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            button: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        }
    }
}
