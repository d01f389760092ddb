use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render keybindings help popup
pub fn render_keybindings_help(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(70, 75, area);

    frame.render_widget(Clear, popup_area);

    let help_text = Paragraph::new(get_keybindings_content())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Keybindings Help ")
                .title_alignment(Alignment::Center)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_text, popup_area);
}

/// Get all keybindings content as styled lines
fn get_keybindings_content() -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let section = |title: &str| -> Line<'static> {
        Line::from(vec![Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )])
    };

    let key = |k: &str, desc: &str| -> Line<'static> {
        Line::from(vec![
            Span::styled(
                format!("  {:12}", k),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(desc.to_string()),
        ])
    };

    lines.push(section("Global"));
    lines.push(Line::from(""));
    lines.push(key("q", "Quit (outside the search box)"));
    lines.push(key("?", "Toggle this help"));
    lines.push(key("ESC", "Close popup / Clear message / Leave mode"));
    lines.push(Line::from(""));

    lines.push(section("Search"));
    lines.push(Line::from(""));
    lines.push(key("/", "Focus the search box"));
    lines.push(key("typing", "Filters on every keystroke"));
    lines.push(key("Ctrl+U", "Clear the search box"));
    lines.push(key("Enter", "Done typing, browse results"));
    lines.push(Line::from(""));

    lines.push(section("Tags"));
    lines.push(Line::from(""));
    lines.push(key("Tab", "Move to the tag bar"));
    lines.push(key("← / →", "Previous / next tag"));
    lines.push(key("Enter", "Toggle tag (selecting the active tag clears it)"));
    lines.push(key("c", "Clear the tag filter"));
    lines.push(Line::from(""));

    lines.push(section("Sources"));
    lines.push(Line::from(""));
    lines.push(key("j / Down", "Next source"));
    lines.push(key("k / Up", "Previous source"));
    lines.push(key("J / K", "Scroll the detail pane"));
    lines.push(key("Enter", "Open first access link in browser"));
    lines.push(key("1-9", "Open access link N"));
    lines.push(key("x", "Reset search and tag"));
    lines.push(Line::from(""));

    lines
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
