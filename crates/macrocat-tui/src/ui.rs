// UI rendering logic
use crate::{App, InputMode};
use macrocat_core::display::{link_label, match_summary, pluralize_sources, SourceField};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, app: &mut App) {
    let screen_height = frame.area().height;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3.min(screen_height / 6)), // Header
            Constraint::Length(3.min(screen_height / 8)), // Search input
            Constraint::Length(3.min(screen_height / 8)), // Tag bar
            Constraint::Min(5),                           // Main content
            Constraint::Length(1),                        // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_search_input(frame, app, chunks[1]);
    render_tag_bar(frame, app, chunks[2]);

    // Narrow screens get an even split, wide ones favor the detail pane
    let (results_pct, detail_pct) = if frame.area().width < 100 {
        (50, 50)
    } else {
        (40, 60)
    };

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(results_pct),
            Constraint::Percentage(detail_pct),
        ])
        .split(chunks[3]);

    if app.explorer.view().is_empty() {
        render_no_matches(frame, chunks[3]);
    } else {
        render_results_list(frame, app, content_chunks[0]);
        render_source_detail(frame, app, content_chunks[1]);
    }

    render_status_bar(frame, app, chunks[4]);

    if app.show_help {
        let area = frame.area();
        crate::help_ui::render_keybindings_help(frame, area);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let catalog = app.explorer.catalog();

    let header = Line::from(vec![
        Span::styled(
            " US Macro & Market Data Catalog ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            format!(
                "{}+ curated feeds · {} indicators · {} categories",
                app.explorer.total_sources(),
                catalog.indicator_count(),
                catalog.categories.len()
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let widget = Paragraph::new(header).block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn render_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let input_style = match app.input_mode {
        InputMode::Searching => Style::default().fg(Color::Yellow),
        InputMode::Normal | InputMode::Tagging => Style::default(),
    };

    let search = app.explorer.search();
    let content = if search.is_empty() && app.input_mode != InputMode::Searching {
        Line::from(Span::styled(
            "e.g. SOFR, breakeven, GDPNow, claims",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(search)
    };

    let title = format!(" Search the catalog · {} ", match_summary(app.explorer.match_count()));
    let input = Paragraph::new(content).style(input_style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(input_style),
    );

    frame.render_widget(input, area);

    if app.input_mode == InputMode::Searching {
        frame.set_cursor_position((
            area.x + search.chars().count() as u16 + 1,
            area.y + 1,
        ));
    }
}

fn render_tag_bar(frame: &mut Frame, app: &App, area: Rect) {
    let tags = app.explorer.tags();
    let active = app.explorer.active_tag();
    let focused = app.input_mode == InputMode::Tagging;

    let mut spans = Vec::new();
    if tags.is_empty() {
        spans.push(Span::styled(
            "No tags available.",
            Style::default().fg(Color::DarkGray),
        ));
    }

    for (i, tag) in tags.iter().enumerate() {
        let is_active = Some(*tag) == active;
        let under_cursor = focused && i == app.tag_cursor;

        let mut style = if is_active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        if under_cursor {
            style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
        }

        spans.push(Span::styled(format!(" {} ", tag), style));
        spans.push(Span::raw(" "));
    }

    let title = match active {
        Some(tag) => format!(" Quick tag filter · #{} (c to clear) ", tag),
        None => " Quick tag filter (Tab) ".to_string(),
    };
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style),
    );
    frame.render_widget(widget, area);
}

fn render_results_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = app
        .visible_sources()
        .into_iter()
        .enumerate()
        .map(|(i, (category, indicator, source))| {
            let is_selected = i == app.selected_index;

            let name_style = if is_selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            };

            let line1 = Line::from(vec![Span::styled(source.name.clone(), name_style)]);
            let line2 = Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    format!("{} › {}", category.title, indicator.title),
                    Style::default().fg(Color::Rgb(147, 112, 219)),
                ),
                Span::raw("  •  "),
                Span::styled(source.frequency.clone(), Style::default().fg(Color::DarkGray)),
            ]);

            ListItem::new(vec![line1, line2, Line::from("")])
        })
        .collect();

    let title = format!(" Sources ({}) ", app.explorer.match_count());
    let border_style = if app.input_mode == InputMode::Normal {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style),
        )
        .highlight_style(Style::default().bg(Color::Rgb(49, 50, 68)));

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_source_detail(frame: &mut Frame, app: &App, area: Rect) {
    let Some((category, indicator, source)) = app.selected_source() else {
        let empty = Paragraph::new("Select a source to see details")
            .block(Block::default().borders(Borders::ALL).title(" Details "));
        frame.render_widget(empty, area);
        return;
    };

    let label = Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled(
            source.name.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            source.provider.to_uppercase(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(source.description.clone()),
        Line::from(""),
    ];

    for field in SourceField::CARD {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<18}", field.label()), label),
            Span::raw(field.value(source).to_string()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("ACCESS", label)));
    for (n, endpoint) in source.access.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", n + 1), Style::default().fg(Color::Yellow)),
            Span::styled(
                format!(" {} ", endpoint.kind),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(link_label(endpoint), Style::default().fg(Color::LightBlue)),
        ]));
    }

    if app.show_notes {
        if let Some(notes) = &source.notes {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                notes.clone(),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )));
        }
    }

    if !source.tags().is_empty() {
        lines.push(Line::from(""));
        let tags: Vec<Span> = source
            .tags()
            .iter()
            .map(|t| Span::styled(format!("#{} ", t), Style::default().fg(Color::Magenta)))
            .collect();
        lines.push(Line::from(tags));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "{} · {} ({})",
            category.title,
            indicator.title,
            pluralize_sources(indicator.source_count())
        ),
        Style::default().fg(Color::Rgb(147, 112, 219)),
    )));
    lines.push(Line::from(Span::styled(
        indicator.summary.clone(),
        Style::default().fg(Color::DarkGray),
    )));

    let detail = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Details "))
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));

    frame.render_widget(detail, area);
}

fn render_no_matches(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No matches found",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Try adjusting your search or clearing the tag filter to see more sources.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(err) = &app.error_message {
        Line::from(Span::styled(err.clone(), Style::default().fg(Color::Red)))
    } else if let Some(msg) = &app.status_message {
        Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Green)))
    } else {
        let hint = match app.input_mode {
            InputMode::Searching => "type to filter · Esc browse · Tab tags",
            InputMode::Tagging => "←/→ move · Enter toggle · c clear · Esc back",
            InputMode::Normal => "j/k move · Enter/1-9 open link · / search · Tab tags · ? help · q quit",
        };
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)))
    };

    frame.render_widget(Paragraph::new(line), area);
}
