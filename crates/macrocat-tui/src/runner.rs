// TUI event loop and terminal management
use crate::{App, InputMode};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

pub fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if app.mouse_enabled {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    } else {
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal even if the loop bailed out
    disable_raw_mode()?;
    if app.mouse_enabled {
        execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    } else {
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    }
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| crate::ui::render(f, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
            Event::Mouse(mouse) if app.mouse_enabled => match mouse.kind {
                MouseEventKind::ScrollDown => app.next_result(),
                MouseEventKind::ScrollUp => app.previous_result(),
                _ => {}
            },
            _ => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Apply one key press to the app
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.toggle_help();
        }
        return;
    }

    match app.input_mode {
        InputMode::Searching => match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.clear_search();
            }
            KeyCode::Char(c) => {
                app.push_search_char(c);
            }
            KeyCode::Backspace => {
                app.pop_search_char();
            }
            KeyCode::Tab => {
                app.enter_tag_mode();
            }
            KeyCode::Esc | KeyCode::Enter | KeyCode::Down => {
                app.enter_normal_mode();
            }
            _ => {}
        },
        InputMode::Tagging => match key.code {
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
                app.next_tag();
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
                app.previous_tag();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                app.toggle_tag_at_cursor();
            }
            KeyCode::Char('c') => {
                app.clear_tag();
            }
            KeyCode::Char('/') => {
                app.enter_search_mode();
            }
            KeyCode::Esc | KeyCode::Down => {
                app.enter_normal_mode();
            }
            KeyCode::Char('q') => {
                app.quit();
            }
            _ => {}
        },
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => {
                app.quit();
            }
            KeyCode::Char('/') => {
                app.enter_search_mode();
            }
            KeyCode::Tab => {
                app.enter_tag_mode();
            }
            KeyCode::Char('?') => {
                app.toggle_help();
            }
            KeyCode::Char('j') | KeyCode::Down => {
                app.next_result();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                app.previous_result();
            }
            KeyCode::Char('J') => {
                app.scroll_detail_down();
            }
            KeyCode::Char('K') => {
                app.scroll_detail_up();
            }
            KeyCode::Char('c') => {
                app.clear_tag();
            }
            KeyCode::Char('x') => {
                app.reset_filters();
            }
            KeyCode::Enter => {
                open_endpoint(app, 0);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let n = c as usize - '1' as usize;
                open_endpoint(app, n);
            }
            KeyCode::Esc => {
                app.clear_messages();
            }
            _ => {}
        },
    }
}

fn open_endpoint(app: &mut App, n: usize) {
    let Some(endpoint) = app.endpoint(n) else {
        return;
    };
    let url = endpoint.url.clone();

    if !app.open_links {
        app.status_message = Some(url);
        return;
    }

    match open::that(&url) {
        Ok(()) => {
            tracing::debug!(%url, "Opened access link");
            app.status_message = Some(format!("Opened {}", url));
        }
        Err(e) => {
            app.error_message = Some(format!("Failed to open browser: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macrocat_core::config::UiConfig;
    use macrocat_core::Catalog;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn quiet_ui() -> UiConfig {
        UiConfig {
            open_links: false,
            ..UiConfig::default()
        }
    }

    #[test]
    fn test_q_types_while_searching_but_quits_when_browsing() {
        let catalog = Catalog::builtin().unwrap();
        let mut app = App::new(&catalog, &quiet_ui());

        type_str(&mut app, "q");
        assert!(!app.should_quit);
        assert_eq!(app.explorer.search(), "q");

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_u_clears_search() {
        let catalog = Catalog::builtin().unwrap();
        let mut app = App::new(&catalog, &quiet_ui());

        type_str(&mut app, "sofr");
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
        );
        assert_eq!(app.explorer.search(), "");
        assert_eq!(app.explorer.match_count(), catalog.source_count());
    }

    #[test]
    fn test_tag_bar_flow() {
        let catalog = Catalog::builtin().unwrap();
        let mut app = App::new(&catalog, &quiet_ui());
        let first = app.explorer.tags()[0];

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.input_mode, InputMode::Tagging);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.explorer.active_tag(), Some(first));
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.explorer.active_tag(), None);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_number_key_reports_link_when_opening_disabled() {
        let catalog = Catalog::builtin().unwrap();
        let mut app = App::new(&catalog, &quiet_ui());
        press(&mut app, KeyCode::Esc);

        let (_, _, source) = app.selected_source().unwrap();
        let expected = source.access[0].url.clone();
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.status_message.as_deref(), Some(expected.as_str()));
    }

    #[test]
    fn test_help_swallows_keys() {
        let catalog = Catalog::builtin().unwrap();
        let mut app = App::new(&catalog, &quiet_ui());
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);

        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
    }
}
