// TUI application state and event handling
use macrocat_core::config::UiConfig;
use macrocat_core::{AccessEndpoint, Catalog, CatalogExplorer, Category, Indicator, Source};
use ratatui::widgets::ListState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,    // Navigating sources
    Searching, // Typing in search box
    Tagging,   // Moving through the tag bar
}

/// A source row in the result list, with its parents for context
pub type SourceRow<'a> = (&'a Category, &'a Indicator, &'a Source);

pub struct App<'a> {
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub explorer: CatalogExplorer<'a>,
    pub selected_index: usize,
    pub list_state: ListState,
    pub tag_cursor: usize,
    pub show_help: bool,
    pub detail_scroll: u16,
    pub error_message: Option<String>,
    pub status_message: Option<String>,
    pub show_notes: bool,
    pub open_links: bool,
    pub mouse_enabled: bool,
}

impl<'a> App<'a> {
    pub fn new(catalog: &'a Catalog, ui: &UiConfig) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            should_quit: false,
            input_mode: InputMode::Searching,
            explorer: CatalogExplorer::new(catalog),
            selected_index: 0,
            list_state,
            tag_cursor: 0,
            show_help: false,
            detail_scroll: 0,
            error_message: None,
            status_message: None,
            show_notes: ui.show_notes,
            open_links: ui.open_links,
            mouse_enabled: ui.mouse_enabled,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Searching;
    }

    pub fn enter_normal_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn enter_tag_mode(&mut self) {
        if self.explorer.tags().is_empty() {
            self.status_message = Some("No tags available.".to_string());
            return;
        }
        // Start on the active tag if there is one
        if let Some(active) = self.explorer.active_tag() {
            if let Some(pos) = self.explorer.tags().iter().position(|t| *t == active) {
                self.tag_cursor = pos;
            }
        }
        self.input_mode = InputMode::Tagging;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn push_search_char(&mut self, c: char) {
        self.explorer.push_char(c);
        self.reset_selection();
    }

    pub fn pop_search_char(&mut self) {
        self.explorer.pop_char();
        self.reset_selection();
    }

    pub fn clear_search(&mut self) {
        self.explorer.set_search("");
        self.reset_selection();
    }

    pub fn next_tag(&mut self) {
        let len = self.explorer.tags().len();
        if len > 0 {
            self.tag_cursor = (self.tag_cursor + 1) % len;
        }
    }

    pub fn previous_tag(&mut self) {
        let len = self.explorer.tags().len();
        if len > 0 {
            self.tag_cursor = (self.tag_cursor + len - 1) % len;
        }
    }

    /// Select the tag under the cursor, or clear it if it's already active
    pub fn toggle_tag_at_cursor(&mut self) {
        if let Some(tag) = self.explorer.tags().get(self.tag_cursor).copied() {
            self.explorer.toggle_tag(tag);
            self.reset_selection();
        }
    }

    pub fn clear_tag(&mut self) {
        self.explorer.clear_tag();
        self.reset_selection();
    }

    pub fn reset_filters(&mut self) {
        self.explorer.reset();
        self.reset_selection();
    }

    /// Every source in the current filtered view, in display order
    pub fn visible_sources(&self) -> Vec<SourceRow<'a>> {
        self.explorer.view().iter_sources().collect()
    }

    pub fn selected_source(&self) -> Option<SourceRow<'a>> {
        self.explorer.view().iter_sources().nth(self.selected_index)
    }

    pub fn next_result(&mut self) {
        let len = self.explorer.view().source_count();
        if len > 0 {
            self.selected_index = (self.selected_index + 1).min(len - 1);
            self.list_state.select(Some(self.selected_index));
            self.detail_scroll = 0;
        }
    }

    pub fn previous_result(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
            self.detail_scroll = 0;
        }
    }

    pub fn scroll_detail_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(1);
    }

    pub fn scroll_detail_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }

    /// Access endpoint `n` (0-based) of the selected source
    pub fn endpoint(&self, n: usize) -> Option<&'a AccessEndpoint> {
        self.selected_source()
            .and_then(|(_, _, source)| source.access.get(n))
    }

    pub fn clear_messages(&mut self) {
        self.error_message = None;
        self.status_message = None;
    }

    fn reset_selection(&mut self) {
        self.selected_index = 0;
        self.detail_scroll = 0;
        self.list_state.select(Some(0));
    }
}
