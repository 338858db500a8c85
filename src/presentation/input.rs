use crate::application::{App, AppMode, Page};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::BlogSlug => Self::handle_blog_slug_mode(app, key),
            AppMode::CatalogueSearch => Self::handle_search_mode(app, key),
            AppMode::TaskEntry => Self::handle_task_entry_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, _modifiers: KeyModifiers) {
        app.status_message = None;

        match key {
            KeyCode::Char('1') => {
                app.switch_page(Page::Blog);
                return;
            }
            KeyCode::Char('2') => {
                app.switch_page(Page::Counter);
                return;
            }
            KeyCode::Char('3') => {
                app.switch_page(Page::Catalogue);
                return;
            }
            KeyCode::Char('4') => {
                app.switch_page(Page::Tasks);
                return;
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.mode = AppMode::Help;
                app.help_scroll = 0;
                return;
            }
            _ => {}
        }

        match app.page {
            Page::Blog => Self::handle_blog_page(app, key),
            Page::Counter => Self::handle_counter_page(app, key),
            Page::Catalogue => Self::handle_catalogue_page(app, key),
            Page::Tasks => Self::handle_tasks_page(app, key),
        }
    }

    fn handle_blog_page(app: &mut App, key: KeyCode) {
        if matches!(key, KeyCode::Char('e') | KeyCode::Enter) {
            app.start_blog_edit();
        }
    }

    fn handle_counter_page(app: &mut App, key: KeyCode) {
        if matches!(key, KeyCode::Char('+') | KeyCode::Char(' ') | KeyCode::Enter) {
            app.increment_counter();
        }
    }

    fn handle_catalogue_page(app: &mut App, key: KeyCode) {
        if app.detail_item.is_some() {
            if matches!(key, KeyCode::Esc | KeyCode::Backspace | KeyCode::Enter) {
                app.close_detail();
            }
            return;
        }

        match key {
            KeyCode::Char('/') => app.start_catalogue_search(),
            KeyCode::Char('c') => app.cycle_category(),
            KeyCode::Left | KeyCode::Char('h') => app.prev_catalogue_page(),
            KeyCode::Right | KeyCode::Char('l') => app.next_catalogue_page(),
            KeyCode::Up | KeyCode::Char('k') => app.select_prev_card(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next_card(),
            KeyCode::Enter => app.open_detail(),
            _ => {}
        }
    }

    fn handle_tasks_page(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Char('a') => app.start_task_entry(),
            KeyCode::Char(' ') => app.toggle_selected_task(),
            KeyCode::Char('d') | KeyCode::Delete => app.remove_selected_task(),
            KeyCode::Char('K') => app.move_selected_task_up(),
            KeyCode::Char('J') => app.move_selected_task_down(),
            KeyCode::Up | KeyCode::Char('k') => app.select_prev_task(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next_task(),
            _ => {}
        }
    }

    fn handle_blog_slug_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.finish_blog_edit(),
            KeyCode::Esc => app.cancel_input(),
            _ => {
                Self::handle_buffer_edit(app, key);
            }
        }
    }

    fn handle_search_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.finish_catalogue_search(),
            KeyCode::Esc => app.cancel_catalogue_search(),
            _ => {
                if Self::handle_buffer_edit(app, key) {
                    // Live search as the user types
                    app.apply_catalogue_search();
                }
            }
        }
    }

    fn handle_task_entry_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.finish_task_entry(),
            KeyCode::Esc => app.cancel_input(),
            _ => {
                Self::handle_buffer_edit(app, key);
            }
        }
    }

    /// Shared editing keys for the input buffer. Returns whether the
    /// buffer contents changed.
    ///
    /// The cursor is a character offset, not a byte offset, so multibyte
    /// input never lands an edit off a char boundary.
    fn handle_buffer_edit(app: &mut App, key: KeyCode) -> bool {
        match key {
            KeyCode::Backspace => {
                if app.cursor_position > 0 {
                    let idx = byte_index(&app.input, app.cursor_position - 1);
                    app.input.remove(idx);
                    app.cursor_position -= 1;
                    return true;
                }
                false
            }
            KeyCode::Delete => {
                if app.cursor_position < app.input.chars().count() {
                    let idx = byte_index(&app.input, app.cursor_position);
                    app.input.remove(idx);
                    return true;
                }
                false
            }
            KeyCode::Left => {
                if app.cursor_position > 0 {
                    app.cursor_position -= 1;
                }
                false
            }
            KeyCode::Right => {
                if app.cursor_position < app.input.chars().count() {
                    app.cursor_position += 1;
                }
                false
            }
            KeyCode::Home => {
                app.cursor_position = 0;
                false
            }
            KeyCode::End => {
                app.cursor_position = app.input.chars().count();
                false
            }
            KeyCode::Char(c) => {
                let idx = byte_index(&app.input, app.cursor_position);
                app.input.insert(idx, c);
                app.cursor_position += 1;
                true
            }
            _ => false,
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}

/// Byte offset of the `char_pos`-th character of `input`, or the end of
/// the string when the cursor sits past the last character.
fn byte_index(input: &str, char_pos: usize) -> usize {
    input
        .char_indices()
        .nth(char_pos)
        .map(|(idx, _)| idx)
        .unwrap_or(input.len())
}
