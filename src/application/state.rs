//! Application state management for the terminal app.
//!
//! This module contains the main application state: the current page, the
//! active input mode, and the two domain engines (catalogue view state and
//! task list).

use crate::domain::{
    distinct_categories, CatalogueItem, CatalogueView, DomainResult, KeyValueStore, MemoryStore,
    TaskList, TASKS_KEY,
};

/// The pages of the application, mirroring the original routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Blog post placeholder showing the current slug
    Blog,
    /// Stateless counter, reset on every visit
    Counter,
    /// Paginated, filterable Pokémon catalogue
    Catalogue,
    /// Reorderable, persisted to-do list
    Tasks,
}

/// Determines how keyboard input is interpreted.
///
/// `Normal` is page navigation and per-page shortcuts; the other modes
/// route keystrokes into the shared input buffer or the help popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Page shortcuts and navigation
    Normal,
    /// Editing the blog post slug
    BlogSlug,
    /// Typing a catalogue search query (applied live)
    CatalogueSearch,
    /// Typing the text of a new task
    TaskEntry,
    /// Help popup is displayed
    Help,
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use tuidex::application::{App, AppMode, Page};
///
/// let app = App::default();
/// assert_eq!(app.page, Page::Blog);
/// assert_eq!(app.mode, AppMode::Normal);
/// assert_eq!(app.counter, 0);
/// ```
#[derive(Debug)]
pub struct App {
    /// Currently displayed page
    pub page: Page,
    /// Current input mode
    pub mode: AppMode,
    /// Counter page value; reset to zero on every visit
    pub counter: i64,
    /// Slug shown on the blog placeholder page
    pub blog_slug: String,
    /// Catalogue items, loaded once at startup and never mutated
    pub catalogue_items: Vec<CatalogueItem>,
    /// Catalogue view state, recreated fresh on every page visit
    pub catalogue_view: CatalogueView,
    /// Distinct category labels ("all" first), for the filter control
    pub categories: Vec<String>,
    /// Index into `categories` of the active filter
    pub category_index: usize,
    /// Cursor within the currently visible catalogue page
    pub selected_card: usize,
    /// Id of the item open in the detail view, if any
    pub detail_item: Option<u32>,
    /// The task list engine
    pub tasks: TaskList,
    /// Cursor within the task list
    pub selected_task: usize,
    /// Shared input buffer for the text-entry modes
    pub input: String,
    /// Cursor position within the input buffer, counted in characters
    pub cursor_position: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Scroll position in help text
    pub help_scroll: usize,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Vec::new(), Box::new(MemoryStore::default()))
    }
}

impl App {
    /// Builds the application state from the loaded catalogue and the
    /// storage collaborator, hydrating the task list once.
    ///
    /// A hydration error (malformed stored tasks) becomes a status message
    /// rather than aborting; the session starts with an empty list.
    pub fn new(items: Vec<CatalogueItem>, store: Box<dyn KeyValueStore>) -> Self {
        let categories = distinct_categories(&items);

        let mut tasks = TaskList::new(store);
        let stored = tasks.store().get(TASKS_KEY);
        let status_message = match tasks.hydrate(stored.as_deref()) {
            Ok(()) => None,
            Err(e) => Some(e.to_string()),
        };

        Self {
            page: Page::Blog,
            mode: AppMode::Normal,
            counter: 0,
            blog_slug: "hello-world".to_string(),
            catalogue_items: items,
            catalogue_view: CatalogueView::default(),
            categories,
            category_index: 0,
            selected_card: 0,
            detail_item: None,
            tasks,
            selected_task: 0,
            input: String::new(),
            cursor_position: 0,
            status_message,
            help_scroll: 0,
        }
    }

    /// Switches to `page`, resetting its per-visit state.
    ///
    /// The counter restarts at zero and the catalogue view state is
    /// recreated fresh, matching the original pages whose local state
    /// lived only for one mount.
    pub fn switch_page(&mut self, page: Page) {
        self.page = page;
        self.mode = AppMode::Normal;
        self.status_message = None;

        match page {
            Page::Counter => {
                self.counter = 0;
            }
            Page::Catalogue => {
                self.catalogue_view = CatalogueView::default();
                self.category_index = 0;
                self.selected_card = 0;
                self.detail_item = None;
            }
            Page::Blog | Page::Tasks => {}
        }
    }

    pub fn increment_counter(&mut self) {
        self.counter += 1;
    }

    // --- blog ---

    pub fn start_blog_edit(&mut self) {
        self.mode = AppMode::BlogSlug;
        self.input = self.blog_slug.clone();
        self.cursor_position = self.input.chars().count();
    }

    pub fn finish_blog_edit(&mut self) {
        if !self.input.trim().is_empty() {
            self.blog_slug = self.input.trim().to_string();
        }
        self.reset_input();
    }

    pub fn cancel_input(&mut self) {
        self.reset_input();
    }

    fn reset_input(&mut self) {
        self.mode = AppMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
    }

    // --- catalogue ---

    /// Number of items on the currently visible catalogue page.
    pub fn visible_count(&self) -> usize {
        self.catalogue_view.derive(&self.catalogue_items).visible.len()
    }

    /// Total page count for the current filters.
    pub fn total_pages(&self) -> usize {
        self.catalogue_view.derive(&self.catalogue_items).total_pages
    }

    pub fn start_catalogue_search(&mut self) {
        self.mode = AppMode::CatalogueSearch;
        self.input = self.catalogue_view.query.clone();
        self.cursor_position = self.input.chars().count();
        self.status_message = None;
    }

    /// Applies the input buffer as the live search query.
    pub fn apply_catalogue_search(&mut self) {
        let query = self.input.clone();
        self.catalogue_view.set_query(&query);
        self.selected_card = 0;
    }

    pub fn finish_catalogue_search(&mut self) {
        self.reset_input();
    }

    pub fn cancel_catalogue_search(&mut self) {
        self.catalogue_view.set_query("");
        self.selected_card = 0;
        self.reset_input();
    }

    /// Advances the category filter to the next label, wrapping around.
    pub fn cycle_category(&mut self) {
        self.category_index = (self.category_index + 1) % self.categories.len();
        let label = self.categories[self.category_index].clone();
        self.catalogue_view.set_category(&label);
        self.selected_card = 0;
    }

    /// Moves to the next catalogue page; disabled at the last page.
    pub fn next_catalogue_page(&mut self) {
        if self.catalogue_view.page < self.total_pages() {
            self.catalogue_view.set_page(self.catalogue_view.page + 1);
            self.selected_card = 0;
        }
    }

    /// Moves to the previous catalogue page; disabled at page one.
    pub fn prev_catalogue_page(&mut self) {
        if self.catalogue_view.page > 1 {
            self.catalogue_view.set_page(self.catalogue_view.page - 1);
            self.selected_card = 0;
        }
    }

    pub fn select_next_card(&mut self) {
        let count = self.visible_count();
        if count > 0 && self.selected_card < count - 1 {
            self.selected_card += 1;
        }
    }

    pub fn select_prev_card(&mut self) {
        if self.selected_card > 0 {
            self.selected_card -= 1;
        }
    }

    /// Opens the detail view for the selected card, like following the
    /// item link to its own route.
    pub fn open_detail(&mut self) {
        let page = self.catalogue_view.derive(&self.catalogue_items);
        if let Some(item) = page.visible.get(self.selected_card) {
            self.detail_item = Some(item.id);
        }
    }

    pub fn close_detail(&mut self) {
        self.detail_item = None;
    }

    /// Resolves the open detail id against the item list.
    pub fn detail(&self) -> Option<&CatalogueItem> {
        let id = self.detail_item?;
        self.catalogue_items.iter().find(|item| item.id == id)
    }

    // --- tasks ---

    pub fn start_task_entry(&mut self) {
        self.mode = AppMode::TaskEntry;
        self.input.clear();
        self.cursor_position = 0;
        self.status_message = None;
    }

    pub fn finish_task_entry(&mut self) {
        let text = self.input.clone();
        let result = self.tasks.add_task(&text);
        self.report_task_result(result);
        self.reset_input();
    }

    pub fn toggle_selected_task(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        let result = self.tasks.toggle(&id);
        self.report_task_result(result);
    }

    pub fn remove_selected_task(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        let result = self.tasks.remove(&id);
        self.report_task_result(result);

        // Keep the cursor in range after the list shrinks.
        if self.selected_task >= self.tasks.len() && self.selected_task > 0 {
            self.selected_task = self.tasks.len().saturating_sub(1);
        }
    }

    pub fn move_selected_task_up(&mut self) {
        if self.selected_task == 0 || self.tasks.is_empty() {
            return;
        }
        let destination = self.selected_task - 1;
        let result = self.tasks.reorder(self.selected_task, Some(destination));
        self.report_task_result(result);
        self.selected_task = destination;
    }

    pub fn move_selected_task_down(&mut self) {
        if self.tasks.is_empty() || self.selected_task + 1 >= self.tasks.len() {
            return;
        }
        let destination = self.selected_task + 1;
        let result = self.tasks.reorder(self.selected_task, Some(destination));
        self.report_task_result(result);
        self.selected_task = destination;
    }

    pub fn select_next_task(&mut self) {
        if !self.tasks.is_empty() && self.selected_task < self.tasks.len() - 1 {
            self.selected_task += 1;
        }
    }

    pub fn select_prev_task(&mut self) {
        if self.selected_task > 0 {
            self.selected_task -= 1;
        }
    }

    fn selected_task_id(&self) -> Option<String> {
        self.tasks.tasks().get(self.selected_task).map(|t| t.id.clone())
    }

    fn report_task_result(&mut self, result: DomainResult<()>) {
        if let Err(e) = result {
            self.status_message = Some(e.to_string());
        }
    }
}
