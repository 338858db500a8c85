use crate::application::{App, AppMode, Page};
use crate::domain::Task;
use chrono::{Local, TimeZone};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    match app.page {
        Page::Blog => render_blog(f, app, chunks[1]),
        Page::Counter => render_counter(f, app, chunks[1]),
        Page::Catalogue => {
            if app.detail().is_some() {
                render_catalogue_detail(f, app, chunks[1]);
            } else {
                render_catalogue(f, app, chunks[1]);
            }
        }
        Page::Tasks => render_tasks(f, app, chunks[1]),
    }

    render_status_bar(f, app, chunks[2]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let tabs = [
        (Page::Blog, "1 Blog"),
        (Page::Counter, "2 Counter"),
        (Page::Catalogue, "3 Pokedex"),
        (Page::Tasks, "4 Tasks"),
    ];

    let mut spans = vec![Span::styled("tuidex ", Style::default().fg(Color::Cyan))];
    for (page, label) in tabs {
        let style = if app.page == page {
            Style::default().bg(Color::Cyan).fg(Color::Black)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", label), style));
        spans.push(Span::raw(" "));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_blog(f: &mut Frame, app: &App, area: Rect) {
    let body = Paragraph::new(format!(
        "Blog Post\n\nCurrently viewing post: {}\n\nPress 'e' to change the slug.",
        app.blog_slug
    ))
    .block(Block::default().borders(Borders::ALL).title("Blog"));
    f.render_widget(body, area);
}

fn render_counter(f: &mut Frame, app: &App, area: Rect) {
    let body = Paragraph::new(format!(
        "Interactive Counter\n\nCurrent Count: {}\n\nPress '+' or Space to increment. The count resets on every visit.",
        app.counter
    ))
    .block(Block::default().borders(Borders::ALL).title("Counter"))
    .style(Style::default().fg(Color::White));
    f.render_widget(body, area);
}

fn render_catalogue(f: &mut Frame, app: &App, area: Rect) {
    let page = app.catalogue_view.derive(&app.catalogue_items);

    let title = format!(
        "Pokedex | search: {} | type: {} | Page {} of {}",
        if app.catalogue_view.query.is_empty() {
            "-"
        } else {
            app.catalogue_view.query.as_str()
        },
        app.catalogue_view.category,
        app.catalogue_view.page,
        page.total_pages,
    );

    if page.visible.is_empty() {
        let empty = Paragraph::new("No Pokemon found matching those filters.")
            .block(Block::default().borders(Borders::ALL).title(title))
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("#").style(Style::default().fg(Color::Yellow)),
        Cell::from("Name").style(Style::default().fg(Color::Yellow)),
        Cell::from("Types").style(Style::default().fg(Color::Yellow)),
    ])
    .height(1);

    let mut rows = vec![header];
    for (index, item) in page.visible.iter().enumerate() {
        let style = if index == app.selected_card {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default()
        };
        rows.push(
            Row::new(vec![
                Cell::from(format!("{}", item.id)),
                Cell::from(item.name.clone()),
                Cell::from(item.categories.join(", ")),
            ])
            .style(style)
            .height(1),
        );
    }

    let widths = [
        Constraint::Length(5),
        Constraint::Length(20),
        Constraint::Min(10),
    ];
    let table = Table::new(rows, widths)
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(1);

    f.render_widget(table, area);
}

fn render_catalogue_detail(f: &mut Frame, app: &App, area: Rect) {
    let Some(item) = app.detail() else {
        return;
    };

    let text = format!(
        "{}\n\nArtwork:   {}\nTypes:     {}\nHeight:    {} cm\nWeight:    {} kg\nAbilities: {}\n\nEsc: back to Pokedex",
        item.name,
        item.image_url,
        item.categories.join(", "),
        item.height_dm * 10,
        item.weight_hg as f64 / 10.0,
        item.abilities.join(", "),
    );

    let card = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("#{}", item.id)),
        )
        .style(Style::default().fg(Color::White));
    f.render_widget(card, area);
}

fn render_tasks(f: &mut Frame, app: &App, area: Rect) {
    if app.tasks.is_empty() {
        let empty = Paragraph::new("No tasks yet. Press 'a' to add one.")
            .block(Block::default().borders(Borders::ALL).title("Task Master"))
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(empty, area);
        return;
    }

    let mut rows = Vec::with_capacity(app.tasks.len());
    for (index, task) in app.tasks.tasks().iter().enumerate() {
        let checkbox = if task.completed { "[x]" } else { "[ ]" };

        let mut text_style = Style::default();
        if task.completed {
            text_style = text_style
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT);
        }

        let mut row = Row::new(vec![
            Cell::from(checkbox),
            Cell::from(task.text.clone()).style(text_style),
            Cell::from(format_created_at(task)).style(Style::default().fg(Color::DarkGray)),
        ])
        .height(1);

        if index == app.selected_task {
            row = row.style(Style::default().bg(Color::Blue).fg(Color::White));
        }
        rows.push(row);
    }

    let widths = [
        Constraint::Length(3),
        Constraint::Min(20),
        Constraint::Length(16),
    ];
    let table = Table::new(rows, widths)
        .block(Block::default().borders(Borders::ALL).title("Task Master"))
        .column_spacing(1);

    f.render_widget(table, area);
}

fn format_created_at(task: &Task) -> String {
    match Local.timestamp_millis_opt(task.created_at as i64).single() {
        Some(when) => when.format("%b %e %H:%M").to_string(),
        None => String::new(),
    }
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status_text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                match app.page {
                    Page::Blog => "e: edit slug | 1-4: pages | F1/?: help | q: quit".to_string(),
                    Page::Counter => {
                        "+/Space: increment | 1-4: pages | F1/?: help | q: quit".to_string()
                    }
                    Page::Catalogue => {
                        "/: search | c: type filter | ←→: page | ↑↓: select | Enter: detail | q: quit"
                            .to_string()
                    }
                    Page::Tasks => {
                        "a: add | Space: toggle | d: delete | K/J: move | ↑↓: select | q: quit"
                            .to_string()
                    }
                }
            }
        }
        AppMode::BlogSlug => format!("Slug: {} (Enter to apply, Esc to cancel)", app.input),
        AppMode::CatalogueSearch => {
            format!("Search: {} (Enter to keep, Esc to clear)", app.input)
        }
        AppMode::TaskEntry => format!("New task: {} (Enter to add, Esc to cancel)", app.input),
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help"
            .to_string(),
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::BlogSlug => Style::default().fg(Color::Yellow),
            AppMode::CatalogueSearch => Style::default().fg(Color::Green),
            AppMode::TaskEntry => Style::default().fg(Color::Green),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(status, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("tuidex Help")
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> String {
    r#"TUIDEX KEY REFERENCE

=== PAGES ===
1               Blog post placeholder
2               Counter (resets on every visit)
3               Pokedex catalogue
4               Task list

=== BLOG ===
e               Edit the post slug

=== COUNTER ===
+ / Space       Increment the count

=== POKEDEX ===
/               Search by name (live, case-insensitive)
c               Cycle the type filter ("all" first)
Left/Right h/l  Previous / next page (disabled at the ends)
Up/Down k/j     Move the selection
Enter           Open the detail view
Esc             Close the detail view

=== TASKS ===
a               Add a task (blank input is rejected)
Space           Toggle completion of the selected task
d / Delete      Delete the selected task
K / J           Move the selected task up / down
Up/Down k/j     Move the selection

Tasks are saved to tuidex-store.json after every change and restored
on the next start.

=== GENERAL ===
F1 or ?         Show this help (scroll with arrows, PgUp/PgDn, Home)
q               Quit (from normal mode)"#
        .to_string()
}
