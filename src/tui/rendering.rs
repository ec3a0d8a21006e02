use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, List, ListItem, ListState, Paragraph, Scrollbar,
        ScrollbarOrientation, ScrollbarState, Wrap,
    },
    Frame,
};

use crate::file_list::drag::ActiveDrag;
use crate::file_list::{
    BadgeCounts, IconCategory, ListView, PanelSize, RowDisplay, RowTone, StatusIcon, project,
};
use crate::store::FileSource;
use super::app::App;
use super::utils::centered_rect;

pub fn ui(f: &mut Frame, app: &mut App) {
    let view = project(app.store.files());
    let carrying = app.drag.active().copied();

    let items: Vec<ListItem> = match &view {
        ListView::Empty => Vec::new(),
        ListView::Populated { rows, .. } => rows
            .iter()
            .map(|row| ListItem::new(row_line(row, carrying.as_ref())))
            .collect(),
    };
    let row_height = items
        .first()
        .map(|item| u16::try_from(item.height()).unwrap_or(1))
        .unwrap_or(1)
        .max(1);
    let panel = app.layout.panel_size(items.len(), row_height);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(panel.height.saturating_add(2)),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, chunks[0], &view);
    render_pattern_bar(f, chunks[1], app);

    let list_area = if items.is_empty() {
        render_placeholder(f, chunks[2]);
        Rect::default()
    } else {
        render_file_list(
            f,
            chunks[2],
            items,
            panel,
            &mut app.list_state,
            &mut app.scroll_state,
        )
    };
    app.list_area = list_area;
    app.row_height = row_height;

    let selected_error = match &view {
        ListView::Populated { rows, .. } => app
            .list_state
            .selected()
            .and_then(|i| rows.get(i))
            .and_then(|row| row.tooltip),
        ListView::Empty => None,
    };
    render_status_bar(f, chunks[4], app, selected_error);

    if app.show_help {
        render_help_popup(f);
    }
}

pub fn render_header(f: &mut Frame, area: Rect, view: &ListView) {
    let (total, counts) = match view {
        ListView::Empty => (0, BadgeCounts::default()),
        ListView::Populated { total, counts, .. } => (*total, *counts),
    };

    let mut spans = vec![Span::styled(
        format!("Files ({total})"),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )];
    spans.extend(badge_spans(&counts));

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Batch Rename")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(header, area);
}

fn badge_spans(counts: &BadgeCounts) -> Vec<Span<'static>> {
    let badges = [
        (counts.changed, "will be renamed", Color::Cyan),
        (counts.duplicates, "duplicates", Color::Yellow),
        (counts.errors, "errors", Color::Red),
    ];

    badges
        .into_iter()
        .filter(|(count, _, _)| *count > 0)
        .flat_map(|(count, label, color)| {
            [
                Span::raw("  "),
                Span::styled(
                    format!(" {count} {label} "),
                    Style::default().fg(Color::Black).bg(color),
                ),
            ]
        })
        .collect()
}

pub fn render_pattern_bar(f: &mut Frame, area: Rect, app: &App) {
    let (text, style, border) = if app.editing_pattern {
        (
            format!("{}_", app.pattern_input),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            Color::Yellow,
        )
    } else if app.store.rename_config().pattern.is_empty() {
        (
            "[no pattern - press e to edit]".to_string(),
            Style::default().fg(Color::DarkGray),
            Color::Gray,
        )
    } else {
        (
            app.store.rename_config().pattern.clone(),
            Style::default().fg(Color::White),
            Color::Gray,
        )
    };

    let pattern = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Pattern ({name} {n} {ext})")
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(pattern, area);
}

fn render_placeholder(f: &mut Frame, area: Rect) {
    let placeholder = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "No files loaded",
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            "Pass files or folders on the command line to get started",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Files"));
    f.render_widget(placeholder, area);
}

/// Draws the rows and returns the inner area they occupy.
fn render_file_list(
    f: &mut Frame,
    area: Rect,
    items: Vec<ListItem>,
    panel: PanelSize,
    list_state: &mut ListState,
    scroll_state: &mut ScrollbarState,
) -> Rect {
    let total = items.len();
    let block = Block::default()
        .title("Files")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);

    let files_list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    f.render_stateful_widget(files_list, area, list_state);

    if panel.scrollable || total > usize::from(inner.height) {
        *scroll_state = ScrollbarState::new(total).position(list_state.selected().unwrap_or(0));
        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("^"))
            .end_symbol(Some("v"));
        f.render_stateful_widget(
            scrollbar,
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            scroll_state,
        );
    }

    inner
}

fn row_line<'a>(row: &RowDisplay<'a>, carrying: Option<&ActiveDrag>) -> Line<'a> {
    let grip = match carrying {
        Some(drag) if drag.source == row.id => {
            Span::styled("≡ ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        }
        Some(drag) if drag.over == Some(row.id) => {
            Span::styled("» ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        }
        _ => Span::styled("⋮ ", Style::default().fg(Color::DarkGray)),
    };

    let (tag, tag_color) = icon_tag(row.icon);
    let original_style = if row.strikethrough_original {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans = vec![
        grip,
        Span::styled(format!("{:>3} ", row.position), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{tag} "), Style::default().fg(tag_color)),
        Span::styled(row.original_name, original_style),
    ];

    if let Some(new_name) = row.highlighted_new {
        let new_color = match row.tone {
            RowTone::Duplicate => Color::Yellow,
            RowTone::Invalid => Color::Red,
            RowTone::Changed | RowTone::Unchanged => Color::Cyan,
        };
        spans.push(Span::styled(" → ", Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(
            new_name,
            Style::default().fg(new_color).add_modifier(Modifier::BOLD),
        ));
    }

    if let Some(status) = row.status {
        let (glyph, color) = status_glyph(status);
        spans.push(Span::raw(" "));
        spans.push(Span::styled(glyph, Style::default().fg(color)));
    }

    Line::from(spans)
}

fn icon_tag(icon: IconCategory) -> (&'static str, Color) {
    match icon {
        IconCategory::Image => ("IMG", Color::Green),
        IconCategory::Video => ("VID", Color::Magenta),
        IconCategory::Audio => ("AUD", Color::LightMagenta),
        IconCategory::Document => ("DOC", Color::Blue),
        IconCategory::Code => ("SRC", Color::Yellow),
        IconCategory::Archive => ("ARC", Color::LightRed),
        IconCategory::Generic => ("---", Color::Gray),
    }
}

fn status_glyph(status: StatusIcon) -> (&'static str, Color) {
    match status {
        StatusIcon::Duplicate => ("⧉ dup", Color::Yellow),
        StatusIcon::InvalidName => ("⚠ invalid", Color::Red),
        StatusIcon::Error => ("✗ error", Color::Red),
        StatusIcon::Confirmed => ("✓", Color::Green),
    }
}

pub fn render_status_bar(f: &mut Frame, area: Rect, app: &App, selected_error: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)].as_ref())
        .split(area);

    let (text, style) = if let Some(message) = &app.status_message {
        (message.clone(), Style::default().fg(Color::Cyan))
    } else if let Some(error) = selected_error {
        (error.to_string(), Style::default().fg(Color::Red))
    } else {
        (
            format!("{} file(s) loaded", app.store.files().len()),
            Style::default().fg(Color::Gray),
        )
    };

    let status = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, chunks[0]);

    let controls_text = if app.drag.is_dragging() {
        "↑/↓ target, Space drop, Esc cancel"
    } else if app.editing_pattern {
        "Enter apply pattern, Esc cancel"
    } else {
        "a apply, e pattern, h help, q quit"
    };
    let controls = Paragraph::new(controls_text)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));
    f.render_widget(controls, chunks[1]);
}

pub fn render_help_popup(f: &mut Frame) {
    let popup_area = centered_rect(60, 60, f.area());

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Batch Rename - Help",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from("Navigation:"),
        Line::from("  Up/k    - Move up"),
        Line::from("  Down/j  - Move down"),
        Line::from(""),
        Line::from("Reordering:"),
        Line::from("  Shift+Up/K, Shift+Down/J - Move file one row"),
        Line::from("  Space   - Pick up / drop file"),
        Line::from("  Esc     - Cancel move"),
        Line::from("  Mouse   - Drag a row onto another row"),
        Line::from(""),
        Line::from("Actions:"),
        Line::from("  e       - Edit rename pattern"),
        Line::from("  d/Del   - Remove file"),
        Line::from("  c       - Clear all files"),
        Line::from("  a       - Apply renames"),
        Line::from("  h       - Toggle this help"),
        Line::from("  q/Esc   - Quit application"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press Esc or h to close",
            Style::default().fg(Color::Gray),
        )]),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, popup_area);
    f.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_list::LayoutPolicy;
    use crate::rename_engine::RenameConfig;
    use crate::store::FileStore;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn empty_store_shows_placeholder_without_badges() {
        let store = FileStore::new(RenameConfig::default()).unwrap();
        let mut app = App::new(store, LayoutPolicy::default());
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();

        terminal.draw(|f| ui(f, &mut app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Files (0)"));
        assert!(text.contains("No files loaded"));
        assert!(!text.contains("will be renamed"));
        assert_eq!(app.list_area, Rect::default());
    }

    #[test]
    fn badges_show_counts() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<_> = ["a.txt", "b.txt"]
            .iter()
            .map(|name| {
                let path = dir.path().join(name);
                std::fs::write(&path, b"").unwrap();
                path
            })
            .collect();
        let config = RenameConfig {
            pattern: "x_{n}".to_string(),
            ..RenameConfig::default()
        };
        let mut store = FileStore::new(config).unwrap();
        store.add_paths(&paths);
        let mut app = App::new(store, LayoutPolicy::default());
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|f| ui(f, &mut app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Files (2)"));
        assert!(text.contains("2 will be renamed"));
        assert!(!text.contains("duplicates"));
        assert_eq!(app.list_area.height, 10);
    }
}
