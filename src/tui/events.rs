use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use super::app::App;
use super::rendering::ui;
use crate::store::FileSource;

pub async fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.clear_status_message_if_expired();

        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key_event(app, key).await;
                }
                Event::Mouse(mouse) => handle_mouse_event(app, mouse),
                _ => {}
            }
        }

        if app.should_quit {
            tracing::info!("Quitting with {} file(s) loaded", app.store.files().len());
            return Ok(());
        }
    }
}

pub async fn handle_key_event(app: &mut App, key: KeyEvent) {
    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('q')) {
            app.toggle_help();
        }
        return;
    }

    if app.editing_pattern {
        match key.code {
            KeyCode::Enter => app.commit_pattern(),
            KeyCode::Esc => app.abort_pattern_edit(),
            KeyCode::Backspace => app.pattern_backspace(),
            KeyCode::Char(c) => app.handle_pattern_input(c),
            _ => {}
        }
        return;
    }

    if app.drag.is_dragging() {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => app.carry_step(-1),
            KeyCode::Down | KeyCode::Char('j') => app.carry_step(1),
            KeyCode::Char(' ') | KeyCode::Enter => app.finish_drag(),
            KeyCode::Esc => app.cancel_drag(),
            _ => {}
        }
        return;
    }

    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Up if shift => app.move_selected(-1),
        KeyCode::Down if shift => app.move_selected(1),
        KeyCode::Char('K') => app.move_selected(-1),
        KeyCode::Char('J') => app.move_selected(1),
        KeyCode::Up | KeyCode::Char('k') => app.previous(),
        KeyCode::Down | KeyCode::Char('j') => app.next(),
        KeyCode::Char(' ') => app.toggle_carry(),
        KeyCode::Char('d') | KeyCode::Delete => app.remove_selected(),
        KeyCode::Char('c') => app.clear_all(),
        KeyCode::Char('e') => app.start_pattern_edit(),
        KeyCode::Char('a') => app.apply_renames().await,
        KeyCode::Char('h') | KeyCode::F(1) => app.toggle_help(),
        _ => {}
    }
}

pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    if app.show_help || app.editing_pattern {
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => app.mouse_down(mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => app.mouse_drag(mouse.row),
        MouseEventKind::Up(MouseButton::Left) => app.mouse_up(mouse.row),
        MouseEventKind::ScrollDown => app.next(),
        MouseEventKind::ScrollUp => app.previous(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_list::LayoutPolicy;
    use crate::rename_engine::RenameConfig;
    use crate::store::FileStore;

    fn app_with_files(names: &[&str]) -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<_> = names
            .iter()
            .map(|name| {
                let path = dir.path().join(name);
                std::fs::write(&path, b"").unwrap();
                path
            })
            .collect();
        let mut store = FileStore::new(RenameConfig::default()).unwrap();
        store.add_paths(&paths);
        (dir, App::new(store, LayoutPolicy::default()))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn order(app: &App) -> Vec<String> {
        app.store
            .files()
            .iter()
            .map(|f| f.original_name.clone())
            .collect()
    }

    #[tokio::test]
    async fn keyboard_carry_matches_shift_move() {
        let (_dir, mut carried) = app_with_files(&["a.txt", "b.txt", "c.txt"]);
        carried.list_state.select(Some(2));
        handle_key_event(&mut carried, key(KeyCode::Char(' '))).await;
        handle_key_event(&mut carried, key(KeyCode::Up)).await;
        handle_key_event(&mut carried, key(KeyCode::Up)).await;
        handle_key_event(&mut carried, key(KeyCode::Char(' '))).await;

        let (_dir2, mut shifted) = app_with_files(&["a.txt", "b.txt", "c.txt"]);
        shifted.list_state.select(Some(2));
        handle_key_event(&mut shifted, KeyEvent::new(KeyCode::Up, KeyModifiers::SHIFT)).await;
        handle_key_event(&mut shifted, KeyEvent::new(KeyCode::Up, KeyModifiers::SHIFT)).await;

        assert_eq!(order(&carried), ["c.txt", "a.txt", "b.txt"]);
        assert_eq!(order(&carried), order(&shifted));
    }

    #[tokio::test]
    async fn escape_while_carrying_does_not_quit() {
        let (_dir, mut app) = app_with_files(&["a.txt", "b.txt"]);
        handle_key_event(&mut app, key(KeyCode::Char(' '))).await;
        handle_key_event(&mut app, key(KeyCode::Esc)).await;
        assert!(!app.should_quit);
        assert!(!app.drag.is_dragging());
        handle_key_event(&mut app, key(KeyCode::Esc)).await;
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn pattern_editing_swallows_shortcuts() {
        let (_dir, mut app) = app_with_files(&["a.txt"]);
        handle_key_event(&mut app, key(KeyCode::Char('e'))).await;
        handle_key_event(&mut app, key(KeyCode::Char('q'))).await;
        assert!(!app.should_quit);
        assert_eq!(app.pattern_input, "q");
        handle_key_event(&mut app, key(KeyCode::Enter)).await;
        assert_eq!(app.store.files()[0].new_name, "q.txt");
    }
}
