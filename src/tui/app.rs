use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use ratatui::widgets::{ListState, ScrollbarState};

use crate::file_list::{DragController, DragModality, LayoutPolicy, ReorderDispatcher};
use crate::models::FileId;
use crate::rename_engine::ConfigBuilder;
use crate::store::{FileCommands, FileSource, FileStore, RenameOutcome};

const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug)]
pub struct App {
    pub store: FileStore,
    pub dispatcher: ReorderDispatcher,
    pub drag: DragController,
    pub layout: LayoutPolicy,
    pub list_state: ListState,
    pub scroll_state: ScrollbarState,
    /// Where rows were last drawn, for mapping mouse positions.
    pub list_area: Rect,
    pub row_height: u16,
    /// Row under a held mouse button that has not left it yet.
    pub pressed: Option<FileId>,
    pub show_help: bool,
    pub editing_pattern: bool,
    pub pattern_input: String,
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
    pub should_quit: bool,
}

impl App {
    pub fn new(store: FileStore, layout: LayoutPolicy) -> Self {
        let mut list_state = ListState::default();
        if !store.files().is_empty() {
            list_state.select(Some(0));
        }
        let pattern_input = store.rename_config().pattern.clone();

        Self {
            store,
            dispatcher: ReorderDispatcher::new(),
            drag: DragController::new(),
            layout,
            list_state,
            scroll_state: ScrollbarState::default(),
            list_area: Rect::default(),
            row_height: 1,
            pressed: None,
            show_help: false,
            editing_pattern: false,
            pattern_input,
            status_message: None,
            status_message_time: None,
            should_quit: false,
        }
    }

    pub fn selected_id(&self) -> Option<FileId> {
        self.list_state
            .selected()
            .and_then(|i| self.store.files().get(i))
            .map(|f| f.id)
    }

    pub fn next(&mut self) {
        let len = self.store.files().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.store.files().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_message_time = Some(Instant::now());
    }

    pub fn clear_status_message_if_expired(&mut self) {
        if let (Some(_), Some(time)) = (&self.status_message, self.status_message_time) {
            if time.elapsed() > STATUS_MESSAGE_TTL {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    pub fn remove_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        match self.store.remove_file(id) {
            Ok(()) => {
                self.clamp_selection();
                self.set_status_message("Removed 1 file".to_string());
            }
            Err(e) => self.set_status_message(e.to_string()),
        }
    }

    pub fn clear_all(&mut self) {
        if self.store.files().is_empty() {
            return;
        }
        self.drag.cancel();
        match self.store.clear_files() {
            Ok(()) => {
                self.clamp_selection();
                self.set_status_message("Cleared all files".to_string());
            }
            Err(e) => self.set_status_message(e.to_string()),
        }
    }

    /// Move the selected row by `delta` in one keyboard gesture.
    pub fn move_selected(&mut self, delta: isize) {
        let Some(id) = self.selected_id() else {
            return;
        };
        self.drag.pick_up(id, DragModality::Keyboard);
        self.drag.step(self.store.files(), delta);
        self.finish_drag();
    }

    pub fn toggle_carry(&mut self) {
        if self.drag.is_dragging() {
            self.finish_drag();
        } else if let Some(id) = self.selected_id() {
            self.drag.pick_up(id, DragModality::Keyboard);
            self.set_status_message("Moving file: arrows to choose, Space to drop".to_string());
        }
    }

    pub fn carry_step(&mut self, delta: isize) {
        self.drag.step(self.store.files(), delta);
        if let Some(over) = self.drag.active().and_then(|a| a.over) {
            self.select_id(over);
        }
    }

    pub fn finish_drag(&mut self) {
        let Some(end) = self.drag.drop() else {
            return;
        };
        self.dispatcher.dispatch(&mut self.store, end);
        self.select_id(end.source);
    }

    pub fn cancel_drag(&mut self) {
        let Some(end) = self.drag.cancel() else {
            return;
        };
        self.dispatcher.dispatch(&mut self.store, end);
        self.select_id(end.source);
    }

    pub fn mouse_down(&mut self, row: u16) {
        self.pressed = self.row_at(row);
        if let Some(id) = self.pressed {
            self.select_id(id);
        }
    }

    /// A press turns into a drag once the pointer reaches another row.
    pub fn mouse_drag(&mut self, row: u16) {
        let target = self.row_at(row);
        if !self.drag.is_dragging() {
            let Some(source) = self.pressed else {
                return;
            };
            if target == Some(source) {
                return;
            }
            if let Some(abandoned) = self.drag.pick_up(source, DragModality::Pointer) {
                self.dispatcher.dispatch(&mut self.store, abandoned);
            }
        }
        self.drag.hover(target);
    }

    pub fn mouse_up(&mut self, row: u16) {
        self.pressed = None;
        if self.drag.is_dragging() {
            let target = self.row_at(row);
            self.drag.hover(target);
            self.finish_drag();
        }
    }

    /// File under terminal row `row`, if it lies inside the drawn list.
    pub fn row_at(&self, row: u16) -> Option<FileId> {
        let area = self.list_area;
        if row < area.y || row >= area.y.saturating_add(area.height) {
            return None;
        }
        let row_height = self.row_height.max(1);
        let index = self.list_state.offset() + usize::from((row - area.y) / row_height);
        self.store.files().get(index).map(|f| f.id)
    }

    pub fn start_pattern_edit(&mut self) {
        self.pattern_input = self.store.rename_config().pattern.clone();
        self.editing_pattern = true;
    }

    pub fn handle_pattern_input(&mut self, c: char) {
        self.pattern_input.push(c);
    }

    pub fn pattern_backspace(&mut self) {
        self.pattern_input.pop();
    }

    pub fn abort_pattern_edit(&mut self) {
        self.editing_pattern = false;
        self.pattern_input = self.store.rename_config().pattern.clone();
    }

    pub fn commit_pattern(&mut self) {
        self.editing_pattern = false;
        let current = self.store.rename_config().clone();
        let result = ConfigBuilder::new()
            .pattern(self.pattern_input.clone())
            .start_number(current.start_number)
            .pad_width(current.pad_width)
            .sanitize(current.sanitize)
            .build()
            .and_then(|config| self.store.set_config(config));

        match result {
            Ok(()) => {
                tracing::info!("Rename pattern set to {:?}", self.pattern_input);
                self.set_status_message("Pattern updated".to_string());
            }
            Err(e) => self.set_status_message(format!("Invalid pattern: {e}")),
        }
    }

    pub async fn apply_renames(&mut self) {
        if self.drag.is_dragging() {
            return;
        }
        let outcomes = self.store.apply_renames().await;
        let renamed = outcomes.iter().filter(|o| o.is_success()).count();
        let failed = outcomes.iter().filter(|o| o.is_failure()).count();

        let message = if failed > 0 {
            format!("Renamed {renamed} file(s), {failed} failed")
        } else if renamed > 0 {
            format!("Renamed {renamed} file(s)")
        } else {
            "Nothing to rename".to_string()
        };
        if let Some(RenameOutcome::Failed { message: detail, .. }) =
            outcomes.iter().find(|o| matches!(o, RenameOutcome::Failed { .. }))
        {
            tracing::error!("First rename failure: {}", detail);
        }
        self.set_status_message(message);
    }

    fn select_id(&mut self, id: FileId) {
        if let Some(index) = self.store.position(id) {
            self.list_state.select(Some(index));
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.store.files().len();
        let selected = match self.list_state.selected() {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => Some(0),
        };
        self.list_state.select(selected);
    }
}
