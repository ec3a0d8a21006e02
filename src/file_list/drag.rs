use crate::models::{FileId, FileItem};

/// Identifies one drag gesture. Strictly increasing per controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GestureId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragModality {
    Pointer,
    Keyboard,
}

/// Final event of a gesture. `target` is `None` when the drop landed nowhere
/// or the gesture was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragEnd {
    pub gesture: GestureId,
    pub source: FileId,
    pub target: Option<FileId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveDrag {
    pub gesture: GestureId,
    pub source: FileId,
    pub over: Option<FileId>,
    pub modality: DragModality,
}

/// Sortable-list gesture state shared by pointer and keyboard input.
#[derive(Debug, Default)]
pub struct DragController {
    next_gesture: u64,
    active: Option<ActiveDrag>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&ActiveDrag> {
        self.active.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Start a gesture on `source`. An unfinished gesture is cancelled first
    /// and its end event returned.
    pub fn pick_up(&mut self, source: FileId, modality: DragModality) -> Option<DragEnd> {
        let abandoned = self.cancel();

        self.next_gesture += 1;
        self.active = Some(ActiveDrag {
            gesture: GestureId(self.next_gesture),
            source,
            over: Some(source),
            modality,
        });
        tracing::trace!("Picked up {} via {:?}", source, modality);
        abandoned
    }

    pub fn hover(&mut self, target: Option<FileId>) {
        if let Some(active) = self.active.as_mut() {
            active.over = target;
        }
    }

    /// Keyboard step: move the drop target `delta` rows from where it is now,
    /// clamped to the list.
    pub fn step(&mut self, files: &[FileItem], delta: isize) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if files.is_empty() {
            return;
        }

        let anchor = active.over.unwrap_or(active.source);
        let Some(current) = files.iter().position(|f| f.id == anchor) else {
            return;
        };

        let last = files.len() - 1;
        let next = current.saturating_add_signed(delta).min(last);
        active.over = Some(files[next].id);
    }

    pub fn drop(&mut self) -> Option<DragEnd> {
        self.active.take().map(|active| DragEnd {
            gesture: active.gesture,
            source: active.source,
            target: active.over,
        })
    }

    pub fn cancel(&mut self) -> Option<DragEnd> {
        self.active.take().map(|active| DragEnd {
            gesture: active.gesture,
            source: active.source,
            target: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(count: u64) -> Vec<FileItem> {
        (1..=count)
            .map(|n| FileItem::new(FileId(n), format!("file{n}.txt")))
            .collect()
    }

    #[test]
    fn test_gesture_ids_increase() {
        let mut drag = DragController::new();
        drag.pick_up(FileId(1), DragModality::Pointer);
        let first = drag.drop().unwrap();
        drag.pick_up(FileId(1), DragModality::Keyboard);
        let second = drag.drop().unwrap();
        assert!(second.gesture > first.gesture);
    }

    #[test]
    fn test_step_clamps_to_list() {
        let files = files(3);
        let mut drag = DragController::new();
        drag.pick_up(FileId(2), DragModality::Keyboard);
        drag.step(&files, -5);
        assert_eq!(drag.active().unwrap().over, Some(FileId(1)));
        drag.step(&files, 10);
        assert_eq!(drag.active().unwrap().over, Some(FileId(3)));
    }

    #[test]
    fn test_pick_up_cancels_unfinished_gesture() {
        let mut drag = DragController::new();
        drag.pick_up(FileId(1), DragModality::Pointer);
        drag.hover(Some(FileId(2)));
        let abandoned = drag.pick_up(FileId(3), DragModality::Pointer).unwrap();
        assert_eq!(abandoned.source, FileId(1));
        assert_eq!(abandoned.target, None);
    }
}
