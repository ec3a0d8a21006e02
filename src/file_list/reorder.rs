use crate::file_list::drag::{DragEnd, GestureId};
use crate::models::FileItem;
use crate::store::{FileCommands, FileSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderRequest {
    pub old_index: usize,
    pub new_index: usize,
}

/// Turns drag-end events into at most one `reorder_files` call per gesture.
#[derive(Debug, Default)]
pub struct ReorderDispatcher {
    last_gesture: Option<GestureId>,
}

impl ReorderDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve an event against the current order without side effects.
    pub fn resolve(files: &[FileItem], event: &DragEnd) -> Option<ReorderRequest> {
        let target = event.target?;
        if target == event.source {
            return None;
        }

        let old_index = files.iter().position(|f| f.id == event.source);
        let new_index = files.iter().position(|f| f.id == target);
        match (old_index, new_index) {
            (Some(old_index), Some(new_index)) => Some(ReorderRequest {
                old_index,
                new_index,
            }),
            _ => {
                tracing::debug!(
                    "Ignoring stale drag end {:?}: {} -> {}",
                    event.gesture,
                    event.source,
                    target
                );
                None
            }
        }
    }

    pub fn dispatch<S>(&mut self, store: &mut S, event: DragEnd) -> Option<ReorderRequest>
    where
        S: FileSource + FileCommands + ?Sized,
    {
        if self.last_gesture.is_some_and(|last| event.gesture <= last) {
            tracing::debug!("Drag end for {:?} already handled", event.gesture);
            return None;
        }
        self.last_gesture = Some(event.gesture);

        let request = Self::resolve(store.files(), &event)?;
        match store.reorder_files(request.old_index, request.new_index) {
            Ok(()) => Some(request),
            Err(e) => {
                tracing::warn!("Reorder {:?} rejected: {}", request, e);
                None
            }
        }
    }
}
