//! Rename-preview list: per-row projection, panel sizing and reorder dispatch.

pub mod drag;
pub mod layout;
pub mod projection;
pub mod reorder;

pub use drag::{DragController, DragEnd, DragModality, GestureId};
pub use layout::{LayoutPolicy, PanelSize};
pub use projection::{BadgeCounts, IconCategory, ListView, RowDisplay, RowTone, StatusIcon, project};
pub use reorder::{ReorderDispatcher, ReorderRequest};
