/// Height of the list content area, in terminal rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSize {
    pub height: u16,
    pub scrollable: bool,
}

/// Sizing rule for the file list panel.
///
/// Up to `max_visible_rows` items the panel grows with its content (never
/// below `min_panel_height`); past that it is clamped to exactly
/// `max_visible_rows` rows and the list scrolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutPolicy {
    pub max_visible_rows: usize,
    pub min_panel_height: u16,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self {
            max_visible_rows: 30,
            min_panel_height: 10,
        }
    }
}

impl LayoutPolicy {
    pub fn new(max_visible_rows: usize, min_panel_height: u16) -> Self {
        Self {
            max_visible_rows,
            min_panel_height,
        }
    }

    /// `row_height` is measured from a rendered row by the caller.
    pub fn panel_size(&self, item_count: usize, row_height: u16) -> PanelSize {
        if item_count == 0 {
            return PanelSize {
                height: self.min_panel_height,
                scrollable: false,
            };
        }

        if item_count > self.max_visible_rows {
            return PanelSize {
                height: rows_to_height(self.max_visible_rows, row_height),
                scrollable: true,
            };
        }

        PanelSize {
            height: rows_to_height(item_count, row_height).max(self.min_panel_height),
            scrollable: false,
        }
    }
}

fn rows_to_height(rows: usize, row_height: u16) -> u16 {
    let rows = u16::try_from(rows).unwrap_or(u16::MAX);
    rows.saturating_mul(row_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_uses_minimum() {
        let policy = LayoutPolicy::default();
        assert_eq!(
            policy.panel_size(0, 1),
            PanelSize {
                height: 10,
                scrollable: false
            }
        );
    }

    #[test]
    fn test_threshold_boundary() {
        let policy = LayoutPolicy::default();
        assert_eq!(
            policy.panel_size(30, 1),
            PanelSize {
                height: 30,
                scrollable: false
            }
        );
        assert_eq!(
            policy.panel_size(31, 1),
            PanelSize {
                height: 30,
                scrollable: true
            }
        );
    }

    #[test]
    fn test_huge_counts_saturate() {
        let policy = LayoutPolicy::new(usize::MAX, 0);
        let size = policy.panel_size(1_000_000, 2);
        assert_eq!(size.height, u16::MAX);
        assert!(!size.scrollable);
    }
}
