//! Screen geometry for the page preview
//!
//! The preview maps page pixels onto terminal cells. Every conversion
//! between the two goes through this module.
//!
//! # Layout
//!
//! ```text
//! Row 0..H-1:  Page view (pinned header on top, page flow below)
//! Row H-1:     Status bar (1 row)
//! ```

/// Page pixels per terminal row
pub const ROW_PX: f64 = 18.0;
/// Page pixels per terminal column
pub const COL_PX: f64 = 9.0;
/// Height of the status bar
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Screen area used for mouse event handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiArea {
    /// The rendered page
    Page,
    /// Status bar on the last row
    StatusBar,
}

impl UiArea {
    /// Area containing `mouse_row` on a terminal `terminal_height` rows tall
    pub fn at_row(mouse_row: u16, terminal_height: u16) -> Self {
        if mouse_row >= Self::page_height(terminal_height) {
            UiArea::StatusBar
        } else {
            UiArea::Page
        }
    }

    /// Rows available to the page view
    #[inline]
    pub const fn page_height(terminal_height: u16) -> u16 {
        terminal_height.saturating_sub(STATUS_BAR_HEIGHT)
    }
}

/// Convert a terminal size to a viewport size in page pixels
pub fn viewport_px(columns: u16, rows: u16) -> (f64, f64) {
    (
        f64::from(columns) * COL_PX,
        f64::from(UiArea::page_height(rows)) * ROW_PX,
    )
}

/// Screen row of a page offset relative to the viewport top, if it lies below it
pub fn px_to_row(offset_px: f64) -> Option<u16> {
    if offset_px < 0.0 {
        return None;
    }
    let row = (offset_px / ROW_PX).floor();
    (row <= f64::from(u16::MAX)).then_some(row as u16)
}

/// Rows covered by a box `height_px` tall, at least one
pub fn px_to_rows(height_px: f64) -> u16 {
    ((height_px / ROW_PX).ceil().max(1.0)).min(f64::from(u16::MAX)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_row() {
        assert_eq!(UiArea::at_row(0, 30), UiArea::Page);
        assert_eq!(UiArea::at_row(28, 30), UiArea::Page);
        assert_eq!(UiArea::at_row(29, 30), UiArea::StatusBar);
    }

    #[test]
    fn test_page_height_saturates() {
        assert_eq!(UiArea::page_height(30), 29);
        assert_eq!(UiArea::page_height(0), 0);
    }

    #[test]
    fn test_viewport_px() {
        assert_eq!(viewport_px(80, 31), (720.0, 540.0));
        assert_eq!(viewport_px(120, 41), (1080.0, 720.0));
    }

    #[test]
    fn test_px_to_row() {
        assert_eq!(px_to_row(0.0), Some(0));
        assert_eq!(px_to_row(17.9), Some(0));
        assert_eq!(px_to_row(18.0), Some(1));
        assert_eq!(px_to_row(-1.0), None);
    }

    #[test]
    fn test_px_to_rows_at_least_one() {
        assert_eq!(px_to_rows(0.0), 1);
        assert_eq!(px_to_rows(18.0), 1);
        assert_eq!(px_to_rows(54.0), 3);
        assert_eq!(px_to_rows(60.0), 4);
    }
}
