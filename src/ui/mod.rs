//! UI module for rendering the TUI

mod components;
mod confirmation;
mod page_view;
mod status_bar;

use crate::app::App;
use ratatui::Frame;

pub use page_view::{focus_order, PageView};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = app.page_area().intersection(frame.area());

    if app.has_navigated() {
        confirmation::draw(frame, area, app);
    } else {
        page_view::draw(frame, area, app);
    }

    status_bar::draw_status_bar(frame, app);
}
