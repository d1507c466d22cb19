//! UI renderer implementation.
//!
//! Contains the top-level `render` entry point used by the terminal loop and the
//! layout helper that splits the screen into header, file list, details and status.
//!
//! This module should stay mostly "pure rendering": it reads state and produces
//! widgets. The only write is the layout metrics, so paging and scrolling follow
//! the real terminal size.

use crate::app::{AppState, LayoutMetrics};
use crate::ui::widgets;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

/// Render function which renders the entire terminal UI for burrow on each frame.
pub fn render(frame: &mut Frame, app: &mut AppState) {
    let area = frame.area();
    app.update_layout_metrics(LayoutMetrics::new(area.width, area.height));

    let [header, list, details, status] = layout_chunks(area);

    widgets::draw_header(frame, app, header);
    widgets::draw_file_list(frame, app, list);
    widgets::draw_details(frame, app, details);
    widgets::draw_status_line(frame, app, status);
    widgets::draw_overlays(frame, app);
}

/// Splits the screen into header, list, details and status rows.
///
/// The list receives every row the other three lines do not use.
pub fn layout_chunks(area: Rect) -> [Rect; 4] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2], chunks[3]]
}
