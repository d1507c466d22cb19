//! Draw functions for the burrow screen.
//!
//! Every function reads [AppState] and renders into the given area. The row and
//! details text is built by plain string helpers so it can be checked without a
//! terminal.

use crate::app::mode::Popup;
use crate::app::{AppState, ModeState};
use crate::core::FileEntry;
use crate::core::formatter::{fit_to_width, format_file_size, format_file_time, format_permissions};
use crate::utils::shorten_home_path;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const SELECTION_MARKER: &str = "► ";
const NO_MARKER: &str = "  ";

/// Current directory, home shortened, on the top line.
pub(crate) fn draw_header(frame: &mut Frame, app: &AppState, area: Rect) {
    let path = shorten_home_path(app.nav().current_dir());
    let line = Line::from(vec![
        Span::styled(" burrow ", Style::default().add_modifier(Modifier::REVERSED)),
        Span::raw(" "),
        Span::styled(path, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Visible window of the filtered listing with the selection highlighted.
pub(crate) fn draw_file_list(frame: &mut Frame, app: &AppState, area: Rect) {
    let nav = app.nav();
    let width = area.width as usize;

    if nav.shown_len() == 0 {
        let msg = if nav.query().is_empty() {
            "(empty directory)"
        } else {
            "No matches"
        };
        let hint = Paragraph::new(Span::styled(msg, Style::default().fg(Color::DarkGray)));
        frame.render_widget(hint, area);
        return;
    }

    let lines: Vec<Line> = nav
        .shown_entries()
        .enumerate()
        .skip(nav.scroll_offset())
        .take(area.height as usize)
        .map(|(idx, entry)| {
            let selected = idx == nav.selected_idx();
            let mut style = entry_style(entry);
            if selected {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Line::from(Span::styled(list_row(entry, selected, width), style))
        })
        .collect();

    frame.render_widget(Paragraph::new(Text::from(lines)), area);
}

/// Permissions, size and modification time of the selected entry.
pub(crate) fn draw_details(frame: &mut Frame, app: &AppState, area: Rect) {
    let text = app
        .nav()
        .selected_entry()
        .map(details_line)
        .unwrap_or_default();
    let para = Paragraph::new(Span::styled(
        fit_to_width(&text, area.width as usize),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(para, area);
}

/// Bottom line: the live status message, or the hint for the current mode.
pub(crate) fn draw_status_line(frame: &mut Frame, app: &AppState, area: Rect) {
    let (text, is_error) = app.status_line();
    let style = if is_error {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let para = Paragraph::new(Span::styled(fit_to_width(&text, area.width as usize), style));
    frame.render_widget(para, area);
}

/// Modal dialog for create, rename and delete.
pub(crate) fn draw_popup(frame: &mut Frame, popup: &Popup) {
    let area = frame.area();
    let width = area.width.saturating_sub(4).clamp(20, 60).min(area.width);
    let dialog = dialog_area(area, width, 3);
    let inner_width = dialog.width.saturating_sub(2) as usize;

    let border_style = if popup.kind().takes_text() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Red)
    };
    let block = Block::default()
        .title(Span::styled(popup.title(), border_style.add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Clear, dialog);

    if !popup.kind().takes_text() {
        let para = Paragraph::new(popup.prompt())
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(para, dialog);
        return;
    }

    let prompt = popup.prompt();
    let prompt_width = prompt.width();
    let field_width = inner_width.saturating_sub(prompt_width);
    let input = popup.input();
    let (visible, cursor_offset) = input_field_view(input.text(), input.cursor(), field_width);

    let line = Line::from(vec![
        Span::styled(prompt, Style::default().fg(Color::Gray)),
        Span::raw(visible),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), dialog);

    let cursor_x = dialog.x + 1 + (prompt_width + cursor_offset).min(inner_width) as u16;
    frame.set_cursor_position((cursor_x, dialog.y + 1));
}

/// Key binding overlay built from the configured keys.
pub(crate) fn draw_keybind_help(frame: &mut Frame, app: &AppState) {
    let keys = app.config().keys();
    let area = frame.area();

    let fmt_keys = |list: &[String]| list.join(", ");

    let sections: Vec<(&str, Vec<(String, &'static str)>)> = vec![
        (
            "Navigation",
            vec![
                (fmt_keys(keys.go_up()), "Move selection up"),
                (fmt_keys(keys.go_down()), "Move selection down"),
                (fmt_keys(keys.page_up()), "Page up"),
                (fmt_keys(keys.page_down()), "Page down"),
                (fmt_keys(keys.go_to_top()), "First entry"),
                (fmt_keys(keys.go_to_bottom()), "Last entry"),
                (fmt_keys(keys.go_parent()), "Go to parent directory"),
                (fmt_keys(keys.go_into_dir()), "Enter directory"),
            ],
        ),
        (
            "File",
            vec![
                (fmt_keys(keys.open_file()), "Enter directory / open in editor"),
                (fmt_keys(keys.search()), "Fuzzy search"),
                (fmt_keys(keys.create()), "Create file"),
                (fmt_keys(keys.create_directory()), "Create folder"),
                (fmt_keys(keys.rename()), "Rename"),
                (fmt_keys(keys.delete()), "Delete"),
            ],
        ),
        (
            "System",
            vec![
                (fmt_keys(keys.keybind_help()), "Toggle keybind help"),
                (fmt_keys(keys.quit()), "Quit"),
            ],
        ),
    ];

    let header_style = Style::default().add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    let key_col = sections
        .iter()
        .flat_map(|(_, rows)| rows.iter().map(|(k, _)| k.width()))
        .max()
        .unwrap_or(0)
        + 2;

    let mut lines: Vec<Line> = Vec::new();
    for (section_name, rows) in sections {
        if !lines.is_empty() {
            lines.push(Line::raw(""));
        }
        lines.push(Line::from(Span::styled(section_name, header_style)));
        for (k, desc) in rows {
            lines.push(Line::from(vec![
                Span::styled(fit_to_width(&k, key_col), key_style),
                Span::raw(desc),
            ]));
        }
    }

    let height = (lines.len() as u16 + 2).min(area.height);
    let width = area.width.saturating_sub(4).clamp(20, 72).min(area.width);
    let dialog = dialog_area(area, width, height);

    let block = Block::default()
        .title(" Keybindings ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Clear, dialog);
    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), dialog);
}

/// Draws whatever overlay the current mode needs.
pub(crate) fn draw_overlays(frame: &mut Frame, app: &AppState) {
    match app.mode() {
        ModeState::Popup(popup) => draw_popup(frame, popup),
        ModeState::Help => draw_keybind_help(frame, app),
        ModeState::Normal | ModeState::Search => {}
    }
}

// Text helpers

/// One row of the file list, exactly `width` columns wide.
pub fn list_row(entry: &FileEntry, selected: bool, width: usize) -> String {
    let marker = if selected { SELECTION_MARKER } else { NO_MARKER };
    let mut row = format!("{marker}{}", entry.name_str());
    if entry.is_dir() {
        row.push('/');
    }
    fit_to_width(&row, width)
}

/// `perms  size  mtime` for the details line.
pub fn details_line(entry: &FileEntry) -> String {
    let mut line = format!(
        "{}  {:>10}  {}",
        format_permissions(entry.mode(), entry.is_dir()),
        format_file_size(entry.size(), entry.is_dir()),
        format_file_time(entry.modified()),
    );
    if entry.is_symlink() {
        line.push_str("  (symlink)");
    }
    line
}

fn entry_style(entry: &FileEntry) -> Style {
    if entry.is_symlink() {
        Style::default().fg(Color::Cyan)
    } else if entry.is_dir() {
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
    } else if entry.is_executable() {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    }
}

/// Centered rectangle of at most `width` x `height` inside `area`.
fn dialog_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Tail of `input_text` that fits in `visible_width`, plus the cursor column inside it.
/// Keeps the end of the text visible when the input is wider than the field.
fn input_field_view(input_text: &str, cursor_pos: usize, visible_width: usize) -> (&str, usize) {
    let cursor_pos = cursor_pos.min(input_text.len());
    if input_text.width() <= visible_width {
        return (input_text, input_text[..cursor_pos].width());
    }

    let mut current_w = 0;
    let mut start = input_text.len();
    for (idx, ch) in input_text.char_indices().rev() {
        current_w += ch.width().unwrap_or(0);
        if current_w > visible_width {
            start = idx + ch.len_utf8();
            break;
        }
    }

    let cursor_offset = if cursor_pos < start {
        0
    } else {
        input_text[start..cursor_pos].width()
    };
    (&input_text[start..], cursor_offset)
}
