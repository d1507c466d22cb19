//! Display formatting for entry details in burrow.
//!
//! Sizes, timestamps and permission strings shown in the details line, plus the
//! width-exact text fitting used by the file list.

use chrono::{DateTime, Local};
use humansize::{BINARY, format_size};
use unicode_width::UnicodeWidthChar;

use std::time::SystemTime;

/// Formats the file size into a human-readable string, "-" for directories.
pub fn format_file_size(size: u64, is_dir: bool) -> String {
    if is_dir {
        "-".to_string()
    } else {
        format_size(size, BINARY)
    }
}

/// Formats the file modification time, "-" if unknown.
pub fn format_file_time(modified: Option<SystemTime>) -> String {
    modified
        .map(|mtime| {
            let dt: DateTime<Local> = DateTime::from(mtime);
            dt.format("%Y-%m-%d %H:%M").to_string()
        })
        .unwrap_or_else(|| "-".to_string())
}

/// Formats permission bits in the familiar `drwxr-xr-x` layout.
pub fn format_permissions(mode: u32, is_dir: bool) -> String {
    let mut chars = [if is_dir { 'd' } else { '-' }, '-', '-', '-', '-', '-', '-', '-', '-', '-'];
    for (i, shift) in [6u32, 3, 0].into_iter().enumerate() {
        let base = 1 + i * 3;
        if (mode >> (shift + 2)) & 1 != 0 {
            chars[base] = 'r';
        }
        if (mode >> (shift + 1)) & 1 != 0 {
            chars[base + 1] = 'w';
        }
        if (mode >> shift) & 1 != 0 {
            chars[base + 2] = 'x';
        }
    }
    chars.iter().collect()
}

/// Fits `line` to exactly `width` terminal columns.
///
/// Control characters are dropped, tabs expand to 4-column stops, text that would
/// overflow is cut with a trailing `~` and short text is padded with spaces.
pub fn fit_to_width(line: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut current_w = 0;
    let mut truncated = false;

    for ch in line.chars() {
        if ch == '\t' {
            let space_count = 4 - (current_w % 4);
            if current_w + space_count > width {
                truncated = true;
                break;
            }
            out.push_str(&" ".repeat(space_count));
            current_w += space_count;
            continue;
        }

        if ch.is_control() {
            continue;
        }

        let w = ch.width().unwrap_or(0);
        if current_w + w > width {
            truncated = true;
            break;
        }

        out.push(ch);
        current_w += w;
    }

    if truncated && width > 0 {
        while current_w + 1 > width {
            let Some(last) = out.pop() else { break };
            current_w -= last.width().unwrap_or(0);
        }
        out.push('~');
        current_w += 1;
    }

    if current_w < width {
        out.push_str(&" ".repeat(width - current_w));
    }
    out
}
