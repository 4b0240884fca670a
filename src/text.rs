//! Delimited text in and out of a grid: TSV copy of the selection, paste at a
//! cell, and loading CSV/TSV content.

use log::debug;

use crate::cell_ref::CellId;
use crate::error::{GridError, Result};
use crate::grid::Grid;
use crate::types::CellState;

/// Field separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
    Semicolon,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Semicolon => ';',
        }
    }

    /// Guess the separator from the first line of `text`.
    pub fn detect(text: &str) -> Self {
        let first = text.lines().next().unwrap_or("");
        if first.contains('\t') {
            Delimiter::Tab
        } else if first.matches(';').count() > first.matches(',').count() {
            Delimiter::Semicolon
        } else {
            Delimiter::Comma
        }
    }
}

/// Selected cells as TSV, covering the bounding range of the selection.
/// Unselected cells inside the range are left empty.
pub fn copy_selection(grid: &Grid) -> String {
    let Some(range) = grid.selected_range() else {
        return String::new();
    };
    let mut out = String::new();
    for row in range.min_row..=range.max_row {
        if row > range.min_row {
            out.push('\n');
        }
        for col in range.min_col..=range.max_col {
            if col > range.min_col {
                out.push('\t');
            }
            if !grid.selection().is_selected(row, col) {
                continue;
            }
            if let Some(text) = grid.item_text(row, col) {
                out.push_str(&escape_field(&text, '\t'));
            }
        }
    }
    out
}

/// Paste TSV text with its top-left field at `at`. Fields that land outside
/// the grid, on fixed cells or on read-only cells are skipped. Returns the
/// number of cells written.
pub fn paste_text(grid: &mut Grid, at: CellId, text: &str) -> usize {
    let mut written = 0;
    let mut redraw = grid.suspend_redraw();
    for (r, record) in parse_records(text, '\t').into_iter().enumerate() {
        let Some(row) = offset(at.row, r) else {
            break;
        };
        for (c, field) in record.into_iter().enumerate() {
            let Some(col) = offset(at.col, c) else {
                break;
            };
            let writable = redraw
                .cell_state(row, col)
                .is_some_and(|s| !s.intersects(CellState::FIXED | CellState::READ_ONLY));
            if writable && redraw.set_item_text(row, col, field) {
                written += 1;
            }
        }
    }
    debug!("pasted {written} cells at ({}, {})", at.row, at.col);
    written
}

/// Replace the grid's content with delimited text: one row per record, as
/// many columns as the widest record. Fixed and frozen counts are kept where
/// they still fit. Returns `(rows, cols)`.
pub fn load_delimited(grid: &mut Grid, text: &str, delimiter: Delimiter) -> Result<(u32, u32)> {
    if grid.is_virtual() {
        return Err(GridError::InvalidAddress { row: 0, col: 0 });
    }
    let records = parse_records(text, delimiter.as_char());
    let rows = u32::try_from(records.len()).map_err(|_| GridError::AllocationFailure {
        requested: records.len(),
    })?;
    let widest = records.iter().map(Vec::len).max().unwrap_or(0);
    let cols = u32::try_from(widest)
        .map_err(|_| GridError::AllocationFailure { requested: widest })?;

    let mut guard = grid.suspend_redraw();
    guard.set_row_count(0)?;
    guard.set_column_count(cols)?;
    guard.set_row_count(rows)?;
    for (row, record) in (0..rows).zip(records) {
        for (col, field) in (0..cols).zip(record) {
            guard.set_item_text(row, col, field);
        }
    }
    drop(guard);
    debug!("loaded {rows}x{cols} delimited cells");
    Ok((rows, cols))
}

fn offset(base: u32, delta: usize) -> Option<u32> {
    base.checked_add(u32::try_from(delta).ok()?)
}

/// Quote a field if it contains the separator, a line break or a quote.
pub(crate) fn escape_field(value: &str, sep: char) -> String {
    let needs_quoting = value.contains(sep)
        || value.contains('\n')
        || value.contains('\r')
        || value.contains('"');
    if needs_quoting {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Split delimited text into records of fields. Quoted fields may contain
/// separators, doubled quotes and line breaks. Blank lines are skipped.
pub(crate) fn parse_records(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == sep {
            fields.push(std::mem::take(&mut current));
        } else if ch == '\r' && chars.peek() == Some(&'\n') {
            // CRLF: the '\n' ends the record
        } else if ch == '\n' {
            fields.push(std::mem::take(&mut current));
            push_record(&mut records, std::mem::take(&mut fields));
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() || !fields.is_empty() {
        fields.push(current);
        push_record(&mut records, fields);
    }
    records
}

fn push_record(records: &mut Vec<Vec<String>>, fields: Vec<String>) {
    let blank = fields.len() == 1 && fields.first().is_some_and(String::is_empty);
    if !blank {
        records.push(fields);
    }
}
