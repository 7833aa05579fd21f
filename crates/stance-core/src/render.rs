//! Record pages.
//!
//! A page is a heading plus labeled fields in a fixed order. Every field
//! value is drawn inside a ruled box so long statements stay visually
//! separated from the prompts around them. Widths are terminal columns, so
//! wide characters count double.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::constants::{
    COL_COMMENT, COL_EASY, COL_LABEL, COL_SUGGESTION, COL_TARGET, COL_TRANSFORMATION, NO, YES,
};
use crate::table::Table;

pub const BOX_WIDTH: usize = 76;
const PROGRESS_WIDTH: usize = 40;

/// Display-only label derived from the `easy` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    NotSpecified,
    Low,
    High,
}

impl Difficulty {
    pub fn from_easy(easy: Option<&str>) -> Self {
        match easy {
            Some(YES) => Self::Low,
            Some(NO) => Self::High,
            _ => Self::NotSpecified,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NotSpecified => "Not specified",
            Self::Low => "Low",
            Self::High => "High",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordView {
    pub heading: String,
    /// `(position, total)`, 1-based, for the progress bar.
    pub progress: Option<(usize, usize)>,
    pub fields: Vec<Field>,
}

fn field(table: &Table, row: usize, label: &'static str, column: &str) -> Field {
    Field {
        label,
        value: table.get(row, column).map(str::to_string),
    }
}

/// Annotation page for `cursor`, or `None` past the last row.
pub fn annotation_view(table: &Table, cursor: usize) -> Option<RecordView> {
    if cursor >= table.len() {
        return None;
    }
    Some(RecordView {
        heading: format!("Sentence {}", cursor + 1),
        progress: None,
        fields: vec![
            field(table, cursor, "Target", COL_TARGET),
            field(table, cursor, "Original", COL_COMMENT),
            field(table, cursor, "Stance", COL_LABEL),
            field(table, cursor, "Transformed", COL_TRANSFORMATION),
        ],
    })
}

/// Verification page for `cursor`, or `None` past the last row.
pub fn verification_view(table: &Table, cursor: usize) -> Option<RecordView> {
    if cursor >= table.len() {
        return None;
    }
    let difficulty = Difficulty::from_easy(table.get(cursor, COL_EASY));
    Some(RecordView {
        heading: format!("{} / {}", cursor + 1, table.len()),
        progress: Some((cursor + 1, table.len())),
        fields: vec![
            field(table, cursor, "Target Question", COL_TARGET),
            field(table, cursor, "Original Statement", COL_COMMENT),
            field(table, cursor, "Original Stance", COL_LABEL),
            field(table, cursor, "Transformed Statement", COL_TRANSFORMATION),
            field(table, cursor, "Annotator Suggestion", COL_SUGGESTION),
            Field {
                label: "Difficulty",
                value: Some(difficulty.label().to_string()),
            },
        ],
    })
}

impl RecordView {
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("== {} ==\n", self.heading));
        if let Some((pos, total)) = self.progress {
            out.push_str(&progress_bar(pos, total));
            out.push('\n');
        }
        for f in &self.fields {
            out.push('\n');
            out.push_str(f.label);
            out.push('\n');
            out.push_str(&boxed(f.value.as_deref().unwrap_or("")));
        }
        out
    }
}

pub fn progress_bar(pos: usize, total: usize) -> String {
    let filled = if total == 0 {
        PROGRESS_WIDTH
    } else {
        (pos.min(total) * PROGRESS_WIDTH) / total
    };
    format!(
        "[{}{}]",
        "#".repeat(filled),
        ".".repeat(PROGRESS_WIDTH - filled)
    )
}

/// Draw `text` wrapped inside a ruled box of `BOX_WIDTH` columns.
pub fn boxed(text: &str) -> String {
    let inner = BOX_WIDTH - 4;
    let rule = format!("+{}+\n", "-".repeat(BOX_WIDTH - 2));
    let mut out = rule.clone();
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        lines.extend(wrap(paragraph, inner));
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    for line in lines {
        let pad = inner.saturating_sub(line.width());
        out.push_str(&format!("| {line}{} |\n", " ".repeat(pad)));
    }
    out.push_str(&rule);
    out
}

fn wrap(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;
    for word in paragraph.split_whitespace() {
        for piece in split_to_width(word, width) {
            let piece_width = piece.width();
            if current_width > 0 && current_width + 1 + piece_width > width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if current_width > 0 {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(&piece);
            current_width += piece_width;
        }
    }
    if current_width > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Break a word that is wider than `width` into pieces that fit.
fn split_to_width(word: &str, width: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_width = 0usize;
    for ch in word.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if piece_width + ch_width > width && !piece.is_empty() {
            pieces.push(std::mem::take(&mut piece));
            piece_width = 0;
        }
        piece.push(ch);
        piece_width += ch_width;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}
