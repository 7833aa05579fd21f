//! Annotation workflow: judge each model transformation and optionally
//! suggest a better one.

use crate::constants::{
    ANNOTATION_OUTPUT_COLUMNS, ANNOTATION_REQUIRED_COLUMNS, COL_ACCEPTABLE, COL_EASY,
    COL_SUGGESTION, NO, YES,
};
use crate::error::SessionError;
use crate::render::{annotation_view, RecordView};
use crate::store::OutputStore;
use crate::table::{Cell, Table};

pub const MODE: &str = "annotate";

/// Answer to "does the transformation reflect the opposite stance?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptability {
    Yes,
    No,
}

impl Acceptability {
    /// Options in display order. The first one is the default.
    pub const OPTIONS: [Self; 2] = [Self::Yes, Self::No];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yes => YES,
            Self::No => NO,
        }
    }
}

/// Answer to "was the transformation easy to produce?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    Yes,
    No,
}

impl Ease {
    pub const OPTIONS: [Self; 2] = [Self::Yes, Self::No];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yes => YES,
            Self::No => NO,
        }
    }
}

/// A submittable annotation for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationDecision {
    Accept,
    Reject {
        suggestion: String,
        easy: Option<Ease>,
    },
}

impl AnnotationDecision {
    /// `(acceptable, suggestion, easy)` cells. A rejection always carries a
    /// suggestion string, possibly empty; `easy` only rides along with a
    /// non-empty suggestion.
    fn cells(&self) -> (Cell, Cell, Cell) {
        match self {
            Self::Accept => (Some(YES.to_string()), None, None),
            Self::Reject { suggestion, easy } => {
                let easy = if suggestion.is_empty() {
                    None
                } else {
                    easy.map(|e| e.as_str().to_string())
                };
                (Some(NO.to_string()), Some(suggestion.clone()), easy)
            }
        }
    }
}

/// Per-record form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AnnotationForm {
    #[default]
    AwaitingChoice,
    Accepted,
    Rejected {
        suggestion: String,
        easy: Option<Ease>,
    },
}

impl AnnotationForm {
    pub fn new() -> Self {
        Self::AwaitingChoice
    }

    /// Select an acceptability option. Re-selecting "No" keeps the text
    /// already entered.
    pub fn choose(self, choice: Acceptability) -> Self {
        match (choice, self) {
            (Acceptability::Yes, _) => Self::Accepted,
            (Acceptability::No, rejected @ Self::Rejected { .. }) => rejected,
            (Acceptability::No, _) => Self::Rejected {
                suggestion: String::new(),
                easy: None,
            },
        }
    }

    /// Set the suggestion text. Ignored unless "No" was chosen.
    pub fn suggest(self, text: &str) -> Self {
        match self {
            Self::Rejected { easy, .. } => Self::Rejected {
                suggestion: text.to_string(),
                easy,
            },
            other => other,
        }
    }

    /// Set the ease answer. Ignored until a non-empty suggestion exists.
    pub fn rate_ease(self, ease: Ease) -> Self {
        match self {
            Self::Rejected { suggestion, .. } if !suggestion.is_empty() => Self::Rejected {
                suggestion,
                easy: Some(ease),
            },
            other => other,
        }
    }

    pub fn shows_suggestion(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    pub fn shows_ease(&self) -> bool {
        matches!(self, Self::Rejected { suggestion, .. } if !suggestion.is_empty())
    }

    /// The decision this form would submit, if a choice has been made.
    pub fn decision(&self) -> Option<AnnotationDecision> {
        match self {
            Self::AwaitingChoice => None,
            Self::Accepted => Some(AnnotationDecision::Accept),
            Self::Rejected { suggestion, easy } => Some(AnnotationDecision::Reject {
                suggestion: suggestion.clone(),
                easy: *easy,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotationSummary {
    pub accepted: usize,
    pub rejected: usize,
    pub pending: usize,
}

/// State of an annotation pass: the working table, the cursor, and where
/// the table is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationSession {
    table: Table,
    cursor: usize,
    store: OutputStore,
}

impl AnnotationSession {
    /// Start a pass over `table`. Fails on missing input columns; appends
    /// the annotation columns when absent and creates the output directory.
    pub fn open(mut table: Table, store: OutputStore) -> Result<Self, SessionError> {
        if let Some(missing) = table
            .missing_columns(ANNOTATION_REQUIRED_COLUMNS)
            .into_iter()
            .next()
        {
            return Err(SessionError::MissingColumn(missing));
        }
        for column in ANNOTATION_OUTPUT_COLUMNS {
            table.ensure_column(column);
        }
        store.prepare()?;
        Ok(Self {
            table,
            cursor: 0,
            store,
        })
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.table.len()
    }

    pub fn store(&self) -> &OutputStore {
        &self.store
    }

    pub fn current_view(&self) -> Option<RecordView> {
        annotation_view(&self.table, self.cursor)
    }

    /// Commit `decision` for the record at the cursor, rewrite the output
    /// file, and return the session positioned at the next record.
    pub fn submit(mut self, decision: &AnnotationDecision) -> Result<Self, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Complete(self.cursor));
        }
        let (acceptable, suggestion, easy) = decision.cells();
        self.table.set(self.cursor, COL_ACCEPTABLE, acceptable);
        self.table.set(self.cursor, COL_SUGGESTION, suggestion);
        self.table.set(self.cursor, COL_EASY, easy);
        self.store.write(&self.table)?;
        self.cursor += 1;
        Ok(self)
    }

    /// Write the table as it stands. Used when a pass ends without any
    /// submission, so the output file still exists.
    pub fn flush(&self) -> Result<(), SessionError> {
        self.store.write(&self.table)?;
        Ok(())
    }

    pub fn summary(&self) -> AnnotationSummary {
        let mut summary = AnnotationSummary::default();
        for row in 0..self.table.len() {
            match self.table.get(row, COL_ACCEPTABLE) {
                Some(YES) => summary.accepted += 1,
                Some(NO) => summary.rejected += 1,
                _ => summary.pending += 1,
            }
        }
        summary
    }
}
