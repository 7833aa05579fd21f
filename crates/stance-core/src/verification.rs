//! Verification workflow: pick the final transformation for each annotated
//! record, or drop the record from the output.
//!
//! The output keeps one slot per source row, addressed by source position.
//! Discarding a record tombstones its slot instead of removing it, so the
//! cursor keeps addressing the right slot however many records have been
//! dropped. Tombstoned slots are skipped when the table is written.

use crate::constants::{
    COL_SUGGESTION, COL_TRANSFORMATION, VERIFICATION_PROJECTED_COLUMNS,
    VERIFICATION_REQUIRED_COLUMNS,
};
use crate::error::{SessionError, TableError};
use crate::render::{verification_view, RecordView};
use crate::store::OutputStore;
use crate::table::{Cell, Table};

pub const MODE: &str = "verify";

/// Answer to "do you want to keep this example?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keep {
    No,
    Yes,
}

impl Keep {
    /// Display order. "No" comes first and is the default, so an empty
    /// answer never accepts a record.
    pub const OPTIONS: [Self; 2] = [Self::No, Self::Yes];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Yes => "Yes",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformationSource {
    Model,
    Annotator,
    Neither,
}

impl TransformationSource {
    pub const OPTIONS: [Self; 3] = [Self::Model, Self::Annotator, Self::Neither];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Model => "Model",
            Self::Annotator => "Annotator",
            Self::Neither => "Neither",
        }
    }
}

/// Where the kept transformation comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformationChoice {
    Model,
    Annotator,
    Custom(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationDecision {
    Discard,
    Keep(TransformationChoice),
}

/// Per-record form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VerificationForm {
    /// Keep radio showing its default, "No".
    #[default]
    AwaitingKeepDecision,
    Discarding,
    Keeping {
        source: Option<TransformationSource>,
        custom: String,
    },
}

impl VerificationForm {
    pub fn new() -> Self {
        Self::AwaitingKeepDecision
    }

    pub fn choose_keep(self, keep: Keep) -> Self {
        match (keep, self) {
            (Keep::No, _) => Self::Discarding,
            (Keep::Yes, keeping @ Self::Keeping { .. }) => keeping,
            (Keep::Yes, _) => Self::Keeping {
                source: None,
                custom: String::new(),
            },
        }
    }

    /// Select the transformation source. Ignored unless keeping.
    pub fn choose_source(self, choice: TransformationSource) -> Self {
        match self {
            Self::Keeping { custom, .. } => Self::Keeping {
                source: Some(choice),
                custom,
            },
            other => other,
        }
    }

    /// Set the replacement text. Ignored unless "Neither" is selected.
    pub fn write_custom(self, text: &str) -> Self {
        match self {
            Self::Keeping {
                source: Some(TransformationSource::Neither),
                ..
            } => Self::Keeping {
                source: Some(TransformationSource::Neither),
                custom: text.to_string(),
            },
            other => other,
        }
    }

    pub fn shows_sources(&self) -> bool {
        matches!(self, Self::Keeping { .. })
    }

    pub fn shows_custom(&self) -> bool {
        matches!(
            self,
            Self::Keeping {
                source: Some(TransformationSource::Neither),
                ..
            }
        )
    }

    /// The decision a submit would commit. Keeping without a chosen source
    /// is not submittable.
    pub fn decision(&self) -> Option<VerificationDecision> {
        match self {
            Self::AwaitingKeepDecision | Self::Discarding => Some(VerificationDecision::Discard),
            Self::Keeping { source: None, .. } => None,
            Self::Keeping {
                source: Some(source),
                custom,
            } => Some(VerificationDecision::Keep(match source {
                TransformationSource::Model => TransformationChoice::Model,
                TransformationSource::Annotator => TransformationChoice::Annotator,
                TransformationSource::Neither => TransformationChoice::Custom(custom.clone()),
            })),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotState {
    Pending,
    Kept(Cell),
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct OutputSlot {
    cells: Vec<Cell>,
    state: SlotState,
}

/// Projection of the source table onto the output columns, one slot per
/// source row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTable {
    columns: Vec<String>,
    slots: Vec<OutputSlot>,
}

impl OutputTable {
    pub fn project(source: &Table) -> Self {
        let mut columns: Vec<String> = VERIFICATION_PROJECTED_COLUMNS
            .iter()
            .map(|c| (*c).to_string())
            .collect();
        columns.push(COL_TRANSFORMATION.to_string());
        let slots = (0..source.len())
            .map(|row| OutputSlot {
                cells: VERIFICATION_PROJECTED_COLUMNS
                    .iter()
                    .map(|col| source.get(row, col).map(str::to_string))
                    .collect(),
                state: SlotState::Pending,
            })
            .collect();
        Self { columns, slots }
    }

    /// Record the final transformation for the source row at `position`.
    pub fn keep(&mut self, position: usize, transformation: Cell) -> bool {
        self.set_state(position, SlotState::Kept(transformation))
    }

    /// Drop the source row at `position` from every later write.
    pub fn discard(&mut self, position: usize) -> bool {
        self.set_state(position, SlotState::Discarded)
    }

    fn set_state(&mut self, position: usize, state: SlotState) -> bool {
        match self.slots.get_mut(position) {
            Some(slot) => {
                slot.state = state;
                true
            }
            None => false,
        }
    }

    /// Number of rows a write emits.
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.state != SlotState::Discarded)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn count(&self, pred: impl Fn(&SlotState) -> bool) -> usize {
        self.slots.iter().filter(|s| pred(&s.state)).count()
    }

    /// Surviving rows in source order. Undecided rows carry a null
    /// transformation.
    pub fn to_table(&self) -> Result<Table, TableError> {
        let mut table = Table::new(self.columns.clone());
        for slot in &self.slots {
            let transformation = match &slot.state {
                SlotState::Discarded => continue,
                SlotState::Pending => None,
                SlotState::Kept(value) => value.clone(),
            };
            let mut cells = slot.cells.clone();
            cells.push(transformation);
            table.push_row(cells)?;
        }
        Ok(table)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerificationSummary {
    pub kept: usize,
    pub discarded: usize,
    pub pending: usize,
}

/// State of a verification pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationSession {
    source: Table,
    output: OutputTable,
    cursor: usize,
    store: OutputStore,
}

impl VerificationSession {
    pub fn open(source: Table, store: OutputStore) -> Result<Self, SessionError> {
        if let Some(missing) = source
            .missing_columns(VERIFICATION_REQUIRED_COLUMNS)
            .into_iter()
            .next()
        {
            return Err(SessionError::MissingColumn(missing));
        }
        store.prepare()?;
        let output = OutputTable::project(&source);
        Ok(Self {
            source,
            output,
            cursor: 0,
            store,
        })
    }

    pub fn source(&self) -> &Table {
        &self.source
    }

    pub fn output(&self) -> &OutputTable {
        &self.output
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.source.len()
    }

    pub fn store(&self) -> &OutputStore {
        &self.store
    }

    pub fn current_view(&self) -> Option<RecordView> {
        verification_view(&self.source, self.cursor)
    }

    /// Transformation text `choice` resolves to for the current record.
    pub fn resolve(&self, choice: &TransformationChoice) -> Cell {
        match choice {
            TransformationChoice::Model => self
                .source
                .get(self.cursor, COL_TRANSFORMATION)
                .map(str::to_string),
            TransformationChoice::Annotator => self
                .source
                .get(self.cursor, COL_SUGGESTION)
                .map(str::to_string),
            TransformationChoice::Custom(text) => Some(text.clone()),
        }
    }

    /// Apply `decision` to the current record, rewrite the output file, and
    /// return the session positioned at the next record.
    pub fn submit(mut self, decision: &VerificationDecision) -> Result<Self, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Complete(self.cursor));
        }
        let position = self.cursor;
        match decision {
            VerificationDecision::Discard => self.output.discard(position),
            VerificationDecision::Keep(choice) => {
                let transformation = self.resolve(choice);
                self.output.keep(position, transformation)
            }
        };
        self.store.write(&self.output.to_table()?)?;
        self.cursor += 1;
        Ok(self)
    }

    /// Write the output table as it stands.
    pub fn flush(&self) -> Result<(), SessionError> {
        self.store.write(&self.output.to_table()?)?;
        Ok(())
    }

    pub fn summary(&self) -> VerificationSummary {
        VerificationSummary {
            kept: self.output.count(|s| matches!(s, SlotState::Kept(_))),
            discarded: self.output.count(|s| *s == SlotState::Discarded),
            pending: self.output.count(|s| *s == SlotState::Pending),
        }
    }
}
