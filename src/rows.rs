//! Ordered bank rows with position-derived identifiers.
//!
//! Each row owns one input/label pair per [`BankField`]. The field itself never
//! changes; the position and every identifier derived from it are recomputed
//! by [`RowSequence::reindex`] after each structural change.

use tracing::{debug, info, warn};

use crate::error::{RankerError, Result};
use crate::models::BankField;

/// Text input belonging to one field of one row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputHandle {
    pub id: String,
    pub value: String,
    pub required: bool,
}

/// Label paired with an input. `target` must always equal the input's id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelHandle {
    pub target: String,
    pub text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSlot {
    pub field: BankField,
    pub input: InputHandle,
    pub label: LabelHandle,
}

impl FieldSlot {
    fn blank(field: BankField) -> Self {
        Self {
            field,
            input: InputHandle {
                id: String::new(),
                value: String::new(),
                required: field.required(),
            },
            label: LabelHandle {
                target: String::new(),
                text: field.label(),
            },
        }
    }

    fn assign_position(&mut self, position: usize) {
        let id = format!("{}-{}", self.field.name(), position);
        self.label.target = id.clone();
        self.input.id = id;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankRow {
    position: usize,
    heading: String,
    fields: Vec<FieldSlot>,
}

impl BankRow {
    /// A fresh row with every field empty, not yet numbered.
    fn template() -> Self {
        Self {
            position: 0,
            heading: String::new(),
            fields: BankField::ALL.iter().copied().map(FieldSlot::blank).collect(),
        }
    }

    /// 1-based display position.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn fields(&self) -> &[FieldSlot] {
        &self.fields
    }

    pub fn slot(&self, field: BankField) -> Option<&FieldSlot> {
        self.fields.iter().find(|slot| slot.field == field)
    }

    fn slot_mut(&mut self, field: BankField) -> Option<&mut FieldSlot> {
        self.fields.iter_mut().find(|slot| slot.field == field)
    }

    pub fn value(&self, field: BankField) -> &str {
        self.slot(field)
            .map(|slot| slot.input.value.as_str())
            .unwrap_or("")
    }

    /// Replace a field value outright.
    pub fn set_value(&mut self, field: BankField, value: impl Into<String>) {
        if let Some(slot) = self.slot_mut(field) {
            slot.input.value = value.into();
        }
    }

    /// Append a typed character, rejecting ones the field does not accept.
    pub fn push_char(&mut self, field: BankField, ch: char) -> bool {
        if !field.accepts(ch) {
            return false;
        }
        match self.slot_mut(field) {
            Some(slot) => {
                slot.input.value.push(ch);
                true
            }
            None => false,
        }
    }

    pub fn backspace(&mut self, field: BankField) {
        if let Some(slot) = self.slot_mut(field) {
            slot.input.value.pop();
        }
    }

    /// True when every required input has a value.
    pub fn is_complete(&self) -> bool {
        self.fields
            .iter()
            .all(|slot| !slot.input.required || !slot.input.value.is_empty())
    }

    fn assign_position(&mut self, position: usize) {
        self.position = position;
        self.heading = format!("Bank #{position}");
        for slot in &mut self.fields {
            slot.assign_position(position);
        }
    }
}

/// The form's bank rows. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSequence {
    rows: Vec<BankRow>,
}

impl Default for RowSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl RowSequence {
    /// Start with the single row present on a fresh form.
    pub fn new() -> Self {
        let mut sequence = Self {
            rows: vec![BankRow::template()],
        };
        sequence.reindex();
        sequence
    }

    /// Start with `count` empty rows (at least one), numbered in one pass.
    pub fn with_rows(count: usize) -> Self {
        let mut sequence = Self {
            rows: vec![BankRow::template(); count.max(1)],
        };
        sequence.reindex();
        sequence
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[BankRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&BankRow> {
        self.rows.get(index)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut BankRow> {
        self.rows.get_mut(index)
    }

    /// Append an empty row at the end and renumber. Returns its 0-based index.
    pub fn add_row(&mut self) -> usize {
        self.rows.push(BankRow::template());
        self.reindex();
        info!(rows = self.rows.len(), "added bank row");
        self.rows.len() - 1
    }

    /// Remove the row at `index` and renumber. The last remaining row can
    /// never be removed.
    pub fn delete_row(&mut self, index: usize) -> Result<()> {
        if self.rows.len() <= 1 {
            warn!("refused to delete the only bank row");
            return Err(RankerError::LastRow);
        }
        if index >= self.rows.len() {
            return Err(RankerError::UnknownRow(index + 1));
        }
        self.rows.remove(index);
        self.reindex();
        info!(removed = index + 1, rows = self.rows.len(), "deleted bank row");
        Ok(())
    }

    /// Number rows `1..=N` in current order and rebuild every identifier.
    pub fn reindex(&mut self) {
        for (index, row) in self.rows.iter_mut().enumerate() {
            row.assign_position(index + 1);
        }
        debug!(rows = self.rows.len(), "reindexed bank rows");
    }
}
