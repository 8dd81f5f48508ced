use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::models::BankField;
use crate::rows::{BankRow, FieldSlot};

/// Width the field labels are padded to so values line up.
pub(crate) const LABEL_WIDTH: usize = 14;

/// Which input of which row has keyboard focus.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Focus {
    pub(crate) row: usize,
    pub(crate) field: BankField,
}

impl Default for Focus {
    fn default() -> Self {
        Self {
            row: 0,
            field: BankField::BankName,
        }
    }
}

impl Focus {
    fn field_index(&self) -> usize {
        BankField::ALL
            .iter()
            .position(|field| *field == self.field)
            .unwrap_or(0)
    }

    /// Move to the next field of the same row, wrapping to the top.
    pub(crate) fn next_field(&mut self) {
        let next = (self.field_index() + 1) % BankField::ALL.len();
        self.field = BankField::ALL[next];
    }

    /// Move to the previous field of the same row, wrapping to the bottom.
    pub(crate) fn previous_field(&mut self) {
        let len = BankField::ALL.len();
        let previous = (self.field_index() + len - 1) % len;
        self.field = BankField::ALL[previous];
    }

    /// Shift rows by `offset`, staying inside `0..row_count`.
    pub(crate) fn move_row(&mut self, offset: isize, row_count: usize) {
        if row_count == 0 {
            self.row = 0;
            return;
        }
        let max = row_count as isize - 1;
        self.row = (self.row as isize + offset).clamp(0, max) as usize;
    }

    /// Pull the row index back inside the sequence after a delete.
    pub(crate) fn clamp(&mut self, row_count: usize) {
        if self.row >= row_count {
            self.row = row_count.saturating_sub(1);
        }
    }

    /// Screen line of the focused field within a row form.
    pub(crate) fn line_offset(&self) -> u16 {
        self.field_index() as u16
    }
}

/// Render one field as `Label         : value  [id]`.
pub(crate) fn build_field_line(slot: &FieldSlot, focused: bool, editing: bool) -> Line<'static> {
    let value = &slot.input.value;
    let display = if value.is_empty() && !(focused && editing) {
        if slot.input.required {
            "<required>".to_string()
        } else {
            "<optional>".to_string()
        }
    } else {
        value.clone()
    };

    let style = if focused && editing {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else if focused {
        Style::default().fg(Color::Yellow)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(field_prefix(slot.label.text)),
        Span::styled(display, style),
        Span::styled(
            format!("  [{}]", slot.label.target),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// Every field line of `row`, in form order.
pub(crate) fn build_row_lines(
    row: &BankRow,
    focus: Option<BankField>,
    editing: bool,
) -> Vec<Line<'static>> {
    row.fields()
        .iter()
        .map(|slot| build_field_line(slot, focus == Some(slot.field), editing))
        .collect()
}

pub(crate) fn field_prefix(label: &str) -> String {
    format!("{:<width$}: ", label, width = LABEL_WIDTH)
}

/// Character length of the focused field's value.
pub(crate) fn value_len(row: &BankRow, field: BankField) -> usize {
    row.value(field).chars().count()
}
