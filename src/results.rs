//! Ranked results table with a hideable points column.

use ratatui::layout::Constraint;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Row, Table};

use crate::models::RankedBank;

/// One rendered line of the results table.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub rank: String,
    pub name: String,
    pub ldr: String,
    /// Raw score kept off-screen until the points column is revealed.
    pub stored_points: String,
    pub points_text: String,
}

impl ResultRow {
    fn from_ranked(bank: &RankedBank) -> Self {
        Self {
            rank: bank.rank.to_string(),
            name: bank.name.clone(),
            ldr: format!("{} %", bank.ldr),
            stored_points: bank.total_points.to_string(),
            points_text: String::new(),
        }
    }
}

/// View state for the results area. `points_visible` is the single switch
/// every points cell and the column header follow.
#[derive(Debug, Clone, Default)]
pub struct ResultsView {
    rows: Vec<ResultRow>,
    visible: bool,
    points_visible: bool,
}

impl ResultsView {
    /// Replace the table with `ranked`, in the order received, and reveal the
    /// results area with points hidden.
    pub fn render(&mut self, ranked: &[RankedBank]) {
        self.rows = ranked.iter().map(ResultRow::from_ranked).collect();
        self.points_visible = false;
        self.visible = true;
    }

    /// Hide everything and drop the previous results.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.visible = false;
        self.points_visible = false;
    }

    /// Flip the points column for every row at once.
    pub fn toggle_points(&mut self) {
        self.points_visible = !self.points_visible;
        if self.points_visible {
            for row in &mut self.rows {
                row.points_text = row.stored_points.clone();
            }
        }
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    /// Whether the results area, and with it the points control, is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn points_visible(&self) -> bool {
        self.points_visible
    }

    pub fn points_button_label(&self) -> &'static str {
        if self.points_visible {
            "Hide Points"
        } else {
            "Show Points"
        }
    }

    /// Visible text of each row's points cell, `None` while the column is
    /// hidden.
    pub fn points_cell(&self, index: usize) -> Option<&str> {
        if !self.points_visible {
            return None;
        }
        self.rows.get(index).map(|row| row.points_text.as_str())
    }

    /// Build the Ratatui table for the current rows.
    pub fn table(&self) -> Table<'static> {
        let header_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let mut header = vec!["Rank", "Bank", "LDR"];
        let mut widths = vec![
            Constraint::Length(6),
            Constraint::Min(12),
            Constraint::Length(10),
        ];
        if self.points_visible {
            header.push("Points");
            widths.push(Constraint::Length(8));
        }

        let rows = self.rows.iter().map(|row| {
            let mut cells = vec![row.rank.clone(), row.name.clone(), row.ldr.clone()];
            if self.points_visible {
                cells.push(row.points_text.clone());
            }
            Row::new(cells)
        });

        Table::new(rows, widths)
            .header(Row::new(header).style(header_style))
            .block(Block::default().title("Ranking").borders(Borders::ALL))
    }
}
