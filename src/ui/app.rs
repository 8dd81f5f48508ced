use std::mem;
use std::sync::Arc;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::results::ResultsView;
use crate::rows::RowSequence;
use crate::scorer::Scorer;
use crate::submission::{Submission, SubmissionController};

use super::forms::{build_row_lines, field_prefix, value_len, Focus};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Upper bound on the height of the bank list above the row form.
const BANK_LIST_MAX_HEIGHT: u16 = 8;

/// Keyboard modes. In `Normal` keys are commands; in `Editing` they are text
/// for the focused field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    Editing,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    rows: RowSequence,
    focus: Focus,
    mode: Mode,
    controller: SubmissionController,
    results: ResultsView,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(rows: RowSequence, scorer: Arc<dyn Scorer>) -> Self {
        Self {
            rows,
            focus: Focus::default(),
            mode: Mode::Normal,
            controller: SubmissionController::new(scorer),
            results: ResultsView::default(),
            status: None,
        }
    }

    pub fn rows(&self) -> &RowSequence {
        &self.rows
    }

    pub fn results(&self) -> &ResultsView {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.controller.is_busy()
    }

    /// Text currently shown in the footer status line.
    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    /// Dispatch a key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::Editing => self.handle_editing_key(code)?,
        };

        Ok(exit)
    }

    /// Pick up a finished scorer request, if any. Called once per loop tick.
    pub fn tick(&mut self) {
        match self.controller.poll(&mut self.results) {
            Some(Ok(count)) => {
                self.set_status(format!("Ranked {count} banks."), StatusKind::Info)
            }
            Some(Err(err)) => self.set_status(err.to_string(), StatusKind::Error),
            None => {}
        }
    }

    /// Calculate from any mode.
    pub(crate) fn handle_ctrl_s(&mut self) -> Result<()> {
        self.submit();
        Ok(())
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Up => self.focus.previous_field(),
            KeyCode::Down => self.focus.next_field(),
            KeyCode::PageUp => self.focus.move_row(-1, self.rows.len()),
            KeyCode::PageDown => self.focus.move_row(1, self.rows.len()),
            KeyCode::Home => self.focus.move_row(-(self.rows.len() as isize), self.rows.len()),
            KeyCode::End => self.focus.move_row(self.rows.len() as isize, self.rows.len()),
            KeyCode::Enter => {
                self.clear_status();
                return Ok(Mode::Editing);
            }
            KeyCode::Char('+') | KeyCode::Char('a') | KeyCode::Char('A') => self.add_row(),
            KeyCode::Char('-') | KeyCode::Char('d') | KeyCode::Char('D') => self.delete_row(),
            KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::F(5) => self.submit(),
            KeyCode::Char('p') | KeyCode::Char('P') => self.toggle_points(),
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_editing_key(&mut self, code: KeyCode) -> Result<Mode> {
        let field = self.focus.field;
        match code {
            KeyCode::Enter | KeyCode::Esc => return Ok(Mode::Normal),
            KeyCode::Tab | KeyCode::Down => self.focus.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.focus.previous_field(),
            KeyCode::Backspace => {
                if let Some(row) = self.rows.row_mut(self.focus.row) {
                    row.backspace(field);
                }
            }
            KeyCode::Char(ch) => {
                if let Some(row) = self.rows.row_mut(self.focus.row) {
                    if !row.push_char(field, ch) {
                        self.set_status(
                            format!("'{ch}' is not valid in {}.", field.label()),
                            StatusKind::Error,
                        );
                    } else {
                        self.clear_status();
                    }
                }
            }
            _ => {}
        }
        Ok(Mode::Editing)
    }

    fn add_row(&mut self) {
        let index = self.rows.add_row();
        self.focus.row = index;
        self.set_status(format!("Added Bank #{}.", index + 1), StatusKind::Info);
    }

    fn delete_row(&mut self) {
        let position = self.focus.row + 1;
        match self.rows.delete_row(self.focus.row) {
            Ok(()) => {
                self.focus.clamp(self.rows.len());
                self.set_status(format!("Removed Bank #{position}."), StatusKind::Info);
            }
            Err(err) => self.set_status(err.to_string(), StatusKind::Error),
        }
    }

    fn submit(&mut self) {
        self.clear_status();
        match self.controller.submit(&self.rows, &mut self.results) {
            Ok(Submission::Started(count)) => self.set_status(
                format!("Calculating ranking for {count} banks..."),
                StatusKind::Info,
            ),
            Ok(Submission::InFlight) => self.set_status(
                "A calculation is already in progress.",
                StatusKind::Info,
            ),
            Err(err) => self.set_status(err.to_string(), StatusKind::Error),
        }
    }

    fn toggle_points(&mut self) {
        if !self.results.is_visible() {
            self.set_status("No results to show points for.", StatusKind::Error);
            return;
        }
        self.results.toggle_points();
        self.clear_status();
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(content_area);

        self.draw_form(frame, columns[0]);
        self.draw_results(frame, columns[1]);

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let list_height = u16::try_from(self.rows.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(BANK_LIST_MAX_HEIGHT)
            .min(area.height);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(list_height), Constraint::Min(0)])
            .split(area);

        self.draw_bank_list(frame, chunks[0]);
        self.draw_row_form(frame, chunks[1]);
    }

    fn draw_bank_list(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .rows
            .rows()
            .iter()
            .map(|row| {
                let (marker, style) = if row.is_complete() {
                    ("✓", Style::default().fg(Color::Green))
                } else {
                    ("…", Style::default().fg(Color::DarkGray))
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{marker} "), style),
                    Span::raw(row.heading().to_string()),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(format!("Banks ({})", self.rows.len()))
                    .borders(Borders::ALL),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = ListState::default();
        list_state.select(Some(self.focus.row));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn draw_row_form(&self, frame: &mut Frame, area: Rect) {
        let Some(row) = self.rows.row(self.focus.row) else {
            return;
        };
        let editing = self.mode == Mode::Editing;

        let block = Block::default()
            .title(row.heading().to_string())
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let lines = build_row_lines(row, Some(self.focus.field), editing);
        frame.render_widget(Paragraph::new(lines), inner);

        if editing && inner.height > self.focus.line_offset() {
            let prefix = field_prefix(self.focus.field.label()).chars().count() as u16;
            let cursor_x = inner.x + prefix + value_len(row, self.focus.field) as u16;
            let cursor_y = inner.y + self.focus.line_offset();
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }

    fn draw_results(&self, frame: &mut Frame, area: Rect) {
        if self.results.is_visible() {
            frame.render_widget(self.results.table(), area);
            return;
        }

        let text = if self.is_loading() {
            Line::from(Span::styled(
                "Calculating...",
                Style::default().fg(Color::Yellow),
            ))
        } else {
            Line::from(Span::styled(
                "No results yet. Fill in a bank and press 'c' to calculate.",
                Style::default().fg(Color::DarkGray),
            ))
        };
        let paragraph = Paragraph::new(text)
            .block(Block::default().title("Ranking").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        if self.mode == Mode::Editing {
            return Line::from(vec![
                Span::styled("[Tab/↑↓]", key_style),
                Span::raw(" Next/Prev Field   "),
                Span::styled("[Backspace]", key_style),
                Span::raw(" Delete   "),
                Span::styled("[Ctrl+S]", key_style),
                Span::raw(" Calculate   "),
                Span::styled("[Enter/Esc]", key_style),
                Span::raw(" Done"),
            ]);
        }

        let mut spans = vec![
            Span::styled("[↑↓]", key_style),
            Span::raw(" Field   "),
            Span::styled("[PgUp/PgDn]", key_style),
            Span::raw(" Bank   "),
            Span::styled("[Enter]", key_style),
            Span::raw(" Edit   "),
            Span::styled("[+]", key_style),
            Span::raw(" Add Bank   "),
            Span::styled("[-]", key_style),
            Span::raw(" Delete Bank   "),
            Span::styled("[c]", key_style),
            Span::raw(" Calculate   "),
        ];
        if self.results.is_visible() {
            spans.push(Span::styled("[p]", key_style));
            spans.push(Span::raw(format!(" {}   ", self.results.points_button_label())));
        }
        spans.push(Span::styled("[q]", key_style));
        spans.push(Span::raw(" Quit"));
        Line::from(spans)
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}
