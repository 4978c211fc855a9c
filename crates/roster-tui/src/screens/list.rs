//! Employee list screen — the table view over the latest snapshot.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use roster_core::{Employee, Snapshot};

use crate::action::{Action, ConfirmAction, IntentRequest};
use crate::component::Component;
use crate::theme;

pub struct ListScreen {
    employees: Snapshot,
    table_state: TableState,
    /// Set once the first refreshed snapshot arrives from the bridge.
    loaded: bool,
    /// Why the first load failed, shown until a snapshot arrives.
    load_error: Option<String>,
}

impl ListScreen {
    pub fn new() -> Self {
        Self {
            employees: Arc::new(Vec::new()),
            table_state: TableState::default(),
            loaded: false,
            load_error: None,
        }
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn select(&mut self, idx: usize) {
        let clamped = if self.employees.is_empty() {
            0
        } else {
            idx.min(self.employees.len() - 1)
        };
        self.table_state.select(Some(clamped));
    }

    fn move_selection(&mut self, delta: isize) {
        if self.employees.is_empty() {
            return;
        }
        let next = self.selected_index().saturating_add_signed(delta);
        self.select(next);
    }

    fn selected_employee(&self) -> Option<&Arc<Employee>> {
        self.employees.get(self.selected_index())
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect) {
        let line = match (&self.load_error, self.loaded) {
            (_, true) => Line::from(Span::styled(
                "  No employees yet. Press a to add one.",
                theme::key_hint(),
            )),
            (Some(reason), false) => Line::from(Span::styled(
                format!("  Could not load employees: {reason}. Press r to retry."),
                Style::default().fg(theme::RED),
            )),
            (None, false) => Line::from(Span::styled("  Loading\u{2026}", theme::key_hint())),
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

impl Component for ListScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                None
            }
            KeyCode::Char('g') => {
                self.select(0);
                None
            }
            KeyCode::Char('G') => {
                self.select(usize::MAX);
                None
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_selection(10);
                None
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_selection(-10);
                None
            }
            KeyCode::Char('a') => Some(Action::Intent(IntentRequest::Add)),
            KeyCode::Char('e') | KeyCode::Enter => self
                .selected_employee()
                .map(|e| Action::Intent(IntentRequest::Edit(Arc::clone(e)))),
            KeyCode::Char('d') => self
                .selected_employee()
                .map(|e| Action::ShowConfirm(ConfirmAction::DeleteEmployee(Arc::clone(e)))),
            KeyCode::Char('r') => Some(Action::Intent(IntentRequest::Refresh)),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::SnapshotUpdated(snapshot) => {
                self.employees = Arc::clone(snapshot);
                self.loaded = true;
                self.load_error = None;
                if self.employees.is_empty() {
                    self.table_state.select(None);
                } else {
                    // Keep the cursor on the same row index, clamped
                    self.select(self.selected_index());
                }
            }
            Action::SyncFailed(reason) if !self.loaded => {
                self.load_error = Some(reason.clone());
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = format!(" Employees ({}) ", self.employees.len());
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Min(1),    // table
            Constraint::Length(1), // hints
        ])
        .split(inner);

        if self.employees.is_empty() {
            self.render_empty(frame, layout[0]);
        } else {
            let header = Row::new(vec![
                Cell::from("First Name").style(theme::table_header()),
                Cell::from("Last Name").style(theme::table_header()),
                Cell::from("Email").style(theme::table_header()),
            ]);

            let selected_idx = self.selected_index();
            let rows: Vec<Row> = self
                .employees
                .iter()
                .enumerate()
                .map(|(i, employee)| {
                    let is_selected = i == selected_idx;
                    let prefix = if is_selected { "▸" } else { " " };
                    let row_style = if is_selected {
                        theme::table_selected()
                    } else {
                        theme::table_row()
                    };

                    Row::new(vec![
                        Cell::from(format!("{prefix}{}", employee.fields.first_name)).style(
                            Style::default().fg(theme::TEAL).add_modifier(if is_selected {
                                Modifier::BOLD
                            } else {
                                Modifier::empty()
                            }),
                        ),
                        Cell::from(employee.fields.last_name.clone()),
                        Cell::from(employee.fields.email.clone())
                            .style(Style::default().fg(theme::AMBER)),
                    ])
                    .style(row_style)
                })
                .collect();

            let widths = [
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(50),
            ];

            let table = Table::new(rows, widths)
                .header(header)
                .row_highlight_style(theme::table_selected());

            let mut state = self.table_state;
            frame.render_stateful_widget(table, layout[0], &mut state);
        }

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("select  ", theme::key_hint()),
            Span::styled("a ", theme::key_hint_key()),
            Span::styled("add  ", theme::key_hint()),
            Span::styled("e ", theme::key_hint_key()),
            Span::styled("edit  ", theme::key_hint()),
            Span::styled("d ", theme::key_hint_key()),
            Span::styled("delete  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("refresh", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[1]);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};

    use roster_core::EmployeeFields;

    use super::*;

    fn snapshot(n: u64) -> Snapshot {
        Arc::new(
            (1..=n)
                .map(|i| {
                    Arc::new(Employee::new(
                        i,
                        EmployeeFields::new(format!("First{i}"), "Lee", format!("{i}@x.com")),
                    ))
                })
                .collect(),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded(n: u64) -> ListScreen {
        let mut screen = ListScreen::new();
        screen.update(&Action::SnapshotUpdated(snapshot(n))).unwrap();
        screen
    }

    #[test]
    fn selection_is_clamped_to_the_table() {
        let mut screen = loaded(3);
        screen.handle_key_event(key(KeyCode::Char('G'))).unwrap();
        assert_eq!(screen.selected_index(), 2);
        screen.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        assert_eq!(screen.selected_index(), 2);
        screen.handle_key_event(key(KeyCode::Char('g'))).unwrap();
        screen.handle_key_event(key(KeyCode::Char('k'))).unwrap();
        assert_eq!(screen.selected_index(), 0);
    }

    #[test]
    fn shrinking_snapshot_pulls_selection_back() {
        let mut screen = loaded(3);
        screen.select(2);
        screen.update(&Action::SnapshotUpdated(snapshot(1))).unwrap();
        assert_eq!(screen.selected_index(), 0);
    }

    #[test]
    fn edit_and_delete_target_the_selected_row() {
        let mut screen = loaded(2);
        screen.handle_key_event(key(KeyCode::Down)).unwrap();

        let edit = screen.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(matches!(
            edit,
            Some(Action::Intent(IntentRequest::Edit(ref e))) if e.fields.first_name == "First2"
        ));

        let delete = screen.handle_key_event(key(KeyCode::Char('d'))).unwrap();
        assert!(matches!(
            delete,
            Some(Action::ShowConfirm(ConfirmAction::DeleteEmployee(ref e)))
                if e.fields.first_name == "First2"
        ));
    }

    #[test]
    fn edit_on_empty_list_does_nothing() {
        let mut screen = loaded(0);
        assert!(screen.handle_key_event(key(KeyCode::Char('e'))).unwrap().is_none());
        assert!(screen.handle_key_event(key(KeyCode::Char('d'))).unwrap().is_none());
        assert!(matches!(
            screen.handle_key_event(key(KeyCode::Char('a'))).unwrap(),
            Some(Action::Intent(IntentRequest::Add))
        ));
    }

    fn rendered(screen: &ListScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 8)).unwrap();
        terminal.draw(|f| screen.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn shows_loading_until_first_snapshot() {
        let screen = ListScreen::new();
        let text = rendered(&screen);
        assert!(text.contains("Loading"));
        assert!(!text.contains("No employees yet"));
    }

    #[test]
    fn failed_first_load_is_reported() {
        let mut screen = ListScreen::new();
        screen
            .update(&Action::SyncFailed("connection refused".into()))
            .unwrap();
        let text = rendered(&screen);
        assert!(text.contains("Could not load employees"));
        assert!(!text.contains("No employees yet"));

        screen.update(&Action::SnapshotUpdated(snapshot(0))).unwrap();
        assert!(rendered(&screen).contains("No employees yet"));
    }

    #[test]
    fn renders_column_headers_and_rows() {
        let text = rendered(&loaded(1));
        assert!(text.contains("First Name"));
        assert!(text.contains("Last Name"));
        assert!(text.contains("1@x.com"));
    }
}
