//! Employee form screen, shared by add and edit.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use roster_core::{EditTarget, EmployeeFields, ViewState};

use crate::action::{Action, IntentRequest};
use crate::component::Component;
use crate::theme;

// ── Field focus ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Field {
    #[default]
    FirstName,
    LastName,
    Email,
}

impl Field {
    const ALL: [Self; 3] = [Self::FirstName, Self::LastName, Self::Email];

    fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::FirstName => Self::LastName,
            Self::LastName => Self::Email,
            Self::Email => Self::FirstName,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::FirstName => Self::Email,
            Self::LastName => Self::FirstName,
            Self::Email => Self::LastName,
        }
    }
}

// ── Screen ───────────────────────────────────────────────────────────

pub struct FormScreen {
    title: &'static str,
    fields: EmployeeFields,
    active: Field,
    /// A save is in flight; input is ignored until it settles.
    saving: bool,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl FormScreen {
    pub fn new() -> Self {
        Self::open(&EditTarget::draft())
    }

    fn open(target: &EditTarget) -> Self {
        Self {
            title: target.title(),
            fields: target.fields.clone(),
            active: Field::default(),
            saving: false,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn value(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.fields.first_name,
            Field::LastName => &self.fields.last_name,
            Field::Email => &self.fields.email,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::FirstName => &mut self.fields.first_name,
            Field::LastName => &mut self.fields.last_name,
            Field::Email => &mut self.fields.email,
        }
    }

    fn render_fields(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![Line::from("")];

        for field in Field::ALL {
            let is_active = field == self.active;
            let label_style = if is_active {
                theme::field_focused()
            } else {
                theme::field_label()
            };
            let marker = if is_active { "▸ " } else { "  " };
            let cursor = if is_active && !self.saving { "▎" } else { "" };
            let value = self.value(field);

            let mut spans = vec![
                Span::styled(marker, label_style),
                Span::styled(format!("{:<12}", field.label()), label_style),
                Span::styled(value.to_owned(), theme::field_value()),
                Span::styled(cursor, Style::default().fg(theme::AMBER)),
            ];
            if value.trim().is_empty() {
                spans.push(Span::styled("  required", theme::required_hint()));
            }
            lines.push(Line::from(spans));
            lines.push(Line::from(""));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        if self.saving {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label("  Saving\u{2026}")
                .style(Style::default().fg(theme::TEAL))
                .throbber_style(Style::default().fg(theme::ACCENT));
            frame.render_stateful_widget(throbber, area, &mut self.throbber_state.clone());
            return;
        }

        let hints = Line::from(vec![
            Span::styled(" Tab", theme::key_hint_key()),
            Span::styled(" next  ", theme::key_hint()),
            Span::styled("Enter", theme::key_hint_key()),
            Span::styled(" save  ", theme::key_hint()),
            Span::styled("Esc", theme::key_hint_key()),
            Span::styled(" cancel", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), area);
    }
}

impl Component for FormScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.saving {
            return Ok(None);
        }

        let action = match key.code {
            KeyCode::Esc => Some(Action::Intent(IntentRequest::Cancel)),
            KeyCode::Enter => Some(Action::Intent(IntentRequest::Save(self.fields.clone()))),
            KeyCode::Tab | KeyCode::Down => {
                self.active = self.active.next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.active = self.active.prev();
                None
            }
            KeyCode::Backspace => {
                self.value_mut(self.active).pop();
                None
            }
            KeyCode::Char(ch) => {
                self.value_mut(self.active).push(ch);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn handle_paste(&mut self, text: &str) -> Result<Option<Action>> {
        if !self.saving {
            let field = self.value_mut(self.active);
            field.extend(text.chars().filter(|c| !c.is_control()));
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::ViewChanged(ViewState::EditView(target)) => {
                *self = Self::open(target);
            }
            Action::Busy(busy) => {
                self.saving = *busy;
            }
            Action::Tick if self.saving => {
                self.throbber_state.calc_next();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.saving {
                theme::border_default()
            } else {
                theme::border_focused()
            });

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Min(1),    // fields
            Constraint::Length(1), // hints / throbber
        ])
        .split(inner);

        self.render_fields(frame, layout[0]);
        self.render_footer(frame, layout[1]);
    }

    fn captures_input(&self) -> bool {
        true
    }
}
