//! Application core — event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::{Mutex, mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use roster_core::{CollectionStore, CoreError, ViewController, ViewState};

use crate::action::{Action, ConfirmAction, IntentRequest, Notification, NotificationLevel};
use crate::component::Component;
use crate::event::{Event, EventReader, Rates};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// How long a toast stays on screen.
const TOAST_TTL: Duration = Duration::from_secs(4);

/// Whether the visible list reflects the server, as seen by the TUI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SyncStatus {
    #[default]
    Pending,
    Synced,
    Failed(String),
}

/// Top-level application state and event loop.
pub struct App {
    /// Screen matching the controller's current view state.
    active_screen: ScreenId,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    sync_status: SyncStatus,
    /// A remote intent is in flight.
    busy: bool,
    help_visible: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// The controller is only touched from intent tasks, one at a time.
    view: Arc<Mutex<ViewController>>,
    store: Arc<CollectionStore>,
    view_state: watch::Receiver<ViewState>,
    /// Cancellation token for the data bridge task.
    data_cancel: CancellationToken,
    /// Pending confirmation dialog (blocks other input while active).
    pending_confirm: Option<ConfirmAction>,
    /// Active notification toast with display timestamp.
    notification: Option<(Notification, Instant)>,
}

impl App {
    pub fn new(view: ViewController) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let store = Arc::clone(view.store());
        let view_state = view.subscribe();

        Self {
            active_screen: ScreenId::for_view(&view.state()),
            screens: create_screens().into_iter().collect(),
            running: true,
            sync_status: SyncStatus::default(),
            busy: false,
            help_visible: false,
            action_tx,
            action_rx,
            view: Arc::new(Mutex::new(view)),
            store,
            view_state,
            data_cancel: CancellationToken::new(),
            pending_confirm: None,
            notification: None,
        }
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        let store = Arc::clone(&self.store);
        let view_state = self.view_state.clone();
        let cancel = self.data_cancel.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            crate::data_bridge::spawn_data_bridge(store, view_state, tx, cancel).await;
        });

        // Initial load
        self.action_tx.send(Action::Intent(IntentRequest::Refresh))?;

        let mut events = EventReader::spawn(Rates::default());

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Paste(text) => {
                    if let Some(action) = self.handle_paste(&text)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            // Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.data_cancel.cancel();
        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// screen-specific keys are delegated to the active screen component.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        // Confirmation dialog captures all input
        if self.pending_confirm.is_some() {
            return Ok(match key.code {
                KeyCode::Char('y' | 'Y') => Some(Action::ConfirmYes),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::ConfirmNo),
                _ => None,
            });
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        let Some(screen) = self.screens.get_mut(&self.active_screen) else {
            return Ok(None);
        };

        // The form takes every printable key
        if screen.captures_input() {
            return screen.handle_key_event(key);
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('?')) => Ok(Some(Action::ToggleHelp)),
            _ => screen.handle_key_event(key),
        }
    }

    /// Pasted text only lands in a screen that is taking text input, and
    /// never while a dialog is open.
    fn handle_paste(&mut self, text: &str) -> Result<Option<Action>> {
        if self.pending_confirm.is_some() || self.help_visible {
            return Ok(None);
        }
        match self.screens.get_mut(&self.active_screen) {
            Some(screen) if screen.captures_input() => screen.handle_paste(text),
            _ => Ok(None),
        }
    }

    /// Process a single action — update app state and propagate to components.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Render | Action::Resize(..) => {}

            Action::Tick => {
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|(_, shown)| shown.elapsed() > TOAST_TTL)
                {
                    self.notification = None;
                }
                self.forward_to_active(action)?;
            }

            Action::ViewChanged(state) => {
                let target = ScreenId::for_view(state);
                if target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    self.active_screen = target;
                }
                self.forward_to_all(action)?;
            }

            Action::SnapshotUpdated(_) => {
                self.forward_to_all(action)?;
            }

            Action::Busy(busy) => {
                self.busy = *busy;
                self.forward_to_all(action)?;
            }

            Action::Synced => {
                self.sync_status = SyncStatus::Synced;
            }

            Action::SyncFailed(reason) => {
                self.sync_status = SyncStatus::Failed(reason.clone());
                self.forward_to_all(action)?;
            }

            Action::Intent(request) => {
                self.dispatch_intent(request.clone());
            }

            // Confirmation dialog management
            Action::ShowConfirm(confirm) => {
                self.pending_confirm = Some(confirm.clone());
            }

            Action::ConfirmYes => {
                if let Some(ConfirmAction::DeleteEmployee(employee)) = self.pending_confirm.take() {
                    self.dispatch_intent(IntentRequest::Delete(employee));
                }
            }

            Action::ConfirmNo => {
                self.pending_confirm = None;
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::Notify(n) => {
                self.notification = Some((n.clone(), Instant::now()));
            }
        }
        Ok(())
    }

    fn forward_to_all(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    fn forward_to_active(&mut self, action: &Action) -> Result<()> {
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    // ── Intent execution ──────────────────────────────────────────

    /// Run an intent against the view controller on a spawned task.
    ///
    /// Remote intents are serialized through `busy`. Any intent arriving while
    /// one is in flight is dropped with a notice, local ones included, since
    /// the record they target may be about to change. Results come back as
    /// `Notify` / `Synced` / `SyncFailed` actions, and view changes arrive
    /// through the data bridge.
    fn dispatch_intent(&mut self, request: IntentRequest) {
        if self.busy {
            debug!(?request, "intent dropped while busy");
            let _ = self
                .action_tx
                .send(Action::Notify(Notification::info("Still working\u{2026}")));
            return;
        }

        let remote = request.is_remote();
        if remote {
            self.busy = true;
            let _ = self.action_tx.send(Action::Busy(true));
        }

        let view = Arc::clone(&self.view);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let outcome = {
                let mut view = view.lock().await;
                perform(&mut view, &request).await
            };

            match outcome {
                Ok(message) => {
                    if remote {
                        let _ = tx.send(Action::Synced);
                    }
                    if let Some(message) = message {
                        let _ = tx.send(Action::Notify(Notification::success(message)));
                    }
                }
                Err(e) => {
                    warn!(error = %e, "intent failed");
                    if e.is_transport() || matches!(e, CoreError::RefreshAfterMutation { .. }) {
                        let _ = tx.send(Action::SyncFailed(e.to_string()));
                    }
                    let _ = tx.send(Action::Notify(Notification::error(e.to_string())));
                }
            }

            if remote {
                let _ = tx.send(Action::Busy(false));
            }
        });
    }

    // ── Rendering ─────────────────────────────────────────────────

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::vertical([
            Constraint::Min(1),    // Screen content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        // The list stays visible behind the form
        if let Some(list) = self.screens.get(&ScreenId::List) {
            list.render(frame, layout[0]);
        }
        if self.active_screen == ScreenId::Form {
            if let Some(form) = self.screens.get(&ScreenId::Form) {
                let form_area = centered(layout[0], 56, 11);
                frame.render_widget(Clear, form_area);
                form.render(frame, form_area);
            }
        }

        self.render_status_bar(frame, layout[1]);

        // Overlays on top (last = topmost)
        if let Some((ref notif, _)) = self.notification {
            render_notification(frame, area, notif);
        }
        if let Some(ref confirm) = self.pending_confirm {
            render_confirm_dialog(frame, area, confirm);
        }
        if self.help_visible {
            render_help_overlay(frame, area);
        }
    }

    /// Render the bottom status bar with sync status and key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let indicator = if self.busy {
            Span::styled("◐ syncing", Style::default().fg(theme::AMBER))
        } else {
            match &self.sync_status {
                SyncStatus::Synced => Span::styled(
                    format!("● {} employees · {}", self.store.len(), self.store.api_url()),
                    Style::default().fg(theme::GREEN),
                ),
                SyncStatus::Pending => {
                    Span::styled("◐ connecting", Style::default().fg(theme::AMBER))
                }
                SyncStatus::Failed(reason) => Span::styled(
                    format!("○ stale: {reason} (r to retry)"),
                    Style::default().fg(theme::RED),
                ),
            }
        };

        let hints = Span::styled(" │ ? help  q quit", theme::key_hint());
        let line = Line::from(vec![Span::raw(" "), indicator, hints]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Execute one intent. Returns the success message to toast, if any.
async fn perform(
    view: &mut ViewController,
    request: &IntentRequest,
) -> Result<Option<String>, CoreError> {
    match request {
        IntentRequest::Refresh => {
            view.start().await?;
            Ok(None)
        }
        IntentRequest::Add => {
            view.add()?;
            Ok(None)
        }
        IntentRequest::Edit(employee) => {
            view.edit(employee)?;
            Ok(None)
        }
        IntentRequest::Cancel => {
            view.cancel()?;
            Ok(None)
        }
        IntentRequest::Save(fields) => {
            let draft = view.edit_target().is_some_and(|t| t.is_draft());
            view.save(fields.clone()).await?;
            Ok(Some(if draft {
                format!("Added {} {}", fields.first_name, fields.last_name)
            } else {
                format!("Updated {} {}", fields.first_name, fields.last_name)
            }))
        }
        IntentRequest::Delete(employee) => {
            view.delete(&employee.id).await?;
            Ok(Some(format!("Deleted {}", employee.display_name())))
        }
    }
}

// ── Overlays ─────────────────────────────────────────────────────────

/// A `width` x `height` rect centered in `area`, shrunk to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_area = centered(area, 48, 16);
    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .title(" Keyboard Shortcuts ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused())
        .style(Style::default().bg(theme::BG_DARK));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let row = |key: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
            Span::styled(what, theme::key_hint()),
        ])
    };

    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled("  List", Style::default().fg(theme::TEAL))),
        row("j/k ↑/↓", "Move up/down"),
        row("a", "Add employee"),
        row("e/Enter", "Edit selected"),
        row("d", "Delete selected"),
        row("r", "Refresh"),
        Line::from(""),
        Line::from(Span::styled("  Form", Style::default().fg(theme::TEAL))),
        row("Tab", "Next field"),
        row("Enter", "Save"),
        row("Esc", "Cancel"),
        Line::from(""),
        Line::from(Span::styled("          Esc or ? to close", theme::key_hint())),
    ];

    frame.render_widget(Paragraph::new(help_text), inner);
}

fn render_confirm_dialog(frame: &mut Frame, area: Rect, confirm: &ConfirmAction) {
    let dialog_area = centered(area, 50, 5);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(" Confirm ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::AMBER))
        .style(Style::default().bg(theme::BG_DARK));

    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let text = vec![
        Line::from(Span::styled(
            format!("  {confirm}"),
            Style::default().fg(theme::TEXT),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  y ", theme::key_hint_key()),
            Span::styled("confirm    ", theme::key_hint()),
            Span::styled("n ", theme::key_hint_key()),
            Span::styled("cancel", theme::key_hint()),
        ]),
    ];
    frame.render_widget(Paragraph::new(text), inner);
}

/// Render a notification toast in the bottom-right corner.
fn render_notification(frame: &mut Frame, area: Rect, notif: &Notification) {
    let msg_len = u16::try_from(notif.message.chars().count()).unwrap_or(u16::MAX);
    let width = msg_len.saturating_add(6).clamp(20, 70).min(area.width);
    let height = 3u16;

    let x = area.width.saturating_sub(width + 1);
    let y = area.height.saturating_sub(height + 1); // above status bar
    let toast_area = Rect::new(area.x + x, area.y + y, width, height);

    let (border_color, icon) = match notif.level {
        NotificationLevel::Success => (theme::GREEN, "✓"),
        NotificationLevel::Error => (theme::RED, "✗"),
        NotificationLevel::Info => (theme::TEAL, "·"),
    };

    frame.render_widget(Clear, toast_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme::BG_DARK));

    let inner = block.inner(toast_area);
    frame.render_widget(block, toast_area);

    let line = Line::from(vec![
        Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
        Span::styled(notif.message.as_str(), Style::default().fg(theme::TEXT)),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}
