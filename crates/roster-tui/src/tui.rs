//! Terminal session.
//!
//! Entering switches to the alternate screen in raw mode with bracketed
//! paste on, so a pasted address reaches the form as one event. Leaving,
//! dropping and panicking all go through the same `restore`.

use std::io::{self, Stdout};
use std::path::Path;

use color_eyre::eyre::Result;
use crossterm::ExecutableCommand;
use crossterm::cursor;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    entered: bool,
}

impl Tui {
    /// Wrap stdout. The terminal is left untouched until [`Tui::enter`].
    pub fn new() -> Result<Self> {
        Ok(Self {
            terminal: Terminal::new(CrosstermBackend::new(io::stdout()))?,
            entered: false,
        })
    }

    pub fn enter(&mut self) -> Result<()> {
        if self.entered {
            return Ok(());
        }
        terminal::enable_raw_mode()?;
        self.entered = true;
        io::stdout()
            .execute(EnterAlternateScreen)?
            .execute(EnableBracketedPaste)?
            .execute(cursor::Hide)?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Hand the terminal back. Only the first call does anything.
    pub fn exit(&mut self) {
        if std::mem::take(&mut self.entered) {
            restore();
        }
    }

    pub fn draw(&mut self, render: impl FnOnce(&mut ratatui::Frame)) -> Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        self.exit();
    }
}

fn restore() {
    let mut out = io::stdout();
    let _ = out.execute(DisableBracketedPaste);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

/// Install color-eyre's report and panic hooks. The panic hook restores the
/// terminal first and points at the log file.
///
/// Call before [`Tui::enter`] so a panic during startup prints cleanly.
pub fn install_hooks(log_file: &Path) -> Result<()> {
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .panic_section(format!("Logs: {}", log_file.display()))
        .into_hooks();

    eyre_hook.install()?;

    let panic_hook = panic_hook.into_panic_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore();
        panic_hook(info);
    }));

    Ok(())
}
