use std::io::{self, Stdout};
use std::panic::{self, PanicHookInfo};
use std::sync::Arc;

use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use crate::cli::i18n::texts;
use crate::error::AppError;

fn terminal_error(source: io::Error) -> AppError {
    AppError::IoContext {
        context: texts::tui_terminal_error().to_string(),
        source,
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
}

/// Raw-mode alternate screen, restored on drop.
pub struct TuiTerminal {
    inner: Terminal<CrosstermBackend<Stdout>>,
}

impl TuiTerminal {
    pub fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(terminal_error)?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            restore_terminal();
            return Err(terminal_error(e));
        }
        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(inner) => Ok(Self { inner }),
            Err(e) => {
                restore_terminal();
                Err(terminal_error(e))
            }
        }
    }

    pub fn draw<F>(&mut self, render: F) -> Result<(), AppError>
    where
        F: FnOnce(&mut Frame<'_>),
    {
        self.inner.draw(render).map(|_| ()).map_err(terminal_error)
    }
}

impl Drop for TuiTerminal {
    fn drop(&mut self) {
        restore_terminal();
    }
}

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

/// Restores the terminal before the panic message is printed.
pub struct PanicRestoreHookGuard {
    previous: Arc<PanicHook>,
}

impl PanicRestoreHookGuard {
    pub fn install() -> Self {
        let previous: Arc<PanicHook> = Arc::new(panic::take_hook());
        let chained = Arc::clone(&previous);
        panic::set_hook(Box::new(move |info| {
            restore_terminal();
            chained(info);
        }));
        Self { previous }
    }
}

impl Drop for PanicRestoreHookGuard {
    fn drop(&mut self) {
        let previous = Arc::clone(&self.previous);
        panic::set_hook(Box::new(move |info| previous(info)));
    }
}
