mod app;
mod form;
mod terminal;
mod theme;
mod ui;

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};

use crate::cli::i18n::texts;
use crate::error::AppError;
use crate::store::{ConfigurationStore, JsonFileStore};

use app::{Action, App, ToastKind};
use terminal::{PanicRestoreHookGuard, TuiTerminal};

pub fn run(store: &JsonFileStore) -> Result<(), AppError> {
    let _panic_hook = PanicRestoreHookGuard::install();
    let mut terminal = TuiTerminal::new()?;
    let mut app = App::new(&store.snapshot());

    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        let snapshot = store.snapshot();
        app.observe(&snapshot);

        if let Some(err) = store.take_error() {
            app.push_toast(
                texts::save_failed(&err.message_for(crate::cli::i18n::is_chinese())),
                ToastKind::Error,
            );
        }

        terminal.draw(|f| ui::render(f, &app, &snapshot))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        let ready = event::poll(timeout).map_err(|e| AppError::IoContext {
            context: texts::tui_terminal_error().to_string(),
            source: e,
        })?;

        if ready {
            let ev = event::read().map_err(|e| AppError::IoContext {
                context: texts::tui_terminal_error().to_string(),
                source: e,
            })?;
            if let Event::Key(key) = ev {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match app.on_key(key, store) {
                    Action::None => {}
                    Action::Quit => break,
                    Action::Reload => match store.reload() {
                        Ok(()) => app.push_toast(texts::tui_toast_reloaded(), ToastKind::Info),
                        Err(err) => app.push_toast(
                            texts::tui_toast_reload_failed(&err.to_string()),
                            ToastKind::Error,
                        ),
                    },
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }

    log::debug!("tui closed");
    Ok(())
}
