use colored::{Color, Colorize};
use std::sync::{OnceLock, RwLock};

use inquire::set_global_render_config;
use inquire::ui::{Color as InquireColor, RenderConfig, StyleSheet, Styled};

use crate::mode::SelectionMode;

/// 当前端点模式（决定强调色）
static ACCENT_MODE: OnceLock<RwLock<Option<SelectionMode>>> = OnceLock::new();

fn accent_mode() -> Option<SelectionMode> {
    ACCENT_MODE
        .get()
        .and_then(|cell| cell.read().ok().map(|guard| *guard))
        .flatten()
}

/// Terminal and prompt colour for a mode: cyan for presets, yellow for a custom URL.
fn accent(mode: SelectionMode) -> (Color, InquireColor) {
    match mode {
        SelectionMode::Preset => (Color::BrightCyan, InquireColor::LightCyan),
        SelectionMode::Custom => (Color::BrightYellow, InquireColor::LightYellow),
    }
}

/// Re-tint headings and the endpoint menu after the mode changes. `None` resets to defaults.
pub fn set_theme_mode(mode: Option<SelectionMode>) {
    let cell = ACCENT_MODE.get_or_init(|| RwLock::new(None));
    if let Ok(mut guard) = cell.write() {
        *guard = mode;
    }

    let config = match (std::env::var_os("NO_COLOR"), mode) {
        (Some(_), _) => RenderConfig::empty(),
        (None, None) => RenderConfig::default(),
        (None, Some(mode)) => {
            let (_, fg) = accent(mode);
            RenderConfig::default_colored()
                .with_highlighted_option_prefix(Styled::new(">").with_fg(fg))
                .with_selected_option(Some(StyleSheet::new().with_fg(fg)))
                .with_help_message(StyleSheet::new().with_fg(fg))
        }
    };
    set_global_render_config(config);
}

pub fn success(text: &str) -> String {
    text.green().to_string()
}

pub fn error(text: &str) -> String {
    text.red().to_string()
}

pub fn warning(text: &str) -> String {
    text.yellow().to_string()
}

pub fn info(text: &str) -> String {
    text.cyan().to_string()
}

pub fn highlight(text: &str) -> String {
    match accent_mode() {
        Some(mode) => text.color(accent(mode).0).bold().to_string(),
        None => text.bright_blue().bold().to_string(),
    }
}
