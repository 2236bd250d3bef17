use ratatui::style::Color;

use crate::mode::SelectionMode;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent: Color,
    pub dim: Color,
    pub ok: Color,
    pub err: Color,
    pub no_color: bool,
}

pub fn theme_for(mode: SelectionMode) -> Theme {
    let no_color = std::env::var("NO_COLOR").is_ok();
    if no_color {
        return Theme {
            accent: Color::Reset,
            dim: Color::Reset,
            ok: Color::Reset,
            err: Color::Reset,
            no_color,
        };
    }

    let accent = match mode {
        SelectionMode::Preset => Color::Cyan,
        SelectionMode::Custom => Color::Yellow,
    };
    Theme {
        accent,
        dim: Color::DarkGray,
        ok: Color::Green,
        err: Color::Red,
        no_color,
    }
}
