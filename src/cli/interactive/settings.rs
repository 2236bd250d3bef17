use crate::cli::i18n::{current_language, set_language, texts, Language};
use crate::cli::ui::success;
use crate::error::AppError;

use super::utils::{clear_screen, pause, prompt_select_at};

pub fn change_language_interactive() -> Result<(), AppError> {
    clear_screen();
    let languages = vec![Language::English, Language::Chinese];
    let current = languages
        .iter()
        .position(|lang| *lang == current_language())
        .unwrap_or(0);

    let Some(selected) = prompt_select_at(texts::select_language(), languages, current)? else {
        return Ok(());
    };

    set_language(selected)?;

    println!("\n{}", success(texts::language_changed()));
    pause();

    Ok(())
}
