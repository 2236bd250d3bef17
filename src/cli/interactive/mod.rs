mod settings;
mod utils;

use std::io::IsTerminal;

use crate::cli::commands::endpoint::{check_write, summary_lines};
use crate::cli::i18n::texts;
use crate::cli::ui::{error, highlight, info, set_theme_mode, success};
use crate::controller::{dropdown_options, DropdownChoice, SelectionController};
use crate::error::AppError;
use crate::mode::SelectionMode;
use crate::store::{ConfigurationStore, JsonFileStore};
use crate::transform::InputEvent;

use utils::{pause, prompt_secret, prompt_select, prompt_select_at, prompt_text};

pub fn run(store: &JsonFileStore) -> Result<(), AppError> {
    if !std::io::stdin().is_terminal() {
        return Err(AppError::Message(
            texts::interactive_requires_tty().to_string(),
        ));
    }

    let mut controller = SelectionController::new(&store.snapshot());
    print_welcome(store);

    loop {
        // Pick up edits made outside this session before deciding what to show.
        if let Err(e) = store.reload() {
            log::warn!("重新加载供应商配置失败: {e}");
        }
        controller.observe(&store.snapshot());
        set_theme_mode(Some(controller.mode()));

        let Some(choice) = show_main_menu(controller.mode())? else {
            println!("\n{}", success(texts::goodbye()));
            break;
        };

        let result = match choice {
            MainMenuChoice::SelectEndpoint => select_endpoint(store, &mut controller),
            MainMenuChoice::EditCustomUrl => edit_custom_url(store, &controller),
            MainMenuChoice::SetApiKey => set_api_key(store, &controller),
            MainMenuChoice::ViewCurrentConfig => {
                view_current_config(store, &controller);
                Ok(())
            }
            MainMenuChoice::Language => settings::change_language_interactive(),
            MainMenuChoice::Exit => {
                println!("\n{}", success(texts::goodbye()));
                break;
            }
        };

        if let Err(e) = result {
            println!("\n{}", error(&format!("{}: {}", texts::error_prefix(), e)));
            pause();
        }
    }

    set_theme_mode(None);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainMenuChoice {
    SelectEndpoint,
    EditCustomUrl,
    SetApiKey,
    ViewCurrentConfig,
    Language,
    Exit,
}

impl std::fmt::Display for MainMenuChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SelectEndpoint => write!(f, "{}", texts::menu_select_endpoint()),
            Self::EditCustomUrl => write!(f, "{}", texts::menu_edit_custom_url()),
            Self::SetApiKey => write!(f, "{}", texts::menu_set_api_key()),
            Self::ViewCurrentConfig => write!(f, "{}", texts::menu_show()),
            Self::Language => write!(f, "{}", texts::menu_language()),
            Self::Exit => write!(f, "{}", texts::menu_exit()),
        }
    }
}

/// The URL editor only exists while the form is in custom mode.
fn main_menu_choices(mode: SelectionMode) -> Vec<MainMenuChoice> {
    let mut choices = vec![MainMenuChoice::SelectEndpoint];
    if mode.is_custom() {
        choices.push(MainMenuChoice::EditCustomUrl);
    }
    choices.extend([
        MainMenuChoice::SetApiKey,
        MainMenuChoice::ViewCurrentConfig,
        MainMenuChoice::Language,
        MainMenuChoice::Exit,
    ]);
    choices
}

fn show_main_menu(mode: SelectionMode) -> Result<Option<MainMenuChoice>, AppError> {
    prompt_select(texts::main_menu_prompt(), main_menu_choices(mode))
}

fn print_welcome(store: &JsonFileStore) {
    println!("\n{}", "═".repeat(60));
    println!("{}", highlight(texts::welcome_title()));
    println!("{}", "═".repeat(60));
    println!(
        "{} {}: {}",
        info("📁"),
        texts::config_file_label(),
        store.path().display()
    );
    println!("{}", "─".repeat(60));
    println!();
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EndpointChoice {
    value: String,
    label: String,
}

impl std::fmt::Display for EndpointChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.value == crate::controller::CUSTOM_SENTINEL {
            write!(f, "{}", self.label)
        } else {
            write!(f, "{:<18} {}", self.label, self.value)
        }
    }
}

fn endpoint_choices() -> Vec<EndpointChoice> {
    dropdown_options(texts::custom_option_label())
        .into_iter()
        .map(|(value, label)| EndpointChoice {
            value: value.to_string(),
            label: label.to_string(),
        })
        .collect()
}

fn select_endpoint(store: &JsonFileStore, controller: &mut SelectionController) -> Result<(), AppError> {
    let snapshot = store.snapshot();
    let choices = endpoint_choices();
    let current = {
        let view = controller.view(&snapshot);
        choices
            .iter()
            .position(|c| c.value == view.dropdown_value)
            .unwrap_or(0)
    };

    let Some(picked) = prompt_select_at(texts::select_endpoint_prompt(), choices, current)? else {
        return Ok(());
    };

    let choice = DropdownChoice::from_value(&picked.value);
    controller.select(store, choice);
    check_write(store)?;

    match choice {
        DropdownChoice::Preset(_) => {
            println!("\n{}", success(&texts::endpoint_switched(&picked.label)));
            pause();
            Ok(())
        }
        // Nothing is written until a URL is entered.
        DropdownChoice::Custom => edit_custom_url(store, controller),
    }
}

fn edit_custom_url(store: &JsonFileStore, controller: &SelectionController) -> Result<(), AppError> {
    let snapshot = store.snapshot();
    let initial = controller
        .view(&snapshot)
        .custom_url
        .unwrap_or_default()
        .to_string();

    let Some(url) = prompt_text(
        texts::custom_url_prompt(),
        &initial,
        texts::custom_url_placeholder(),
    )?
    else {
        return Ok(());
    };

    if controller.edit_custom_url(store, &InputEvent::change(url.clone())) {
        check_write(store)?;
        println!("\n{}", success(&texts::custom_url_saved(&url)));
        pause();
    }
    Ok(())
}

fn set_api_key(store: &JsonFileStore, controller: &SelectionController) -> Result<(), AppError> {
    let Some(key) = prompt_secret(texts::api_key_prompt(), texts::api_key_storage_notice())? else {
        return Ok(());
    };

    controller.edit_api_key(store, &InputEvent::change(key));
    check_write(store)?;
    println!("\n{}", success(texts::api_key_saved()));
    pause();
    Ok(())
}

fn view_current_config(store: &JsonFileStore, controller: &SelectionController) {
    let snapshot = store.snapshot();
    println!("\n{}", highlight(texts::menu_show()));
    println!("{}", "═".repeat(60));
    for (label, value) in summary_lines(controller, &snapshot) {
        println!("  {:<18} {}", format!("{label}:"), value);
    }
    println!("\n{}", "─".repeat(60));
    pause();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_url_entry_only_offered_in_custom_mode() {
        assert!(!main_menu_choices(SelectionMode::Preset).contains(&MainMenuChoice::EditCustomUrl));
        assert_eq!(
            main_menu_choices(SelectionMode::Custom)[1],
            MainMenuChoice::EditCustomUrl
        );
    }

    #[test]
    fn endpoint_choices_end_with_custom() {
        let choices = endpoint_choices();
        assert_eq!(choices.len(), crate::endpoints::list().len() + 1);
        let last = choices.last().expect("custom option");
        assert_eq!(last.value, crate::controller::CUSTOM_SENTINEL);
        assert_eq!(last.to_string(), "Custom");
        assert!(choices[0].to_string().contains("https://api.minimax.io/anthropic"));
    }
}
