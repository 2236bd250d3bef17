use crate::cli::i18n::texts;
use crate::cli::ui::{create_table, highlight, info, success, warning};
use crate::controller::{DropdownChoice, SelectionController};
use crate::endpoints::{self, EndpointOption};
use crate::error::AppError;
use crate::provider::{mask_api_key, ProviderSettings};
use crate::store::{ConfigurationStore, JsonFileStore};
use crate::transform::InputEvent;

/// Surface a failed fire-and-forget write as a command error.
pub(crate) fn check_write(store: &JsonFileStore) -> Result<(), AppError> {
    match store.take_error() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Accept either the full URL or the short label.
pub fn lookup_preset(raw: &str) -> Result<&'static EndpointOption, AppError> {
    let raw = raw.trim();
    endpoints::find(raw)
        .or_else(|| endpoints::find_by_label(raw))
        .ok_or_else(|| {
            AppError::localized(
                "endpoint.unknown",
                texts::unknown_endpoint_zh(raw),
                texts::unknown_endpoint_en(raw),
            )
        })
}

pub fn show(store: &JsonFileStore) -> Result<(), AppError> {
    let snapshot = store.snapshot();
    let controller = SelectionController::new(&snapshot);

    println!("{}", highlight(texts::welcome_title()));
    println!("{}", "═".repeat(60));
    for (label, value) in summary_lines(&controller, &snapshot) {
        println!("  {:<18} {}", format!("{label}:"), value);
    }
    println!(
        "\n{} {}: {}",
        info("ℹ"),
        texts::config_file_label(),
        store.path().display()
    );
    Ok(())
}

pub(crate) fn summary_lines(
    controller: &SelectionController,
    snapshot: &ProviderSettings,
) -> Vec<(&'static str, String)> {
    let view = controller.view(snapshot);
    let mut lines = Vec::new();

    let base_url = match snapshot.base_url.as_deref() {
        Some(url) if !url.is_empty() => match endpoints::find(url) {
            Some(preset) => format!("{url} ({})", preset.label),
            None => url.to_string(),
        },
        _ => texts::not_set().to_string(),
    };
    lines.push((texts::base_url_label(), base_url));
    lines.push((texts::mode_label(), texts::mode_name(view.mode).to_string()));

    let api_key = if view.api_key.is_empty() {
        texts::not_set().to_string()
    } else {
        mask_api_key(view.api_key)
    };
    lines.push((texts::api_key_label(), api_key));

    if let Some(link) = view.api_key_link {
        lines.push((texts::get_api_key(), link.to_string()));
    }
    lines
}

pub fn list(store: &JsonFileStore) -> Result<(), AppError> {
    let snapshot = store.snapshot();
    let current = snapshot.base_url.as_deref();

    let mut table = create_table();
    table.set_header(vec!["", texts::header_label(), "URL"]);
    for preset in endpoints::list() {
        let marker = if current == Some(preset.value) { "✓" } else { "" };
        table.add_row(vec![marker, preset.label, preset.value]);
    }
    println!("{}", table);

    if endpoints::find(current.unwrap_or_default()).is_none() {
        let value = current
            .filter(|url| !url.is_empty())
            .unwrap_or(texts::not_set());
        println!(
            "{} {}: {}",
            warning("→"),
            texts::custom_option_label(),
            value
        );
    }
    Ok(())
}

pub fn use_preset(store: &JsonFileStore, raw: &str) -> Result<(), AppError> {
    let preset = lookup_preset(raw)?;
    let mut controller = SelectionController::new(&store.snapshot());
    controller.select_endpoint(store, preset);
    check_write(store)?;
    controller.observe(&store.snapshot());
    log::info!("base url switched to {}", preset.value);

    println!("{}", success(&texts::endpoint_switched(preset.label)));
    Ok(())
}

pub fn use_custom(store: &JsonFileStore, url: &str) -> Result<(), AppError> {
    let mut controller = SelectionController::new(&store.snapshot());
    controller.select(store, DropdownChoice::Custom);
    controller.edit_custom_url(store, &InputEvent::change(url));
    check_write(store)?;
    controller.observe(&store.snapshot());

    if endpoints::find(url).is_some() {
        // Typing a preset URL verbatim lands back in preset mode.
        println!("{}", success(&texts::endpoint_switched(url)));
    } else {
        println!("{}", success(&texts::custom_url_saved(url)));
    }
    Ok(())
}

pub fn set_key(store: &JsonFileStore, key: &str) -> Result<(), AppError> {
    let controller = SelectionController::new(&store.snapshot());
    controller.edit_api_key(store, &InputEvent::change(key));
    check_write(store)?;

    println!("{}", success(texts::api_key_saved()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_accepts_url_or_label() {
        assert_eq!(
            lookup_preset("api.minimaxi.com").map(|p| p.value).ok(),
            Some("https://api.minimaxi.com/anthropic")
        );
        assert_eq!(
            lookup_preset(" https://api.minimax.io/anthropic ")
                .map(|p| p.label)
                .ok(),
            Some("api.minimax.io")
        );
        let err = lookup_preset("https://api.minimax.io/anthropic/").expect_err("unknown");
        assert!(matches!(
            err,
            AppError::Localized {
                key: "endpoint.unknown",
                ..
            }
        ));
    }

    #[test]
    fn use_preset_by_label_writes_registry_url() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("provider.json");
        std::fs::write(&path, r#"{"minimaxBaseUrl":"https://x.y","other":1}"#)
            .expect("seed provider.json");
        let store = JsonFileStore::open(&path).expect("open store");

        use_preset(&store, "api.minimaxi.com").expect("switch endpoint");

        let snapshot = store.snapshot();
        assert_eq!(
            snapshot.base_url.as_deref(),
            Some("https://api.minimaxi.com/anthropic")
        );
        let reopened = JsonFileStore::open(&path).expect("reopen store");
        assert_eq!(reopened.snapshot(), snapshot);
    }

    #[test]
    fn summary_masks_key_and_labels_preset() {
        let snapshot =
            ProviderSettings::new(Some("https://api.minimax.io/anthropic"), Some("sk-abcdef"));
        let controller = SelectionController::new(&snapshot);
        let lines = summary_lines(&controller, &snapshot);

        assert_eq!(
            lines[0].1,
            "https://api.minimax.io/anthropic (api.minimax.io)"
        );
        assert_eq!(lines[1].1, "Preset");
        assert_eq!(lines[2].1, "*****cdef");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn summary_for_empty_settings_shows_key_link() {
        let snapshot = ProviderSettings::default();
        let controller = SelectionController::new(&snapshot);
        let lines = summary_lines(&controller, &snapshot);

        assert_eq!(lines[0].1, texts::not_set());
        assert_eq!(lines[1].1, "Custom");
        assert_eq!(lines[3].1, endpoints::api_key_url(None));
    }
}
