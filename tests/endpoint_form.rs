use serde_json::json;

use minimax_switch_lib::{
    list, resolve, ConfigurationStore, DropdownChoice, InMemoryStore, InputEvent, ModeState,
    ProviderField, SelectionController, SelectionMode, CUSTOM_SENTINEL,
};

#[path = "support.rs"]
mod support;
use support::{settings, TestFs, GLOBAL, MAINLAND};

#[test]
fn preset_url_renders_dropdown_without_text_field() {
    let store = InMemoryStore::new(settings(Some(GLOBAL)));
    let snapshot = store.snapshot();
    let controller = SelectionController::new(&snapshot);
    let view = controller.view(&snapshot);

    assert_eq!(view.mode, SelectionMode::Preset);
    assert_eq!(view.dropdown_value, GLOBAL);
    assert_eq!(view.custom_url, None);
}

#[test]
fn unknown_url_renders_sentinel_and_text_field() {
    let store = InMemoryStore::new(settings(Some("https://my.custom.host/anthropic")));
    let snapshot = store.snapshot();
    let controller = SelectionController::new(&snapshot);
    let view = controller.view(&snapshot);

    assert_eq!(view.mode, SelectionMode::Custom);
    assert_eq!(view.dropdown_value, CUSTOM_SENTINEL);
    assert_eq!(view.custom_url, Some("https://my.custom.host/anthropic"));
}

#[test]
fn custom_pick_then_typing_then_preset_pick() {
    let store = InMemoryStore::new(settings(Some(GLOBAL)));
    let mut controller = SelectionController::new(&store.snapshot());

    // Sentinel: custom mode, store untouched.
    controller.select(&store, DropdownChoice::from_value(CUSTOM_SENTINEL));
    controller.observe(&store.snapshot());
    assert_eq!(controller.mode(), SelectionMode::Custom);
    assert!(store.writes().is_empty());
    assert_eq!(store.snapshot().base_url.as_deref(), Some(GLOBAL));

    // One write per keystroke.
    let typed = "https://x.y/anthropic";
    let mut text = String::new();
    for c in typed.chars() {
        text.push(c);
        controller.edit_custom_url(&store, &InputEvent::input(text.clone()));
        controller.observe(&store.snapshot());
    }
    assert_eq!(store.write_count(ProviderField::BaseUrl), typed.len());
    assert_eq!(store.snapshot().base_url.as_deref(), Some(typed));
    assert_eq!(controller.mode(), SelectionMode::Custom);

    // Preset pick from custom: exactly one more write, preset after next snapshot.
    let before = store.writes().len();
    controller.select(&store, DropdownChoice::from_value(MAINLAND));
    assert_eq!(store.writes().len(), before + 1);
    assert_eq!(
        store.writes().last(),
        Some(&(ProviderField::BaseUrl, MAINLAND.to_string()))
    );
    controller.observe(&store.snapshot());
    assert_eq!(controller.state(), ModeState::Derived(SelectionMode::Preset));
}

#[test]
fn writing_any_registry_value_resolves_preset() {
    for preset in list() {
        let store = InMemoryStore::default();
        store.write(ProviderField::BaseUrl, preset.value.to_string());
        assert_eq!(
            resolve(store.snapshot().base_url.as_deref()),
            SelectionMode::Preset
        );
    }
}

#[test]
fn json_store_persists_form_writes_and_keeps_other_keys() {
    let fs = TestFs::new();
    fs.seed(&json!({
        "apiProvider": "minimax",
        "minimaxBaseUrl": "https://my.custom.host/anthropic",
        "modelTemperature": 0.2
    }));

    let store = fs.open();
    let mut controller = SelectionController::new(&store.snapshot());
    assert_eq!(controller.mode(), SelectionMode::Custom);

    controller.select(&store, DropdownChoice::Preset(GLOBAL));
    controller.edit_api_key(&store, &InputEvent::change("sk-test"));
    assert!(store.take_error().is_none());

    let on_disk = fs.read_json();
    assert_eq!(on_disk["minimaxBaseUrl"], json!(GLOBAL));
    assert_eq!(on_disk["minimaxApiKey"], json!("sk-test"));
    assert_eq!(on_disk["apiProvider"], json!("minimax"));
    assert_eq!(on_disk["modelTemperature"], json!(0.2));

    // A fresh store (next launch) sees the preset.
    let reopened = fs.open();
    assert_eq!(
        SelectionController::new(&reopened.snapshot()).mode(),
        SelectionMode::Preset
    );
}

#[test]
fn external_file_edit_is_picked_up_on_reload() {
    let fs = TestFs::new();
    fs.seed(&json!({ "minimaxBaseUrl": GLOBAL }));
    let store = fs.open();
    let mut controller = SelectionController::new(&store.snapshot());
    controller.select(&store, DropdownChoice::Custom);
    assert_eq!(controller.state(), ModeState::UserOverride);

    fs.seed(&json!({ "minimaxBaseUrl": MAINLAND }));
    store.reload().expect("reload provider file");

    assert!(controller.observe(&store.snapshot()));
    assert_eq!(controller.state(), ModeState::Derived(SelectionMode::Preset));
    assert!(!controller.observe(&store.snapshot()));
}
