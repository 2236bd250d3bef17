use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::cli::i18n::texts;
use crate::controller::{dropdown_options, DropdownChoice};
use crate::provider::ProviderSettings;
use crate::store::ConfigurationStore;

use super::form::{EndpointFormState, FormField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub remaining_ticks: u16,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
            remaining_ticks: 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    EndpointPicker { selected: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Reload,
    Quit,
}

#[derive(Debug, Clone)]
pub struct App {
    pub form: EndpointFormState,
    pub overlay: Overlay,
    pub toast: Option<Toast>,
}

impl App {
    pub fn new(snapshot: &ProviderSettings) -> Self {
        Self {
            form: EndpointFormState::new(snapshot),
            overlay: Overlay::None,
            toast: None,
        }
    }

    pub fn observe(&mut self, snapshot: &ProviderSettings) -> bool {
        self.form.observe(snapshot)
    }

    pub fn push_toast(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.toast = Some(Toast::new(message, kind));
    }

    pub fn on_tick(&mut self) {
        if let Some(toast) = self.toast.as_mut() {
            toast.remaining_ticks = toast.remaining_ticks.saturating_sub(1);
            if toast.remaining_ticks == 0 {
                self.toast = None;
            }
        }
    }

    pub fn on_key<S>(&mut self, key: KeyEvent, store: &S) -> Action
    where
        S: ConfigurationStore + ?Sized,
    {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            return Action::Quit;
        }

        if let Overlay::EndpointPicker { selected } = self.overlay {
            self.on_picker_key(key, selected, store);
            return Action::None;
        }

        if self.form.editing {
            self.on_editing_key(key, store);
            return Action::None;
        }

        let len = self.form.fields().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.form.field_idx = self.form.field_idx.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.form.field_idx = (self.form.field_idx + 1).min(len - 1);
            }
            KeyCode::Enter => match self.form.selected_field() {
                FormField::Endpoint => self.open_picker(store),
                FormField::BaseUrl | FormField::ApiKey => self.form.editing = true,
            },
            KeyCode::Char('r') => return Action::Reload,
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            _ => {}
        }
        Action::None
    }

    fn open_picker<S>(&mut self, store: &S)
    where
        S: ConfigurationStore + ?Sized,
    {
        let snapshot = store.snapshot();
        let view = self.form.controller.view(&snapshot);
        let selected = dropdown_options(texts::custom_option_label())
            .iter()
            .position(|(value, _)| *value == view.dropdown_value)
            .unwrap_or(0);
        self.overlay = Overlay::EndpointPicker { selected };
    }

    fn on_picker_key<S>(&mut self, key: KeyEvent, selected: usize, store: &S)
    where
        S: ConfigurationStore + ?Sized,
    {
        let options = dropdown_options(texts::custom_option_label());
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.overlay = Overlay::EndpointPicker {
                    selected: selected.saturating_sub(1),
                };
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.overlay = Overlay::EndpointPicker {
                    selected: (selected + 1).min(options.len() - 1),
                };
            }
            KeyCode::Enter => {
                self.overlay = Overlay::None;
                let Some((value, label)) = options.get(selected).copied() else {
                    return;
                };
                let choice = DropdownChoice::from_value(value);
                self.form.controller.select(store, choice);
                match choice {
                    DropdownChoice::Preset(_) => {
                        self.push_toast(texts::endpoint_switched(label), ToastKind::Success);
                    }
                    DropdownChoice::Custom => {
                        self.form.focus(FormField::BaseUrl);
                        self.form.editing = true;
                    }
                }
            }
            KeyCode::Esc | KeyCode::Char('q') => self.overlay = Overlay::None,
            _ => {}
        }
    }

    fn on_editing_key<S>(&mut self, key: KeyEvent, store: &S)
    where
        S: ConfigurationStore + ?Sized,
    {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Tab) {
            self.form.editing = false;
            return;
        }

        let field = self.form.selected_field();
        let Some(input) = self.form.input_mut(field) else {
            self.form.editing = false;
            return;
        };

        let changed = match key.code {
            KeyCode::Left => {
                input.move_left();
                false
            }
            KeyCode::Right => {
                input.move_right();
                false
            }
            KeyCode::Home => {
                input.move_home();
                false
            }
            KeyCode::End => {
                input.move_end();
                false
            }
            KeyCode::Backspace => input.backspace(),
            KeyCode::Delete => input.delete(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                input.insert_char(c)
            }
            _ => false,
        };

        if changed {
            self.form.commit_edit(store, field);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::SelectionMode;
    use crate::provider::ProviderField;
    use crate::store::InMemoryStore;

    const GLOBAL: &str = "https://api.minimax.io/anthropic";
    const MAINLAND: &str = "https://api.minimaxi.com/anthropic";

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    fn type_str(app: &mut App, store: &InMemoryStore, text: &str) {
        for c in text.chars() {
            app.on_key(key(KeyCode::Char(c)), store);
            app.observe(&store.snapshot());
        }
    }

    #[test]
    fn enter_on_endpoint_opens_picker_at_current_value() {
        let store = InMemoryStore::new(ProviderSettings::new(Some(MAINLAND), None));
        let mut app = App::new(&store.snapshot());

        app.on_key(key(KeyCode::Enter), &store);
        assert_eq!(app.overlay, Overlay::EndpointPicker { selected: 1 });
    }

    #[test]
    fn picking_custom_starts_editing_without_writing() {
        let store = InMemoryStore::new(ProviderSettings::new(Some(GLOBAL), None));
        let mut app = App::new(&store.snapshot());

        app.on_key(key(KeyCode::Enter), &store);
        app.on_key(key(KeyCode::Down), &store);
        app.on_key(key(KeyCode::Down), &store);
        app.on_key(key(KeyCode::Enter), &store);
        app.observe(&store.snapshot());

        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(app.form.controller.mode(), SelectionMode::Custom);
        assert_eq!(app.form.selected_field(), FormField::BaseUrl);
        assert!(app.form.editing);
        assert!(store.writes().is_empty());
    }

    #[test]
    fn typing_custom_url_writes_each_keystroke() {
        let store = InMemoryStore::new(ProviderSettings::default());
        let mut app = App::new(&store.snapshot());
        app.on_key(key(KeyCode::Down), &store);
        assert_eq!(app.form.selected_field(), FormField::BaseUrl);
        app.on_key(key(KeyCode::Enter), &store);

        type_str(&mut app, &store, "https://x.y");
        app.on_key(key(KeyCode::Backspace), &store);

        assert_eq!(store.write_count(ProviderField::BaseUrl), 12);
        assert_eq!(store.snapshot().base_url.as_deref(), Some("https://x."));
        app.on_key(key(KeyCode::Left), &store);
        assert_eq!(store.write_count(ProviderField::BaseUrl), 12);
    }

    #[test]
    fn picking_preset_writes_once_and_hides_url_field() {
        let store = InMemoryStore::new(ProviderSettings::new(Some("https://x.y"), None));
        let mut app = App::new(&store.snapshot());

        app.on_key(key(KeyCode::Enter), &store);
        assert_eq!(app.overlay, Overlay::EndpointPicker { selected: 2 });
        app.on_key(key(KeyCode::Up), &store);
        app.on_key(key(KeyCode::Enter), &store);
        app.observe(&store.snapshot());

        assert_eq!(
            store.writes(),
            vec![(ProviderField::BaseUrl, MAINLAND.to_string())]
        );
        assert_eq!(app.form.fields(), vec![FormField::Endpoint, FormField::ApiKey]);
        assert!(matches!(
            app.toast.as_ref().map(|t| t.kind),
            Some(ToastKind::Success)
        ));
    }

    #[test]
    fn api_key_edit_keeps_mode() {
        let store = InMemoryStore::new(ProviderSettings::new(Some(GLOBAL), None));
        let mut app = App::new(&store.snapshot());
        app.on_key(key(KeyCode::Down), &store);
        app.on_key(key(KeyCode::Enter), &store);
        type_str(&mut app, &store, "sk");
        app.on_key(key(KeyCode::Esc), &store);

        assert!(!app.form.editing);
        assert_eq!(store.snapshot().api_key.as_deref(), Some("sk"));
        assert_eq!(app.form.controller.mode(), SelectionMode::Preset);
    }

    #[test]
    fn quit_and_reload_keys() {
        let store = InMemoryStore::default();
        let mut app = App::new(&store.snapshot());
        assert_eq!(app.on_key(key(KeyCode::Char('r')), &store), Action::Reload);
        assert_eq!(app.on_key(key(KeyCode::Char('q')), &store), Action::Quit);
        assert_eq!(app.on_key(ctrl(KeyCode::Char('c')), &store), Action::Quit);
    }

    #[test]
    fn toast_expires_after_ticks() {
        let store = InMemoryStore::default();
        let mut app = App::new(&store.snapshot());
        app.push_toast("hi", ToastKind::Info);
        for _ in 0..12 {
            app.on_tick();
        }
        assert!(app.toast.is_none());
    }
}
