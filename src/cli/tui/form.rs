use crate::controller::SelectionController;
use crate::provider::{ProviderField, ProviderSettings};
use crate::store::ConfigurationStore;
use crate::transform::InputEvent;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    fn byte_index(line: &str, col: usize) -> usize {
        line.char_indices()
            .nth(col)
            .map(|(i, _)| i)
            .unwrap_or(line.len())
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        let len = self.value.chars().count();
        self.cursor = (self.cursor + 1).min(len);
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    pub fn insert_char(&mut self, c: char) -> bool {
        let idx = Self::byte_index(&self.value, self.cursor);
        self.value.insert(idx, c);
        self.cursor += 1;
        true
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 || self.value.is_empty() {
            return false;
        }
        let start = Self::byte_index(&self.value, self.cursor.saturating_sub(1));
        let end = Self::byte_index(&self.value, self.cursor);
        self.value.replace_range(start..end, "");
        self.cursor = self.cursor.saturating_sub(1);
        true
    }

    pub fn delete(&mut self) -> bool {
        let len = self.value.chars().count();
        if self.value.is_empty() || self.cursor >= len {
            return false;
        }
        let start = Self::byte_index(&self.value, self.cursor);
        let end = Self::byte_index(&self.value, self.cursor + 1);
        self.value.replace_range(start..end, "");
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Endpoint,
    BaseUrl,
    ApiKey,
}

impl FormField {
    pub fn provider_field(self) -> Option<ProviderField> {
        match self {
            FormField::Endpoint => None,
            FormField::BaseUrl => Some(ProviderField::BaseUrl),
            FormField::ApiKey => Some(ProviderField::ApiKey),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EndpointFormState {
    pub controller: SelectionController,
    pub field_idx: usize,
    pub editing: bool,
    pub base_url: TextInput,
    pub api_key: TextInput,
}

impl EndpointFormState {
    pub fn new(snapshot: &ProviderSettings) -> Self {
        Self {
            controller: SelectionController::new(snapshot),
            field_idx: 0,
            editing: false,
            base_url: TextInput::new(snapshot.display_value(ProviderField::BaseUrl)),
            api_key: TextInput::new(snapshot.display_value(ProviderField::ApiKey)),
        }
    }

    /// The URL text field is only part of the form in custom mode.
    pub fn fields(&self) -> Vec<FormField> {
        let mut fields = vec![FormField::Endpoint];
        if self.controller.mode().is_custom() {
            fields.push(FormField::BaseUrl);
        }
        fields.push(FormField::ApiKey);
        fields
    }

    pub fn selected_field(&self) -> FormField {
        let fields = self.fields();
        fields[self.field_idx.min(fields.len() - 1)]
    }

    pub fn focus(&mut self, field: FormField) {
        if let Some(idx) = self.fields().iter().position(|f| *f == field) {
            self.field_idx = idx;
        }
    }

    pub fn input(&self, field: FormField) -> Option<&TextInput> {
        match field {
            FormField::Endpoint => None,
            FormField::BaseUrl => Some(&self.base_url),
            FormField::ApiKey => Some(&self.api_key),
        }
    }

    pub fn input_mut(&mut self, field: FormField) -> Option<&mut TextInput> {
        match field {
            FormField::Endpoint => None,
            FormField::BaseUrl => Some(&mut self.base_url),
            FormField::ApiKey => Some(&mut self.api_key),
        }
    }

    /// Per-render hook: re-derive the mode on URL changes and refresh idle inputs.
    pub fn observe(&mut self, snapshot: &ProviderSettings) -> bool {
        let selected_before = self.selected_field();
        let changed = self.controller.observe(snapshot);
        let fields = self.fields();

        if fields.contains(&selected_before) {
            self.focus(selected_before);
        } else {
            self.field_idx = self.field_idx.min(fields.len() - 1);
            self.editing = false;
        }

        let editing_field = self.editing.then_some(selected_before);
        if editing_field != Some(FormField::BaseUrl) {
            self.sync_input(FormField::BaseUrl, snapshot);
        }
        if editing_field != Some(FormField::ApiKey) {
            self.sync_input(FormField::ApiKey, snapshot);
        }
        changed
    }

    fn sync_input(&mut self, field: FormField, snapshot: &ProviderSettings) {
        let Some(provider_field) = field.provider_field() else {
            return;
        };
        let stored = snapshot.display_value(provider_field).to_string();
        if let Some(input) = self.input_mut(field) {
            if input.value != stored {
                input.set(stored);
            }
        }
    }

    /// Send the current text of `field` to the store as one input event.
    pub fn commit_edit<S>(&self, store: &S, field: FormField)
    where
        S: ConfigurationStore + ?Sized,
    {
        let Some(input) = self.input(field) else {
            return;
        };
        let event = InputEvent::input(input.value.clone());
        match field {
            FormField::BaseUrl => {
                self.controller.edit_custom_url(store, &event);
            }
            FormField::ApiKey => self.controller.edit_api_key(store, &event),
            FormField::Endpoint => {}
        }
    }
}
