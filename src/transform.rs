//! Turns UI input events into stored field values.

use crate::provider::ProviderField;
use crate::store::ConfigurationStore;

/// Event emitted by a text control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The control's full text after a keystroke.
    Input { value: String },
    /// The control's full text after a committed change (paste, blur).
    Change { value: String },
}

impl InputEvent {
    pub fn input(value: impl Into<String>) -> Self {
        InputEvent::Input {
            value: value.into(),
        }
    }

    pub fn change(value: impl Into<String>) -> Self {
        InputEvent::Change {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        match self {
            InputEvent::Input { value } | InputEvent::Change { value } => value,
        }
    }
}

pub type Transform<E> = fn(&E) -> String;

/// Default transform: the raw text of the control, unmodified.
pub fn input_event_transform(event: &InputEvent) -> String {
    event.value().to_string()
}

/// Handler that writes `field` from an [`InputEvent`] using the default transform.
pub fn bind<'a, S>(store: &'a S, field: ProviderField) -> impl Fn(&InputEvent) + 'a
where
    S: ConfigurationStore + ?Sized,
{
    bind_with(store, field, input_event_transform)
}

/// Handler that writes `field` using a call-site transform for event type `E`.
pub fn bind_with<'a, S, E>(
    store: &'a S,
    field: ProviderField,
    transform: Transform<E>,
) -> impl Fn(&E) + 'a
where
    S: ConfigurationStore + ?Sized,
    E: 'a,
{
    move |event: &E| store.write(field, transform(event))
}
