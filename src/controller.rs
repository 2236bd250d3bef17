//! Preset/custom selection state for the base URL dropdown.

use crate::endpoints::{self, EndpointOption};
use crate::mode::{self, SelectionMode};
use crate::provider::{ProviderField, ProviderSettings};
use crate::store::ConfigurationStore;
use crate::transform::{self, InputEvent};

/// Dropdown value that stands for "let me type a URL".
pub const CUSTOM_SENTINEL: &str = "custom";

/// Locally held mode. `UserOverride` wins until the stored URL changes or a preset is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeState {
    Derived(SelectionMode),
    UserOverride,
}

impl ModeState {
    pub fn mode(self) -> SelectionMode {
        match self {
            ModeState::Derived(mode) => mode,
            ModeState::UserOverride => SelectionMode::Custom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownChoice<'a> {
    Preset(&'a str),
    Custom,
}

impl<'a> DropdownChoice<'a> {
    /// Map a raw dropdown value; the sentinel becomes `Custom`.
    pub fn from_value(value: &'a str) -> Self {
        if value == CUSTOM_SENTINEL {
            DropdownChoice::Custom
        } else {
            DropdownChoice::Preset(value)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView<'a> {
    pub mode: SelectionMode,
    pub dropdown_value: &'a str,
    /// Present only in custom mode.
    pub custom_url: Option<&'a str>,
    pub api_key: &'a str,
    /// Shown while no key is configured.
    pub api_key_link: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionController {
    state: ModeState,
    observed_base_url: Option<String>,
}

impl SelectionController {
    pub fn new(snapshot: &ProviderSettings) -> Self {
        let base_url = snapshot.base_url.clone();
        Self {
            state: ModeState::Derived(mode::resolve(base_url.as_deref())),
            observed_base_url: base_url,
        }
    }

    pub fn state(&self) -> ModeState {
        self.state
    }

    pub fn mode(&self) -> SelectionMode {
        self.state.mode()
    }

    /// Host hook with both snapshots. Returns true when the mode was re-derived.
    pub fn on_snapshot_change(
        &mut self,
        previous: &ProviderSettings,
        current: &ProviderSettings,
    ) -> bool {
        if previous.base_url == current.base_url {
            return false;
        }
        self.adopt(current.base_url.clone());
        true
    }

    /// Compare against the last observed URL; call once per render.
    pub fn observe(&mut self, current: &ProviderSettings) -> bool {
        if self.observed_base_url == current.base_url {
            return false;
        }
        self.adopt(current.base_url.clone());
        true
    }

    fn adopt(&mut self, base_url: Option<String>) {
        let next = ModeState::Derived(mode::resolve(base_url.as_deref()));
        if next != self.state {
            log::debug!("base url mode {:?} -> {:?}", self.state, next);
        }
        self.state = next;
        self.observed_base_url = base_url;
    }

    pub fn select<S>(&mut self, store: &S, choice: DropdownChoice<'_>)
    where
        S: ConfigurationStore + ?Sized,
    {
        match choice {
            DropdownChoice::Custom => {
                self.state = ModeState::UserOverride;
            }
            DropdownChoice::Preset(value) => {
                // A value outside the registry stays custom even if nothing changes on disk.
                self.state = ModeState::Derived(mode::resolve(Some(value)));
                store.write(ProviderField::BaseUrl, value.to_string());
            }
        }
    }

    pub fn select_endpoint<S>(&mut self, store: &S, endpoint: &EndpointOption)
    where
        S: ConfigurationStore + ?Sized,
    {
        self.select(store, DropdownChoice::Preset(endpoint.value));
    }

    /// Free-text edit of the URL. Ignored unless in custom mode; returns whether it was written.
    pub fn edit_custom_url<S>(&self, store: &S, event: &InputEvent) -> bool
    where
        S: ConfigurationStore + ?Sized,
    {
        if !self.mode().is_custom() {
            log::debug!("ignoring base url edit outside custom mode");
            return false;
        }
        transform::bind(store, ProviderField::BaseUrl)(event);
        true
    }

    pub fn edit_api_key<S>(&self, store: &S, event: &InputEvent)
    where
        S: ConfigurationStore + ?Sized,
    {
        transform::bind(store, ProviderField::ApiKey)(event);
    }

    pub fn view<'a>(&self, snapshot: &'a ProviderSettings) -> FormView<'a> {
        let mode = self.mode();
        let dropdown_value = match mode {
            SelectionMode::Custom => CUSTOM_SENTINEL,
            SelectionMode::Preset => snapshot
                .base_url
                .as_deref()
                .filter(|url| !url.is_empty())
                .unwrap_or(endpoints::default_endpoint().value),
        };
        FormView {
            mode,
            dropdown_value,
            custom_url: mode
                .is_custom()
                .then(|| snapshot.display_value(ProviderField::BaseUrl)),
            api_key: snapshot.display_value(ProviderField::ApiKey),
            api_key_link: (!snapshot.has_api_key())
                .then(|| endpoints::api_key_url(snapshot.base_url.as_deref())),
        }
    }
}

/// Registry entries followed by the sentinel, as `(value, label)` pairs.
pub fn dropdown_options(custom_label: &str) -> Vec<(&str, &str)> {
    endpoints::list()
        .iter()
        .map(|preset| (preset.value, preset.label))
        .chain(std::iter::once((CUSTOM_SENTINEL, custom_label)))
        .collect()
}
