// Core modules
mod controller;
mod endpoints;
mod error;
mod mode;
mod provider;
mod settings;
mod store;
mod transform;

// CLI module
pub mod cli;

// Public exports
pub use controller::{
    dropdown_options, DropdownChoice, FormView, ModeState, SelectionController, CUSTOM_SENTINEL,
};
pub use endpoints::{api_key_url, default_endpoint, find, find_by_label, list, EndpointOption};
pub use error::AppError;
pub use mode::{resolve, SelectionMode};
pub use provider::{mask_api_key, ProviderField, ProviderSettings};
pub use settings::{app_dir, get_settings, update_settings, AppSettings};
pub use store::{ConfigurationStore, InMemoryStore, JsonFileStore};
pub use transform::{
    bind, bind_with, input_event_transform, InputEvent, Transform,
};
