//! Known-good MiniMax base URLs offered for one-click selection.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointOption {
    pub value: &'static str,
    pub label: &'static str,
}

// Order here is the order shown in the dropdown.
const PRESET_ENDPOINTS: [EndpointOption; 2] = [
    EndpointOption {
        value: "https://api.minimax.io/anthropic",
        label: "api.minimax.io",
    },
    EndpointOption {
        value: "https://api.minimaxi.com/anthropic",
        label: "api.minimaxi.com",
    },
];

const MAINLAND_BASE_URL: &str = "https://api.minimaxi.com/anthropic";
const MAINLAND_API_KEY_URL: &str =
    "https://platform.minimaxi.com/user-center/basic-information/interface-key";
const GLOBAL_API_KEY_URL: &str =
    "https://www.minimax.io/platform/user-center/basic-information/interface-key";

/// All preset endpoints, in presentation order. Always the same slice.
pub fn list() -> &'static [EndpointOption] {
    &PRESET_ENDPOINTS
}

/// Exact-match lookup; no normalization of scheme, case or trailing slash.
pub fn find(value: &str) -> Option<&'static EndpointOption> {
    list().iter().find(|preset| preset.value == value)
}

pub fn find_by_label(label: &str) -> Option<&'static EndpointOption> {
    list().iter().find(|preset| preset.label == label)
}

pub fn default_endpoint() -> &'static EndpointOption {
    &PRESET_ENDPOINTS[0]
}

/// Page where a key for the given endpoint can be created.
pub fn api_key_url(base_url: Option<&str>) -> &'static str {
    if base_url == Some(MAINLAND_BASE_URL) {
        MAINLAND_API_KEY_URL
    } else {
        GLOBAL_API_KEY_URL
    }
}
