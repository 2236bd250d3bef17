use crate::endpoints;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Preset,
    Custom,
}

impl SelectionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SelectionMode::Preset => "preset",
            SelectionMode::Custom => "custom",
        }
    }

    pub fn is_custom(self) -> bool {
        self == SelectionMode::Custom
    }
}

/// `Preset` only when the URL is byte-for-byte one of the registry values.
pub fn resolve(current_url: Option<&str>) -> SelectionMode {
    match current_url {
        Some(url) if endpoints::find(url).is_some() => SelectionMode::Preset,
        _ => SelectionMode::Custom,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_registry_value_is_preset() {
        for preset in endpoints::list() {
            assert_eq!(resolve(Some(preset.value)), SelectionMode::Preset);
        }
    }

    #[test]
    fn anything_else_is_custom() {
        let cases = [
            None,
            Some(""),
            Some("https://api.minimax.io/anthropic/"),
            Some("https://API.minimax.io/anthropic"),
            Some("HTTPS://api.minimaxi.com/anthropic"),
            Some(" https://api.minimax.io/anthropic"),
            Some("https://api.minimax.io"),
            Some("https://my.custom.host/anthropic"),
        ];
        for url in cases {
            assert_eq!(resolve(url), SelectionMode::Custom, "url: {url:?}");
        }
    }

    #[test]
    fn resolve_is_idempotent() {
        for url in [None, Some("https://api.minimax.io/anthropic"), Some("x")] {
            assert_eq!(resolve(url), resolve(url));
        }
    }
}
