use serde_json::{Map, Value};

/// 供应商配置快照（仅包含本表单读写的字段）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderSettings {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

impl ProviderSettings {
    pub fn new(base_url: Option<&str>, api_key: Option<&str>) -> Self {
        Self {
            base_url: base_url.map(str::to_string),
            api_key: api_key.map(str::to_string),
        }
    }

    pub fn get(&self, field: ProviderField) -> Option<&str> {
        match field {
            ProviderField::BaseUrl => self.base_url.as_deref(),
            ProviderField::ApiKey => self.api_key.as_deref(),
        }
    }

    /// Absent fields display as an empty string.
    pub fn display_value(&self, field: ProviderField) -> &str {
        self.get(field).unwrap_or("")
    }

    pub fn set(&mut self, field: ProviderField, value: String) {
        match field {
            ProviderField::BaseUrl => self.base_url = Some(value),
            ProviderField::ApiKey => self.api_key = Some(value),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// Read the two fields out of a larger provider JSON object.
    pub fn from_map(obj: &Map<String, Value>) -> Self {
        let text = |field: ProviderField| {
            obj.get(field.key())
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };
        Self {
            base_url: text(ProviderField::BaseUrl),
            api_key: text(ProviderField::ApiKey),
        }
    }

    /// Write the fields that are set into `obj`; unset fields and other keys stay as they were.
    pub fn merge_into(&self, obj: &mut Map<String, Value>) {
        for field in ProviderField::ALL {
            if let Some(v) = self.get(field) {
                obj.insert(field.key().to_string(), Value::String(v.to_string()));
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderField {
    BaseUrl,
    ApiKey,
}

impl ProviderField {
    pub const ALL: [ProviderField; 2] = [ProviderField::BaseUrl, ProviderField::ApiKey];

    pub fn key(self) -> &'static str {
        match self {
            ProviderField::BaseUrl => "minimaxBaseUrl",
            ProviderField::ApiKey => "minimaxApiKey",
        }
    }
}

impl std::fmt::Display for ProviderField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Mask all but the last four characters of a key for display.
pub fn mask_api_key(key: &str) -> String {
    let count = key.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = key.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_map_ignores_non_string_values() {
        let obj = json!({
            "minimaxBaseUrl": "https://api.minimax.io/anthropic",
            "minimaxApiKey": null
        })
        .as_object()
        .cloned()
        .expect("object");
        assert_eq!(
            ProviderSettings::from_map(&obj),
            ProviderSettings::new(Some("https://api.minimax.io/anthropic"), None)
        );
    }

    #[test]
    fn display_value_defaults_to_empty() {
        let settings = ProviderSettings::default();
        assert_eq!(settings.display_value(ProviderField::BaseUrl), "");
        assert_eq!(settings.display_value(ProviderField::ApiKey), "");
        assert!(!settings.has_api_key());
    }

    #[test]
    fn merge_into_preserves_unrelated_keys() {
        let mut obj = json!({ "apiProvider": "minimax", "minimaxApiKey": "old" })
            .as_object()
            .cloned()
            .expect("object");
        let settings = ProviderSettings::new(Some("https://x.y/anthropic"), None);
        settings.merge_into(&mut obj);

        assert_eq!(obj.get("apiProvider"), Some(&json!("minimax")));
        assert_eq!(obj.get("minimaxBaseUrl"), Some(&json!("https://x.y/anthropic")));
        assert_eq!(obj.get("minimaxApiKey"), Some(&json!("old")));
        assert_eq!(
            ProviderSettings::from_map(&obj),
            ProviderSettings::new(Some("https://x.y/anthropic"), Some("old"))
        );
    }

    #[test]
    fn mask_api_key_keeps_tail() {
        assert_eq!(mask_api_key("sk-123456"), "*****3456");
        assert_eq!(mask_api_key("abc"), "***");
        assert_eq!(mask_api_key(""), "");
    }
}
