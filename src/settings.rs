use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::{OnceLock, RwLock};

use crate::error::AppError;

const APP_DIR_NAME: &str = ".minimax-switch";
const PROVIDER_FILE_NAME: &str = "provider.json";

/// 应用设置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// 覆盖默认的供应商配置文件路径
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_config_path: Option<String>,
}

pub fn app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

impl AppSettings {
    fn settings_path() -> PathBuf {
        app_dir().join("settings.json")
    }

    fn normalize(&mut self) {
        self.provider_config_path = self
            .provider_config_path
            .as_ref()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());

        self.language = self
            .language
            .as_ref()
            .map(|s| s.trim())
            .filter(|s| matches!(*s, "en" | "zh"))
            .map(|s| s.to_string());
    }

    pub fn load() -> Self {
        let path = Self::settings_path();
        let Ok(content) = fs::read_to_string(&path) else {
            return Self::default();
        };
        match serde_json::from_str::<AppSettings>(&content) {
            Ok(mut settings) => {
                settings.normalize();
                settings
            }
            Err(err) => {
                log::warn!(
                    "解析设置文件失败，将使用默认设置。路径: {}, 错误: {}",
                    path.display(),
                    err
                );
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), AppError> {
        let mut normalized = self.clone();
        normalized.normalize();
        let json = serde_json::to_string_pretty(&normalized)
            .map_err(|e| AppError::JsonSerialize { source: e })?;
        crate::store::write_atomic(&Self::settings_path(), json.as_bytes())
    }

    /// Explicit override first, then the default file under the app dir.
    pub fn provider_config_path(&self) -> PathBuf {
        self.provider_config_path
            .as_deref()
            .map(resolve_override_path)
            .unwrap_or_else(|| app_dir().join(PROVIDER_FILE_NAME))
    }
}

fn settings_store() -> &'static RwLock<AppSettings> {
    static STORE: OnceLock<RwLock<AppSettings>> = OnceLock::new();
    STORE.get_or_init(|| {
        if cfg!(test) {
            // Unit tests must not read the real user settings.
            RwLock::new(AppSettings::default())
        } else {
            RwLock::new(AppSettings::load())
        }
    })
}

pub(crate) fn resolve_override_path(raw: &str) -> PathBuf {
    if raw == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(stripped) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    } else if let Some(stripped) = raw.strip_prefix("~\\") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }

    PathBuf::from(raw)
}

pub fn get_settings() -> AppSettings {
    settings_store()
        .read()
        .map(|s| s.clone())
        .unwrap_or_default()
}

pub fn update_settings(mut new_settings: AppSettings) -> Result<(), AppError> {
    new_settings.normalize();
    new_settings.save()?;

    let mut guard = settings_store().write()?;
    *guard = new_settings;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_drops_unknown_language_and_blank_path() {
        let mut settings = AppSettings {
            language: Some(" fr ".into()),
            provider_config_path: Some("   ".into()),
        };
        settings.normalize();
        assert_eq!(settings, AppSettings::default());

        let mut settings = AppSettings {
            language: Some(" zh".into()),
            provider_config_path: Some(" /tmp/p.json ".into()),
        };
        settings.normalize();
        assert_eq!(settings.language.as_deref(), Some("zh"));
        assert_eq!(
            settings.provider_config_path(),
            PathBuf::from("/tmp/p.json")
        );
    }

    #[test]
    fn default_provider_path_lives_in_app_dir() {
        let settings = AppSettings::default();
        assert_eq!(
            settings.provider_config_path(),
            app_dir().join(PROVIDER_FILE_NAME)
        );
    }

    #[test]
    fn tilde_override_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(resolve_override_path("~/x.json"), home.join("x.json"));
            assert_eq!(resolve_override_path("~"), home);
        }
        assert_eq!(resolve_override_path("/abs"), PathBuf::from("/abs"));
    }

    #[test]
    fn deserializes_camel_case() {
        let settings: AppSettings =
            serde_json::from_str(r#"{"language":"zh","providerConfigPath":"~/p.json"}"#)
                .expect("parse settings");
        assert_eq!(settings.provider_config_path.as_deref(), Some("~/p.json"));
    }
}
