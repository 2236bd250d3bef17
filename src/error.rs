use std::path::Path;
use std::sync::PoisonError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("配置错误: {0}")]
    Config(String),
    #[error("IO 错误: {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{context}: {source}")]
    IoContext {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON 解析错误: {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("JSON 序列化失败: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },
    #[error("锁获取失败: {0}")]
    Lock(String),
    #[error("{zh} ({en})")]
    Localized {
        key: &'static str,
        zh: String,
        en: String,
    },
    #[error("{0}")]
    Message(String),
}

impl AppError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    pub fn json(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    pub fn localized(key: &'static str, zh: impl Into<String>, en: impl Into<String>) -> Self {
        Self::Localized {
            key,
            zh: zh.into(),
            en: en.into(),
        }
    }

    /// Message in the requested language, falling back to `Display` for non-localized variants.
    pub fn message_for(&self, chinese: bool) -> String {
        match self {
            Self::Localized { zh, en, .. } => {
                if chinese {
                    zh.clone()
                } else {
                    en.clone()
                }
            }
            other => other.to_string(),
        }
    }
}

impl<T> From<PoisonError<T>> for AppError {
    fn from(err: PoisonError<T>) -> Self {
        Self::Lock(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localized_message_picks_language() {
        let err = AppError::localized("endpoint.unknown", "未知端点", "Unknown endpoint");
        assert_eq!(err.message_for(true), "未知端点");
        assert_eq!(err.message_for(false), "Unknown endpoint");
        assert_eq!(err.to_string(), "未知端点 (Unknown endpoint)");
    }

    #[test]
    fn io_error_includes_path() {
        let err = AppError::io(
            "/tmp/provider.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().contains("/tmp/provider.json"));
        assert_eq!(err.message_for(false), err.to_string());
    }
}
