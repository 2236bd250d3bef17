use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::{Map, Value};

use crate::error::AppError;
use crate::provider::{ProviderField, ProviderSettings};

/// Owner of the provider settings. The form only reads snapshots and calls `write`.
///
/// `write` is fire-and-forget: the caller never waits for or inspects the result,
/// and the new value is only observed through the next `snapshot`.
pub trait ConfigurationStore {
    fn snapshot(&self) -> ProviderSettings;
    fn write(&self, field: ProviderField, value: String);
}

fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Store kept entirely in memory, recording every write in order.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    settings: RwLock<ProviderSettings>,
    writes: RwLock<Vec<(ProviderField, String)>>,
}

impl InMemoryStore {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            settings: RwLock::new(settings),
            writes: RwLock::new(Vec::new()),
        }
    }

    /// Swap in a whole new snapshot, as if the settings were changed elsewhere.
    pub fn replace(&self, settings: ProviderSettings) {
        *write_lock(&self.settings) = settings;
    }

    pub fn writes(&self) -> Vec<(ProviderField, String)> {
        read_lock(&self.writes).clone()
    }

    pub fn write_count(&self, field: ProviderField) -> usize {
        read_lock(&self.writes)
            .iter()
            .filter(|(f, _)| *f == field)
            .count()
    }
}

impl ConfigurationStore for InMemoryStore {
    fn snapshot(&self) -> ProviderSettings {
        read_lock(&self.settings).clone()
    }

    fn write(&self, field: ProviderField, value: String) {
        log::debug!("write {field} ({} chars)", value.chars().count());
        write_lock(&self.writes).push((field, value.clone()));
        write_lock(&self.settings).set(field, value);
    }
}

/// Store backed by a JSON object on disk. Keys other than the two form fields are
/// kept as-is on every rewrite.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    document: RwLock<Map<String, Value>>,
    last_error: RwLock<Option<AppError>>,
}

impl JsonFileStore {
    /// A missing file starts out as an empty document.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        let document = read_document(&path)?;
        log::debug!("provider settings loaded from {}", path.display());
        Ok(Self {
            path,
            document: RwLock::new(document),
            last_error: RwLock::new(None),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the file, picking up edits made by other processes.
    pub fn reload(&self) -> Result<(), AppError> {
        let document = read_document(&self.path)?;
        *write_lock(&self.document) = document;
        Ok(())
    }

    /// Most recent persistence failure, if any, clearing it.
    pub fn take_error(&self) -> Option<AppError> {
        write_lock(&self.last_error).take()
    }

    fn persist(&self, document: &Map<String, Value>) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(document)
            .map_err(|e| AppError::JsonSerialize { source: e })?;
        write_atomic(&self.path, json.as_bytes())
    }
}

impl ConfigurationStore for JsonFileStore {
    fn snapshot(&self) -> ProviderSettings {
        ProviderSettings::from_map(&read_lock(&self.document))
    }

    fn write(&self, field: ProviderField, value: String) {
        let mut document = write_lock(&self.document);
        let mut settings = ProviderSettings::from_map(&document);
        settings.set(field, value);

        // 仅在落盘成功后更新内存中的文档
        let mut staged = document.clone();
        settings.merge_into(&mut staged);
        match self.persist(&staged) {
            Ok(()) => *document = staged,
            Err(err) => {
                log::error!(
                    "保存供应商配置失败: {}, 错误: {}",
                    self.path.display(),
                    err
                );
                *write_lock(&self.last_error) = Some(err);
            }
        }
    }
}

fn read_document(path: &Path) -> Result<Map<String, Value>, AppError> {
    if !path.exists() {
        return Ok(Map::new());
    }
    let content = fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
    if content.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str::<Value>(&content).map_err(|e| AppError::json(path, e))? {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::Config(format!(
            "供应商配置必须是 JSON 对象: {}",
            path.display()
        ))),
    }
}

/// Write through a sibling temp file and rename, so readers never see a partial file.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| AppError::IoContext {
        context: format!("创建临时文件失败: {}", parent.display()),
        source: e,
    })?;
    tmp.write_all(bytes).map_err(|e| AppError::io(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| AppError::io(path, e.error))?;
    Ok(())
}
