#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

use minimax_switch_lib::{JsonFileStore, ProviderSettings};

pub const GLOBAL: &str = "https://api.minimax.io/anthropic";
pub const MAINLAND: &str = "https://api.minimaxi.com/anthropic";

pub struct TestFs {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl TestFs {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("provider.json");
        Self { dir, path }
    }

    pub fn seed(&self, value: &Value) {
        fs::write(
            &self.path,
            serde_json::to_string_pretty(value).expect("serialize seed json"),
        )
        .expect("seed provider.json");
    }

    pub fn open(&self) -> JsonFileStore {
        JsonFileStore::open(&self.path).expect("open provider store")
    }

    pub fn read_json(&self) -> Value {
        read_json(&self.path)
    }
}

pub fn read_json(path: &Path) -> Value {
    let content = fs::read_to_string(path).expect("read provider.json");
    serde_json::from_str(&content).expect("parse provider.json")
}

pub fn settings(base_url: Option<&str>) -> ProviderSettings {
    ProviderSettings::new(base_url, None)
}
