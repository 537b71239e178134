//! JSON ファイルによるセーブ保存
//!
//! 1 スロット = 1 ファイル (`<dir>/<id>.json`)。書き込みは一時ファイル経由で
//! rename するため、途中で失敗しても既存のセーブは壊れない。

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{validate_identifier, SaveRecord, SaveStore, StoreError};

const EXTENSION: &str = "json";

/// セーブディレクトリのハンドル
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// ディレクトリは最初の保存時に作成する
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    pub fn dir(&self) -> &Path { &self.dir }

    fn slot_path(&self, id: &str) -> Result<PathBuf, StoreError> {
        validate_identifier(id)?;
        Ok(self.dir.join(format!("{id}.{EXTENSION}")))
    }
}

impl SaveStore for JsonFileStore {
    fn save(&mut self, id: &str, record: &SaveRecord) -> Result<(), StoreError> {
        let path = self.slot_path(id)?;
        fs::create_dir_all(&self.dir)?;
        let text = serde_json::to_string_pretty(record)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &text)?;
        fs::rename(&tmp, &path)?;
        info!(target: "storage", "saved {} ({} bytes)", path.display(), text.len());
        Ok(())
    }

    fn load(&self, id: &str) -> Result<Option<SaveRecord>, StoreError> {
        let path = self.slot_path(id)?;
        if !path.exists() {
            debug!(target: "storage", "no save at {}", path.display());
            return Ok(None);
        }
        let text = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut out = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            // load できない名前のファイルは一覧に出さない
            let stem = path.file_stem().and_then(|s| s.to_str());
            if let Some(stem) = stem.filter(|s| validate_identifier(s).is_ok()) {
                out.push(stem.to_string());
            }
        }
        out.sort();
        Ok(out)
    }
}
