//! SQLite によるセーブ保存
//!
//! `rusqlite` を使い、セーブスロットを `saves` テーブルに保存します。
//! レコード本体は [`SaveRecord`] を JSON テキストにしたもので、JSON ファイル版と同じ形式です。
//!
//! # 特色
//! - Windows でもビルドしやすいように `bundled` フィーチャを利用
//! - UPSERT (`INSERT .. ON CONFLICT`) により同名スロットは上書き
//! - `modified_at_epoch_ms` で更新時刻を保持
//!
//! # 代表的な使い方
//! ```no_run
//! use text_adventure::sqlite::Db;
//! use text_adventure::storage::SaveStore;
//!
//! # fn demo() -> color_eyre::Result<()> {
//! let db = Db::open_or_create("saves/adventure.sqlite")?; // ファイルが無ければ作成
//! for slot in db.list()? {
//!     println!("{}", slot);
//! }
//! # Ok(()) }
//! ```

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::storage::{validate_identifier, SaveRecord, SaveStore, StoreError};

/// DB ハンドル。内部で `rusqlite::Connection` を保持します。
pub struct Db {
	conn: Connection,
	path: PathBuf,
}

impl Db {
	/// DB を開き、存在しなければ新規作成 (親ディレクトリも作成)。
	pub fn open_or_create<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
		let p = path.as_ref().to_path_buf();
		if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
			std::fs::create_dir_all(parent)?;
		}
		let conn = Connection::open(&p)?;
		let db = Self { conn, path: p };
		db.ensure_schema()?;
		Ok(db)
	}

	/// メモリ上 (永続化なし) の DB を作成 (主にテスト用途)
	pub fn in_memory() -> Result<Self, StoreError> {
		let conn = Connection::open_in_memory()?;
		let db = Self { conn, path: PathBuf::from(":memory:") };
		db.ensure_schema()?;
		Ok(db)
	}

	/// スキーマを作成 (存在しない場合のみ)
	fn ensure_schema(&self) -> Result<(), StoreError> {
		self.conn.execute_batch(
			r#"
			CREATE TABLE IF NOT EXISTS saves (
				slot TEXT PRIMARY KEY,
				record TEXT NOT NULL,
				modified_at_epoch_ms INTEGER NOT NULL
			);
			"#,
		)?;
		Ok(())
	}

	/// 現在時刻 (ms since epoch)。時計が狂っている場合は 0。
	fn now_ms() -> i64 {
		SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map(|d| d.as_millis() as i64)
			.unwrap_or(0)
	}

	/// スロットを削除 (存在しなくても OK) 戻り値: 削除したか
	pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
		let affected = self.conn.execute("DELETE FROM saves WHERE slot = ?1", params![id])?;
		Ok(affected > 0)
	}

	/// DB ファイルのパス
	pub fn db_file_path(&self) -> &Path { &self.path }
}

impl SaveStore for Db {
	fn save(&mut self, id: &str, record: &SaveRecord) -> Result<(), StoreError> {
		validate_identifier(id)?;
		let text = serde_json::to_string(record)?;
		self.conn.execute(
			r#"INSERT INTO saves(slot, record, modified_at_epoch_ms)
			   VALUES (?1, ?2, ?3)
			   ON CONFLICT(slot) DO UPDATE SET
				   record = excluded.record,
				   modified_at_epoch_ms = excluded.modified_at_epoch_ms"#,
			params![id, text, Self::now_ms()],
		)?;
		info!(target: "storage", "saved slot={} to {:?}", id, self.path);
		Ok(())
	}

	fn load(&self, id: &str) -> Result<Option<SaveRecord>, StoreError> {
		validate_identifier(id)?;
		let mut stmt = self.conn.prepare("SELECT record FROM saves WHERE slot = ?1")?;
		let maybe: Option<String> = stmt.query_row(params![id], |row| row.get(0)).optional()?;
		debug!(target: "storage", "load slot={} found={}", id, maybe.is_some());
		match maybe {
			Some(text) => Ok(Some(serde_json::from_str(&text)?)),
			None => Ok(None),
		}
	}

	fn list(&self) -> Result<Vec<String>, StoreError> {
		let mut stmt = self.conn.prepare("SELECT slot FROM saves ORDER BY slot ASC")?;
		let iter = stmt.query_map([], |row| row.get::<_, String>(0))?;
		let mut out = Vec::new();
		for r in iter { out.push(r?); }
		Ok(out)
	}
}
