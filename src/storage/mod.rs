//! セーブデータの永続化インターフェース
//!
//! ゲーム本体はセーブ先を知らず、[`SaveStore`] トレイト越しに保存/読み込みを行う。
//! 実装は 2 種類:
//! - [`JsonFileStore`]: `<dir>/<id>.json` に 1 スロット 1 ファイルで保存
//! - [`crate::sqlite::Db`]: SQLite の `saves` テーブルに JSON テキストとして保存
//!
//! どちらも同じ [`SaveRecord`] (フラットな JSON オブジェクト) を読み書きする。

pub mod json_file;

pub use json_file::JsonFileStore;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adventure::{Inventory, Progress};

/// セーブファイル 1 件分のレコード。フィールド名は既存のセーブ形式に合わせている。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecord {
    pub item_inventory: Inventory,
    pub player_health: u32,
    pub player_gold: u32,
    #[serde(rename = "equippiedItems")]
    pub equipped_items: Vec<String>,
    pub sword_durability: u32,
    /// 古いセーブには存在しない
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_attack_power: Option<u32>,
}

impl From<Progress> for SaveRecord {
    fn from(p: Progress) -> Self {
        Self {
            item_inventory: p.inventory,
            player_health: p.health,
            player_gold: p.gold,
            equipped_items: p.equipped_items,
            sword_durability: p.weapon_durability,
            player_attack_power: p.attack_power,
        }
    }
}

impl From<SaveRecord> for Progress {
    fn from(r: SaveRecord) -> Self {
        Self {
            inventory: r.item_inventory,
            health: r.player_health,
            gold: r.player_gold,
            equipped_items: r.equipped_items,
            weapon_durability: r.sword_durability,
            attack_power: r.player_attack_power,
        }
    }
}

/// 永続化層のエラー
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("invalid save name '{0}': use letters, digits, '-' or '_'")]
    InvalidIdentifier(String),
}

/// セーブデータの保存先
pub trait SaveStore {
    /// `id` のスロットに保存 (既にあれば上書き)
    fn save(&mut self, id: &str, record: &SaveRecord) -> Result<(), StoreError>;

    /// `id` のスロットを読み込む。存在しなければ `Ok(None)`
    fn load(&self, id: &str) -> Result<Option<SaveRecord>, StoreError>;

    /// 保存済みスロット名の一覧 (昇順)
    fn list(&self) -> Result<Vec<String>, StoreError>;
}

/// スロット名の検証。ファイル名としてそのまま使うため、パス区切り等は拒否する。
pub fn validate_identifier(id: &str) -> Result<(), StoreError> {
    let ok = !id.is_empty()
        && id.len() <= 64
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok { Ok(()) } else { Err(StoreError::InvalidIdentifier(id.to_string())) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_reject_paths() {
        assert!(validate_identifier("slot_1").is_ok());
        assert!(validate_identifier("my-save").is_ok());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("../etc/passwd").is_err());
        assert!(validate_identifier("a b").is_err());
    }

    #[test]
    fn record_uses_legacy_field_names() -> color_eyre::Result<()> {
        let record = SaveRecord {
            item_inventory: Inventory::starter(),
            player_health: 98,
            player_gold: 10,
            equipped_items: vec!["swashbuckler sword".into()],
            sword_durability: 24,
            player_attack_power: None,
        };
        let json = serde_json::to_value(&record)?;
        for key in ["itemInventory", "playerHealth", "playerGold", "equippiedItems", "swordDurability"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert!(json.get("playerAttackPower").is_none());
        Ok(())
    }

    #[test]
    fn legacy_record_without_attack_power_parses() -> color_eyre::Result<()> {
        let text = r#"{
            "itemInventory": [
                {"name": "swashbuckler sword", "type": "weapon", "currentDurability": 3, "attackBoost": 10},
                {"name": "milkshake", "type": "healthBoost", "healthRestore": 10, "quantity": 0}
            ],
            "playerHealth": 55,
            "playerGold": 0,
            "equippiedItems": ["milkshake"],
            "swordDurability": 3
        }"#;
        let record: SaveRecord = serde_json::from_str(text)?;
        assert_eq!(record.player_attack_power, None);
        assert_eq!(record.item_inventory.weapon_durability(), Some(3));
        let progress = Progress::from(record.clone());
        assert_eq!(SaveRecord::from(progress), record);
        Ok(())
    }
}
