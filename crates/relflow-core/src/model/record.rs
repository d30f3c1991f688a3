//! values レコード定義
//!
//! `<values-root>/<env>/<app>.yaml` 1ファイル分に対応する。

use super::release::ReleaseId;
use crate::error::{ReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// アプリ・環境ごとの values レコード
///
/// 既存ファイルの更新では `release_id` のみを書き換える。
/// モデル化していないキーは `extra` に保持され、書き戻し時にそのまま出力される。
/// コメントや元のフォーマットは保持されない。
/// 欠けているフィールドはゼロ値で補う。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuesRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub service: ServiceDescriptor,
    #[serde(rename = "releaseId", default)]
    pub release_id: ReleaseId,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// サービス定義（ネットワークポート）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    #[serde(default)]
    pub port: u32,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl ServiceDescriptor {
    pub fn new(port: u32) -> Self {
        Self {
            port,
            extra: BTreeMap::new(),
        }
    }
}

impl ValuesRecord {
    /// デフォルト値で新規レコードを作成
    pub fn new(name: impl Into<String>, port: u32, release_id: ReleaseId) -> Self {
        Self {
            name: name.into(),
            service: ServiceDescriptor::new(port),
            release_id,
            extra: BTreeMap::new(),
        }
    }

    /// 空のドキュメントは全フィールドがゼロ値のレコードとして扱う
    pub fn from_yaml(content: &str) -> serde_yaml::Result<Self> {
        if content.trim().is_empty() {
            return serde_yaml::from_str("{}");
        }
        serde_yaml::from_str(content)
    }

    pub fn to_yaml(&self) -> serde_yaml::Result<String> {
        serde_yaml::to_string(self)
    }

    /// ファイルから読み込む
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ReleaseError::io(path, e))?;
        Self::from_yaml(&content).map_err(|source| ReleaseError::Deserialize {
            path: path.to_path_buf(),
            source,
        })
    }

    /// ファイルへ全体を書き出す（既存ファイルは上書き）
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_yaml().map_err(|source| ReleaseError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, content).map_err(|e| ReleaseError::io(path, e))
    }
}
