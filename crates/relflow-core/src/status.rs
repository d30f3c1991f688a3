//! 現在のレコード状態の走査

use crate::error::{ReleaseError, Result};
use crate::layout::{VALUES_EXTENSION, ValuesLayout};
use crate::model::{ReleaseId, ValuesRecord};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordStatus {
    /// ファイル名（拡張子なし）
    pub app: String,
    pub name: String,
    pub port: u32,
    pub release_id: ReleaseId,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentStatus {
    pub environment: String,
    pub records: Vec<RecordStatus>,
}

/// 各環境ディレクトリの `*.yaml` を読み込む
///
/// 環境ディレクトリが存在しない場合は空のリストを返す。
/// レコードはアプリ番号順（番号を持たないファイルは末尾に名前順）に並ぶ。
pub fn scan_status(layout: &ValuesLayout) -> Result<Vec<EnvironmentStatus>> {
    let mut statuses = Vec::with_capacity(layout.environments().len());

    for environment in layout.environments() {
        let env_dir = layout.env_dir(environment);
        let mut records = Vec::new();

        if env_dir.is_dir() {
            let entries = std::fs::read_dir(&env_dir).map_err(|e| ReleaseError::io(&env_dir, e))?;
            for entry in entries {
                let path = entry.map_err(|e| ReleaseError::io(&env_dir, e))?.path();
                if !path.is_file()
                    || path.extension().and_then(|ext| ext.to_str()) != Some(VALUES_EXTENSION)
                {
                    continue;
                }
                let app = path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .unwrap_or_default()
                    .to_string();
                let record = ValuesRecord::load(&path)?;
                records.push(RecordStatus {
                    app,
                    name: record.name,
                    port: record.service.port,
                    release_id: record.release_id,
                    path,
                });
            }
        } else {
            tracing::debug!("Environment directory not found: {}", env_dir.display());
        }

        records.sort_by(|a, b| {
            let key = |r: &RecordStatus| layout.parse_app_index(&r.app).unwrap_or(u32::MAX);
            key(a).cmp(&key(b)).then_with(|| a.app.cmp(&b.app))
        });

        statuses.push(EnvironmentStatus {
            environment: environment.clone(),
            records,
        });
    }

    Ok(statuses)
}

/// 全レコード中で最大のリリースID
pub fn latest_release(statuses: &[EnvironmentStatus]) -> Option<ReleaseId> {
    statuses
        .iter()
        .flat_map(|s| s.records.iter())
        .map(|r| r.release_id)
        .max()
}
