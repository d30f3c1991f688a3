//! リリース更新処理
//!
//! 次のリリースIDを計算し、環境 × アプリごとの values レコードを作成・更新する。
//! 最初のエラーで処理全体を中断し、書き込み済みのファイルは巻き戻さない。

use crate::error::{ReleaseError, Result};
use crate::inputs::ReleaseInputs;
use crate::layout::ValuesLayout;
use crate::model::{ReleaseId, ValuesRecord};
use crate::snapshot::SnapshotStore;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

/// 環境フィルタの適用範囲
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterScope {
    /// 既存ファイルの更新のみフィルタする（新規作成は常に行う）
    #[default]
    UpdatesOnly,
    /// 新規作成にもフィルタを適用する
    AllWrites,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    pub filter_scope: FilterScope,
    /// 指定時は処理完了後に次のリリースIDを書き出す
    pub snapshot: Option<SnapshotStore>,
}

/// レコードごとの処理結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOutcome {
    Created,
    Updated,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordChange {
    pub environment: String,
    pub app: String,
    pub path: PathBuf,
    pub outcome: RecordOutcome,
}

/// 1回の実行結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseReport {
    pub previous: ReleaseId,
    pub next: ReleaseId,
    pub changes: Vec<RecordChange>,
    pub snapshot: Option<PathBuf>,
}

impl ReleaseReport {
    pub fn count(&self, outcome: RecordOutcome) -> usize {
        self.changes.iter().filter(|c| c.outcome == outcome).count()
    }

    pub fn changes_for<'a>(
        &'a self,
        environment: &'a str,
    ) -> impl Iterator<Item = &'a RecordChange> + 'a {
        self.changes
            .iter()
            .filter(move |c| c.environment == environment)
    }
}

/// リリースIDを1つ進め、全環境・全アプリの values レコードに反映する
///
/// 処理順序:
/// 1. 次のリリースIDとポート範囲を検証（ファイル操作の前）
/// 2. 環境ごとにディレクトリを作成
/// 3. アプリごとに既存レコードを更新、または新規作成
/// 4. スナップショットを書き出し（指定時のみ）
#[instrument(skip_all, fields(current = %inputs.current, num_apps = inputs.num_apps))]
pub fn advance_releases(
    layout: &ValuesLayout,
    inputs: &ReleaseInputs,
    options: &UpdateOptions,
) -> Result<ReleaseReport> {
    info!("Found current release id ({})", inputs.current);
    let next = inputs.next_release()?;
    // 最大番号のポートが範囲内なら全アプリ分が範囲内
    layout.default_port(inputs.num_apps)?;
    info!("Generating release for id ({})", next);

    for name in inputs.filter.names() {
        if !layout.is_known_environment(name) {
            warn!("Unknown environment in filter: {}", name);
        }
    }

    let mut changes = Vec::new();
    for environment in layout.environments() {
        let env_dir = layout.env_dir(environment);
        std::fs::create_dir_all(&env_dir).map_err(|e| ReleaseError::io(&env_dir, e))?;
        debug!("Ensured environment directory: {}", env_dir.display());

        let allowed = inputs.filter.allows(environment);
        for index in 1..=inputs.num_apps {
            let app = layout.app_name(index);
            let path = layout.record_path(environment, index);

            // NotFound 以外の stat エラーは存在扱いにせず中断する
            let exists = path.try_exists().map_err(|e| ReleaseError::io(&path, e))?;
            let outcome = if exists {
                if !allowed {
                    info!("Skipping app ({}) and env ({}): filtered", app, environment);
                    RecordOutcome::Skipped
                } else {
                    let mut record = ValuesRecord::load(&path)?;
                    record.release_id = next;
                    info!(
                        "Writing next release id for app ({}) and env ({})",
                        app, environment
                    );
                    record.save(&path)?;
                    RecordOutcome::Updated
                }
            } else if !allowed && options.filter_scope == FilterScope::AllWrites {
                info!("Not creating app ({}) in env ({}): filtered", app, environment);
                RecordOutcome::Skipped
            } else {
                info!(
                    "Generating new values file for app ({}) and env ({})",
                    app, environment
                );
                let record = ValuesRecord::new(&app, layout.default_port(index)?, next);
                record.save(&path)?;
                RecordOutcome::Created
            };

            changes.push(RecordChange {
                environment: environment.clone(),
                app,
                path,
                outcome,
            });
        }
    }

    let snapshot = match &options.snapshot {
        Some(store) => {
            store.write(next)?;
            info!("Saved release id ({}) to {}", next, store.path().display());
            Some(store.path().to_path_buf())
        }
        None => None,
    };

    Ok(ReleaseReport {
        previous: inputs.current,
        next,
        changes,
        snapshot,
    })
}
