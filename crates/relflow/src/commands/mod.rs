pub mod bump;
pub mod snapshot;
pub mod status;

use clap::Args;
use relflow_core::{ConfigError, FilterScope, ReleaseId, ReleaseInputs, ValuesLayout};
use std::path::PathBuf;

/// bump / snapshot 共通の入力
#[derive(Args, Debug)]
pub struct ReleaseArgs {
    /// 現在のリリースID
    #[arg(long, env = "RELEASE_ID")]
    pub release_id: Option<String>,
    /// アプリ数（gb-1 〜 gb-N）
    #[arg(long, env = "NUM_APPS")]
    pub num_apps: Option<String>,
    /// 既存ファイルを更新する環境（カンマ区切り、省略時は全環境）
    #[arg(long, env = "RELEASE_ENVS")]
    pub release_envs: Option<String>,
    /// values ディレクトリのルート（デフォルト: ../helm-values）
    #[arg(long, env = "RELFLOW_VALUES_ROOT")]
    pub values_root: Option<PathBuf>,
    /// 環境フィルタを新規ファイルの作成にも適用する
    #[arg(long)]
    pub filter_creates: bool,
}

impl ReleaseArgs {
    pub fn has_release_id(&self) -> bool {
        self.release_id
            .as_deref()
            .is_some_and(|raw| !raw.trim().is_empty())
    }

    pub fn inputs(&self, seed: Option<ReleaseId>) -> Result<ReleaseInputs, ConfigError> {
        ReleaseInputs::parse_with_seed(
            self.release_id.as_deref(),
            self.num_apps.as_deref(),
            self.release_envs.as_deref(),
            seed,
        )
    }

    pub fn filter_scope(&self) -> FilterScope {
        if self.filter_creates {
            FilterScope::AllWrites
        } else {
            FilterScope::UpdatesOnly
        }
    }

    /// CLI 引数で values ルートを上書き
    pub fn apply_root(&self, layout: ValuesLayout) -> ValuesLayout {
        match &self.values_root {
            Some(root) => layout.with_root(root),
            None => layout,
        }
    }
}
