pub mod error;

pub use error::*;

use relflow_core::{DEFAULT_SNAPSHOT_FILE, ValuesLayout};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 設定ファイルのパスを直接指定する環境変数
pub const CONFIG_PATH_VAR: &str = "RELFLOW_CONFIG_PATH";

const CANDIDATES: [&str; 4] = [
    "relflow.local.yaml",
    ".relflow.local.yaml",
    "relflow.yaml",
    ".relflow.yaml",
];

/// 単一環境モードでのデフォルト環境
pub const DEFAULT_SNAPSHOT_ENVIRONMENT: &str = "dev";

/// `relflow.yaml` の内容
///
/// すべて省略可能。相対パスは設定ファイルのあるディレクトリを基準に解決する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Settings {
    pub values_root: Option<PathBuf>,
    pub environments: Option<Vec<String>>,
    pub app_prefix: Option<String>,
    pub base_port: Option<u16>,
    pub snapshot_path: Option<PathBuf>,
    pub snapshot_environment: Option<String>,
}

impl Settings {
    /// 設定ファイルを読み込んで検証する
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut settings: Settings = if content.trim().is_empty() {
            Settings::default()
        } else {
            serde_yaml::from_str(&content).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        };
        settings.validate(path)?;

        if let Some(base_dir) = path.parent() {
            settings.values_root = settings.values_root.map(|p| resolve(base_dir, p));
            settings.snapshot_path = settings.snapshot_path.map(|p| resolve(base_dir, p));
        }

        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// 設定ファイルを探して読み込む（見つからなければデフォルト）
    pub fn discover() -> Result<(Self, Option<PathBuf>)> {
        match find_settings_file()? {
            Some(path) => Ok((Self::load(&path)?, Some(path))),
            None => {
                tracing::debug!("No settings file found, using defaults");
                Ok((Self::default(), None))
            }
        }
    }

    fn validate(&self, path: &Path) -> Result<()> {
        let invalid = |message: String| SettingsError::Invalid {
            path: path.to_path_buf(),
            message,
        };

        if let Some(environments) = &self.environments {
            if environments.is_empty() {
                return Err(invalid("environments が空です".to_string()));
            }
            for env in environments {
                check_environment_name(env).map_err(invalid)?;
            }
        }
        if let Some(env) = &self.snapshot_environment {
            check_environment_name(env).map_err(invalid)?;
        }
        if self
            .app_prefix
            .as_deref()
            .is_some_and(|prefix| prefix.trim().is_empty())
        {
            return Err(invalid("appPrefix が空です".to_string()));
        }
        Ok(())
    }

    /// 複数環境モード用のレイアウト
    pub fn layout(&self) -> ValuesLayout {
        let layout = self.base_layout();
        match &self.environments {
            Some(environments) => layout.with_environments(environments.iter().cloned()),
            None => layout,
        }
    }

    /// 単一環境（スナップショット）モード用のレイアウト
    pub fn snapshot_layout(&self) -> ValuesLayout {
        let env = self
            .snapshot_environment
            .clone()
            .unwrap_or_else(|| DEFAULT_SNAPSHOT_ENVIRONMENT.to_string());
        self.base_layout().with_environments([env])
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.snapshot_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_FILE))
    }

    fn base_layout(&self) -> ValuesLayout {
        let mut layout = match &self.values_root {
            Some(root) => ValuesLayout::new(root),
            None => ValuesLayout::default(),
        };
        if let Some(prefix) = &self.app_prefix {
            layout = layout.with_app_prefix(prefix);
        }
        if let Some(base_port) = self.base_port {
            layout = layout.with_base_port(base_port);
        }
        layout
    }
}

/// 環境名が values ルート直下のディレクトリ名として使えるか確認する
pub fn check_environment_name(env: &str) -> std::result::Result<(), String> {
    if env.trim().is_empty() {
        return Err("空の環境名は指定できません".to_string());
    }
    if env.contains(['/', '\\']) || env == "." || env == ".." {
        return Err(format!("環境名 '{}' にパス区切りは使えません", env));
    }
    Ok(())
}

fn resolve(base_dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}

/// relflow のグローバル設定ディレクトリ（存在確認はしない）
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("relflow"))
}

/// 設定ファイルを探す
///
/// 以下の優先順位で検索:
/// 1. 環境変数 RELFLOW_CONFIG_PATH (直接パス指定)
/// 2. カレントディレクトリ: relflow.local.yaml, .relflow.local.yaml, relflow.yaml, .relflow.yaml
/// 3. ./.relflow/ ディレクトリ内: 同様の順序
/// 4. ~/.config/relflow/relflow.yaml (グローバル設定)
pub fn find_settings_file() -> Result<Option<PathBuf>> {
    // 1. 環境変数で直接指定
    if let Ok(config_path) = std::env::var(CONFIG_PATH_VAR) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(Some(path));
        }
        tracing::warn!("{} does not exist: {}", CONFIG_PATH_VAR, path.display());
    }

    // 2, 3. カレントディレクトリと ./.relflow/
    let current_dir = std::env::current_dir()?;
    if let Some(path) = find_settings_file_in(&current_dir) {
        return Ok(Some(path));
    }

    // 4. グローバル設定
    if let Some(config_dir) = get_config_dir() {
        let global_config = config_dir.join("relflow.yaml");
        if global_config.exists() {
            return Ok(Some(global_config));
        }
    }

    Ok(None)
}

/// 指定ディレクトリとその `.relflow/` から設定ファイルを探す
pub fn find_settings_file_in(dir: &Path) -> Option<PathBuf> {
    let relflow_dir = dir.join(".relflow");
    [dir.to_path_buf(), relflow_dir]
        .iter()
        .filter(|d| d.is_dir())
        .flat_map(|d| CANDIDATES.iter().map(move |name| d.join(name)))
        .find(|path| path.exists())
}
