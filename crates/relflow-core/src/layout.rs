//! values ディレクトリのレイアウト
//!
//! `<values-root>/<environment>/<prefix>-<index>.yaml`

use crate::error::ConfigError;
use std::path::{Path, PathBuf};

pub const DEFAULT_VALUES_ROOT: &str = "../helm-values";
pub const DEFAULT_ENVIRONMENTS: [&str; 3] = ["dev", "staging", "qa"];
pub const DEFAULT_APP_PREFIX: &str = "gb";
pub const DEFAULT_BASE_PORT: u16 = 30000;
pub const VALUES_EXTENSION: &str = "yaml";

/// 環境リスト・アプリ名テンプレート・ポート基準値を含むレイアウト定義
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuesLayout {
    root: PathBuf,
    environments: Vec<String>,
    app_prefix: String,
    base_port: u16,
}

impl Default for ValuesLayout {
    fn default() -> Self {
        Self::new(DEFAULT_VALUES_ROOT)
    }
}

impl ValuesLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            environments: DEFAULT_ENVIRONMENTS.iter().map(|s| s.to_string()).collect(),
            app_prefix: DEFAULT_APP_PREFIX.to_string(),
            base_port: DEFAULT_BASE_PORT,
        }
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// 処理対象の環境（順序を保持）
    pub fn with_environments<I, S>(mut self, environments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.environments = environments.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_app_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.app_prefix = prefix.into();
        self
    }

    pub fn with_base_port(mut self, base_port: u16) -> Self {
        self.base_port = base_port;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn environments(&self) -> &[String] {
        &self.environments
    }

    pub fn app_prefix(&self) -> &str {
        &self.app_prefix
    }

    pub fn base_port(&self) -> u16 {
        self.base_port
    }

    pub fn is_known_environment(&self, environment: &str) -> bool {
        self.environments.iter().any(|e| e == environment)
    }

    pub fn env_dir(&self, environment: &str) -> PathBuf {
        self.root.join(environment)
    }

    /// アプリ名（例: `gb-3`）
    pub fn app_name(&self, index: u32) -> String {
        format!("{}-{}", self.app_prefix, index)
    }

    pub fn record_path(&self, environment: &str, index: u32) -> PathBuf {
        self.env_dir(environment)
            .join(format!("{}.{}", self.app_name(index), VALUES_EXTENSION))
    }

    /// 新規レコードのデフォルトポート（base + index、65535 以下）
    pub fn default_port(&self, index: u32) -> Result<u32, ConfigError> {
        u16::try_from(index)
            .ok()
            .and_then(|i| self.base_port.checked_add(i))
            .map(u32::from)
            .ok_or(ConfigError::PortOverflow {
                base: self.base_port,
                index,
            })
    }

    /// ファイル名（拡張子なし）からアプリ番号を取り出す
    pub fn parse_app_index(&self, stem: &str) -> Option<u32> {
        stem.strip_prefix(self.app_prefix.as_str())?
            .strip_prefix('-')?
            .parse()
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = ValuesLayout::default();
        assert_eq!(layout.root(), Path::new("../helm-values"));
        assert_eq!(layout.environments(), ["dev", "staging", "qa"]);
        assert_eq!(layout.app_name(1), "gb-1");
    }

    #[test]
    fn test_record_path() {
        let layout = ValuesLayout::new("/values");
        assert_eq!(
            layout.record_path("staging", 2),
            PathBuf::from("/values/staging/gb-2.yaml")
        );
    }

    #[test]
    fn test_default_port() {
        let layout = ValuesLayout::new("/values");
        assert_eq!(layout.default_port(1).unwrap(), 30001);
        assert_eq!(layout.default_port(35535).unwrap(), 65535);
        assert!(matches!(
            layout.default_port(35536),
            Err(ConfigError::PortOverflow { .. })
        ));
    }

    #[test]
    fn test_custom_template() {
        let layout = ValuesLayout::new("/v")
            .with_environments(["prod"])
            .with_app_prefix("svc")
            .with_base_port(8000);
        assert_eq!(layout.environments(), ["prod"]);
        assert_eq!(layout.record_path("prod", 4), PathBuf::from("/v/prod/svc-4.yaml"));
        assert_eq!(layout.default_port(4).unwrap(), 8004);
        assert!(layout.is_known_environment("prod"));
        assert!(!layout.is_known_environment("dev"));
    }

    #[test]
    fn test_parse_app_index() {
        let layout = ValuesLayout::default();
        assert_eq!(layout.parse_app_index("gb-12"), Some(12));
        assert_eq!(layout.parse_app_index("gb-x"), None);
        assert_eq!(layout.parse_app_index("other-1"), None);
        assert_eq!(layout.parse_app_index("gb1"), None);
    }
}
