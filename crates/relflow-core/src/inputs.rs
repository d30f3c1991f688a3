//! 実行入力
//!
//! `RELEASE_ID` / `NUM_APPS` / `RELEASE_ENVS` を起動時に一度だけ解釈し、
//! 明示的な構造体として更新処理に渡す。

use crate::error::ConfigError;
use crate::model::ReleaseId;

pub const RELEASE_ID_VAR: &str = "RELEASE_ID";
pub const NUM_APPS_VAR: &str = "NUM_APPS";
pub const RELEASE_ENVS_VAR: &str = "RELEASE_ENVS";

/// 既存ファイルの更新対象とする環境の絞り込み
///
/// 空の場合は絞り込みなし（全環境が対象）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentFilter {
    names: Vec<String>,
}

impl EnvironmentFilter {
    /// 絞り込みなし
    pub fn all() -> Self {
        Self::default()
    }

    /// カンマ区切りの環境名リストをパース
    ///
    /// 各要素は前後の空白を除去し、空要素は無視する。
    pub fn parse(raw: &str) -> Self {
        let names = raw
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        Self { names }
    }

    pub fn is_active(&self) -> bool {
        !self.names.is_empty()
    }

    /// 指定した環境が対象かどうか
    pub fn allows(&self, environment: &str) -> bool {
        !self.is_active() || self.names.iter().any(|name| name == environment)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// 更新処理への入力
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInputs {
    pub current: ReleaseId,
    pub num_apps: u32,
    pub filter: EnvironmentFilter,
}

impl ReleaseInputs {
    pub fn new(current: ReleaseId, num_apps: u32, filter: EnvironmentFilter) -> Self {
        Self {
            current,
            num_apps,
            filter,
        }
    }

    /// 生の文字列入力から構築
    pub fn parse(
        release_id: Option<&str>,
        num_apps: Option<&str>,
        release_envs: Option<&str>,
    ) -> Result<Self, ConfigError> {
        Self::parse_with_seed(release_id, num_apps, release_envs, None)
    }

    /// `release_id` が空の場合に `seed`（スナップショットの値など）を使う
    pub fn parse_with_seed(
        release_id: Option<&str>,
        num_apps: Option<&str>,
        release_envs: Option<&str>,
        seed: Option<ReleaseId>,
    ) -> Result<Self, ConfigError> {
        let current = match non_blank(release_id) {
            Some(raw) => parse_release_id(raw)?,
            None => seed.ok_or(ConfigError::Missing {
                var: RELEASE_ID_VAR,
            })?,
        };
        let num_apps = parse_num_apps(num_apps)?;
        let filter = non_blank(release_envs)
            .map(EnvironmentFilter::parse)
            .unwrap_or_default();

        Ok(Self::new(current, num_apps, filter))
    }

    /// プロセスの環境変数から構築
    pub fn from_env() -> Result<Self, ConfigError> {
        let release_id = std::env::var(RELEASE_ID_VAR).ok();
        let num_apps = std::env::var(NUM_APPS_VAR).ok();
        let release_envs = std::env::var(RELEASE_ENVS_VAR).ok();
        Self::parse(
            release_id.as_deref(),
            num_apps.as_deref(),
            release_envs.as_deref(),
        )
    }

    pub fn next_release(&self) -> Result<ReleaseId, ConfigError> {
        self.current.next()
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_release_id(raw: &str) -> Result<ReleaseId, ConfigError> {
    raw.parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
        var: RELEASE_ID_VAR,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn parse_num_apps(raw: Option<&str>) -> Result<u32, ConfigError> {
    let raw = non_blank(raw).ok_or(ConfigError::Missing { var: NUM_APPS_VAR })?;
    let invalid = |reason: String| ConfigError::Invalid {
        var: NUM_APPS_VAR,
        value: raw.to_string(),
        reason,
    };
    match raw.parse::<u32>() {
        Ok(0) => Err(invalid("1以上を指定してください".to_string())),
        Ok(n) => Ok(n),
        Err(e) => Err(invalid(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_inputs() {
        let inputs = ReleaseInputs::parse(Some(" 5 "), Some("2"), None).unwrap();
        assert_eq!(inputs.current, ReleaseId::new(5));
        assert_eq!(inputs.num_apps, 2);
        assert!(!inputs.filter.is_active());
        assert_eq!(inputs.next_release().unwrap(), ReleaseId::new(6));
    }

    #[test]
    fn test_missing_release_id() {
        for raw in [None, Some(""), Some("   ")] {
            let err = ReleaseInputs::parse(raw, Some("2"), None).unwrap_err();
            assert_eq!(err, ConfigError::Missing { var: RELEASE_ID_VAR });
        }
    }

    #[test]
    fn test_missing_num_apps() {
        for raw in [None, Some(""), Some("\t")] {
            let err = ReleaseInputs::parse(Some("1"), raw, None).unwrap_err();
            assert_eq!(err, ConfigError::Missing { var: NUM_APPS_VAR });
        }
    }

    #[test]
    fn test_non_numeric_inputs() {
        let err = ReleaseInputs::parse(Some("abc"), Some("2"), None).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: RELEASE_ID_VAR, .. }));

        let err = ReleaseInputs::parse(Some("1"), Some("two"), None).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: NUM_APPS_VAR, .. }));

        let err = ReleaseInputs::parse(Some("1"), Some("-3"), None).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: NUM_APPS_VAR, .. }));
    }

    #[test]
    fn test_zero_apps_rejected() {
        let err = ReleaseInputs::parse(Some("1"), Some("0"), None).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: NUM_APPS_VAR, .. }));
    }

    #[test]
    fn test_seed_used_when_release_id_blank() {
        let inputs =
            ReleaseInputs::parse_with_seed(Some(" "), Some("1"), None, Some(ReleaseId::new(6)))
                .unwrap();
        assert_eq!(inputs.current, ReleaseId::new(6));

        // 明示的な値はシードより優先
        let inputs =
            ReleaseInputs::parse_with_seed(Some("9"), Some("1"), None, Some(ReleaseId::new(6)))
                .unwrap();
        assert_eq!(inputs.current, ReleaseId::new(9));
    }

    #[test]
    fn test_filter_parse() {
        let filter = EnvironmentFilter::parse(" staging , qa,,");
        assert_eq!(filter.names(), ["staging".to_string(), "qa".to_string()]);
        assert!(filter.allows("staging"));
        assert!(filter.allows("qa"));
        assert!(!filter.allows("dev"));

        let empty = EnvironmentFilter::parse(" , ");
        assert!(!empty.is_active());
        assert!(empty.allows("dev"));
    }

    #[test]
    fn test_blank_release_envs_means_no_filter() {
        let inputs = ReleaseInputs::parse(Some("1"), Some("1"), Some("  ")).unwrap();
        assert_eq!(inputs.filter, EnvironmentFilter::all());
    }

    #[test]
    fn test_from_env() {
        temp_env::with_vars(
            [
                (RELEASE_ID_VAR, Some("10")),
                (NUM_APPS_VAR, Some("3")),
                (RELEASE_ENVS_VAR, Some("staging")),
            ],
            || {
                let inputs = ReleaseInputs::from_env().unwrap();
                assert_eq!(inputs.current, ReleaseId::new(10));
                assert_eq!(inputs.num_apps, 3);
                assert_eq!(inputs.filter.names(), ["staging".to_string()]);
            },
        );
    }

    #[test]
    fn test_from_env_missing() {
        temp_env::with_vars(
            [
                (RELEASE_ID_VAR, None::<&str>),
                (NUM_APPS_VAR, Some("3")),
                (RELEASE_ENVS_VAR, None),
            ],
            || {
                let err = ReleaseInputs::from_env().unwrap_err();
                assert_eq!(err, ConfigError::Missing { var: RELEASE_ID_VAR });
            },
        );
    }
}
