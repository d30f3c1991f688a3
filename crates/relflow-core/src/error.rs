use std::path::{Path, PathBuf};
use thiserror::Error;

/// 入力値（環境変数・CLI引数）に関するエラー
///
/// いずれもファイル操作の前に検出される。
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} が設定されていません")]
    Missing { var: &'static str },

    #[error("{var} の値が不正です: '{value}'\n理由: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("リリースIDがこれ以上増やせません: {0}")]
    ReleaseIdOverflow(u64),

    #[error("ポート番号が範囲外です: base={base}, index={index}")]
    PortOverflow { base: u16, index: u32 },
}

#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("設定エラー: {0}")]
    Config(#[from] ConfigError),

    #[error("IO エラー: {path}\n理由: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML パースエラー: {path}\n理由: {source}")]
    Deserialize {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("YAML 書き出しエラー: {path}\n理由: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("スナップショットファイルが不正です: {path}\n理由: {message}")]
    Snapshot { path: PathBuf, message: String },
}

/// エラーの分類（テストや呼び出し側での判定用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Io,
    Deserialize,
    Serialize,
    Snapshot,
}

impl ReleaseError {
    pub(crate) fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Config,
            Self::Io { .. } => ErrorKind::Io,
            Self::Deserialize { .. } => ErrorKind::Deserialize,
            Self::Serialize { .. } => ErrorKind::Serialize,
            Self::Snapshot { .. } => ErrorKind::Snapshot,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReleaseError>;
