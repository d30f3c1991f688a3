//! モデル定義
//!
//! リリースIDと、環境ごと・アプリごとの values レコードを定義します。

mod record;
mod release;

// Re-exports
pub use record::*;
pub use release::*;
