//! relflow core
//!
//! Helm values のリリースIDを一括で進めるためのコアロジック。
//!
//! # 概要
//!
//! - **inputs**: `RELEASE_ID` / `NUM_APPS` / `RELEASE_ENVS` の解釈
//! - **layout**: `<values-root>/<env>/<app>.yaml` のパス・命名規則
//! - **updater**: 次のリリースIDを全レコードに反映
//! - **snapshot**: 次回実行のシードとなるリリースIDの保存
//! - **status**: 現在のレコード状態の走査

pub mod error;
pub mod inputs;
pub mod layout;
pub mod model;
pub mod snapshot;
pub mod status;
pub mod updater;

pub use error::*;
pub use inputs::*;
pub use layout::*;
pub use model::*;
pub use snapshot::*;
pub use status::*;
pub use updater::*;
