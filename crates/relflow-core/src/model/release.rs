//! リリースID

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// 単調増加するリリースID
///
/// 1回の実行でちょうど 1 だけ進む。
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ReleaseId(u64);

impl ReleaseId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// 次のリリースID
    pub fn next(self) -> Result<Self, ConfigError> {
        self.0
            .checked_add(1)
            .map(Self)
            .ok_or(ConfigError::ReleaseIdOverflow(self.0))
    }
}

impl From<u64> for ReleaseId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for ReleaseId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

impl fmt::Display for ReleaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
