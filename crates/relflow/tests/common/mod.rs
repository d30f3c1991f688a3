#![allow(deprecated)] // TODO: cargo_bin → cargo_bin_cmd! へ移行
#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// `<root>/scripts` から実行し、`<root>/helm-values` に書き出すテスト用プロジェクト
pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("scripts")).unwrap();
        Self { root }
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    pub fn scripts_dir(&self) -> PathBuf {
        self.root.path().join("scripts")
    }

    pub fn values_dir(&self) -> PathBuf {
        self.root.path().join("helm-values")
    }

    pub fn record_path(&self, env: &str, app: &str) -> PathBuf {
        self.values_dir().join(env).join(format!("{}.yaml", app))
    }

    pub fn write_record(&self, env: &str, app: &str, content: &str) {
        let path = self.record_path(env, app);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    pub fn write_settings(&self, content: &str) {
        fs::write(self.scripts_dir().join("relflow.yaml"), content).unwrap();
    }

    /// YAML を読み込んで (port, releaseId) を返す
    pub fn read_record(&self, env: &str, app: &str) -> (u64, u64) {
        read_port_and_release(&self.record_path(env, app))
    }

    /// 環境変数を隔離した relflow コマンド
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("relflow").unwrap();
        cmd.current_dir(self.scripts_dir())
            .env_remove("RELEASE_ID")
            .env_remove("NUM_APPS")
            .env_remove("RELEASE_ENVS")
            .env_remove("RELFLOW_VALUES_ROOT")
            .env_remove("RELFLOW_SNAPSHOT_PATH")
            .env_remove("RELFLOW_CONFIG_PATH")
            .env("XDG_CONFIG_HOME", self.root.path().join("xdg"))
            .env("NO_COLOR", "1");
        cmd
    }
}

pub fn read_port_and_release(path: &Path) -> (u64, u64) {
    let content = fs::read_to_string(path).unwrap();
    let value: serde_yaml::Value = serde_yaml::from_str(&content).unwrap();
    let port = value["service"]["port"].as_u64().unwrap();
    let release = value["releaseId"].as_u64().unwrap();
    (port, release)
}
