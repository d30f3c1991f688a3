use super::ReleaseArgs;
use crate::utils;
use anyhow::Context;
use colored::Colorize;
use relflow_config::Settings;
use relflow_core::{SnapshotStore, UpdateOptions};
use std::path::PathBuf;

pub fn handle(
    settings: &Settings,
    release: &ReleaseArgs,
    snapshot_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let store = SnapshotStore::new(snapshot_path.unwrap_or_else(|| settings.snapshot_path()));

    // RELEASE_ID が無い場合のみ前回のスナップショットをシードにする
    let seed = if release.has_release_id() {
        None
    } else {
        store.read().with_context(|| {
            format!("スナップショットを読み込めません: {}", store.path().display())
        })?
    };
    let inputs = release.inputs(seed)?;
    let layout = release.apply_root(settings.snapshot_layout());

    println!("{}", "リリースIDを更新中（スナップショット）...".blue());
    if seed.is_some() {
        println!("シード: {}", store.path().display().to_string().cyan());
    }
    utils::print_layout(&layout);

    let options = UpdateOptions {
        filter_scope: release.filter_scope(),
        snapshot: Some(store),
    };
    let report = relflow_core::advance_releases(&layout, &inputs, &options)?;

    utils::print_report(&report);
    Ok(())
}
