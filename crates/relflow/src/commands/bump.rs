use super::ReleaseArgs;
use crate::utils;
use colored::Colorize;
use relflow_config::Settings;
use relflow_core::UpdateOptions;

pub fn handle(settings: &Settings, release: &ReleaseArgs) -> anyhow::Result<()> {
    // 入力の検証はファイル操作より前
    let inputs = release.inputs(None)?;
    let layout = release.apply_root(settings.layout());

    println!("{}", "リリースIDを更新中...".blue());
    utils::print_layout(&layout);

    let options = UpdateOptions {
        filter_scope: release.filter_scope(),
        snapshot: None,
    };
    let report = relflow_core::advance_releases(&layout, &inputs, &options)?;

    utils::print_report(&report);
    Ok(())
}
