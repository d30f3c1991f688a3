use colored::Colorize;
use relflow_core::{RecordOutcome, ReleaseReport, ValuesLayout};
use std::path::Path;

/// 読み込んだ設定ファイルを表示
pub fn print_settings_source(path: Option<&Path>) {
    match path {
        Some(path) => println!("📄 設定ファイル: {}", path.display().to_string().cyan()),
        None => println!("{}", "📄 設定ファイルなし（デフォルト設定）".dimmed()),
    }
}

pub fn print_layout(layout: &ValuesLayout) {
    println!(
        "values ルート: {}",
        layout.root().display().to_string().cyan()
    );
    println!("環境: {}", layout.environments().join(", ").cyan());
}

/// 実行結果のサマリーを表示
pub fn print_report(report: &ReleaseReport) {
    println!(
        "リリースID: {} → {}",
        report.previous.to_string().dimmed(),
        report.next.to_string().green().bold()
    );
    println!();

    for change in &report.changes {
        let label = match change.outcome {
            RecordOutcome::Created => "+ 作成".green(),
            RecordOutcome::Updated => "~ 更新".cyan(),
            RecordOutcome::Skipped => "- スキップ".dimmed(),
        };
        println!("  {} {} ({})", label, change.app, change.environment);
    }

    println!();
    println!(
        "{}",
        format!(
            "✓ 完了: 作成 {} / 更新 {} / スキップ {}",
            report.count(RecordOutcome::Created),
            report.count(RecordOutcome::Updated),
            report.count(RecordOutcome::Skipped)
        )
        .green()
        .bold()
    );
    if let Some(path) = &report.snapshot {
        println!(
            "スナップショット: {} ({})",
            path.display().to_string().cyan(),
            report.next
        );
    }
}
