use colored::Colorize;
use relflow_config::Settings;
use std::path::PathBuf;

pub fn handle(
    settings: &Settings,
    values_root: Option<PathBuf>,
    environments: Vec<String>,
    json: bool,
) -> anyhow::Result<()> {
    let mut layout = settings.layout();
    if let Some(root) = values_root {
        layout = layout.with_root(root);
    }
    if !environments.is_empty() {
        for env in &environments {
            relflow_config::check_environment_name(env).map_err(anyhow::Error::msg)?;
            if !layout.is_known_environment(env) {
                tracing::warn!("Unknown environment: {}", env);
            }
        }
        layout = layout.with_environments(environments);
    }

    let statuses = relflow_core::scan_status(&layout)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
        return Ok(());
    }

    let latest = relflow_core::latest_release(&statuses);
    println!(
        "values ルート: {}",
        layout.root().display().to_string().cyan()
    );
    match latest {
        Some(id) => println!("最新のリリースID: {}", id.to_string().green().bold()),
        None => println!("{}", "レコードがありません".dimmed()),
    }

    for status in &statuses {
        println!();
        println!("{} ({}件)", status.environment.bold(), status.records.len());
        if status.records.is_empty() {
            println!("  {}", "(なし)".dimmed());
            continue;
        }
        for record in &status.records {
            let release = if Some(record.release_id) == latest {
                record.release_id.to_string().green()
            } else {
                format!("{} (古い)", record.release_id).yellow()
            };
            println!(
                "  {:<12} port={:<6} releaseId={}",
                record.app.cyan(),
                record.port,
                release
            );
        }
    }

    Ok(())
}
