mod commands;
mod utils;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::ReleaseArgs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "relflow")]
#[command(about = "Helm values のリリースIDを、全アプリ・全環境まとめて進める", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 全環境のリリースIDを1つ進める
    Bump {
        #[command(flatten)]
        release: ReleaseArgs,
    },
    /// 単一環境のリリースIDを進め、次回用のスナップショットを保存
    /// RELEASE_ID 未指定時はスナップショットの値を使う
    Snapshot {
        #[command(flatten)]
        release: ReleaseArgs,
        /// スナップショットファイルのパス（デフォルト: release.txt）
        #[arg(long, env = "RELFLOW_SNAPSHOT_PATH")]
        snapshot_path: Option<PathBuf>,
    },
    /// 各環境のレコードとリリースIDを表示
    Status {
        /// values ディレクトリのルート
        #[arg(long, env = "RELFLOW_VALUES_ROOT")]
        values_root: Option<PathBuf>,
        /// 表示する環境（カンマ区切り、省略時は全環境）
        #[arg(short, long = "env", value_delimiter = ',')]
        environments: Vec<String>,
        /// JSON形式で出力
        #[arg(long)]
        json: bool,
    },
    /// バージョン情報を表示
    Version,
}

fn main() {
    let cli = Cli::parse();

    // ログはstderrへ（stdoutはサマリーとJSON出力用）
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    if let Err(e) = run(cli) {
        eprintln!();
        eprintln!("{}", "✗ エラー".red().bold());
        eprintln!("  {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        // Versionコマンドは設定ファイル不要
        Commands::Version => {
            println!("relflow {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Bump { release } => {
            let (settings, settings_path) = relflow_config::Settings::discover()?;
            utils::print_settings_source(settings_path.as_deref());
            commands::bump::handle(&settings, &release)
        }
        Commands::Snapshot {
            release,
            snapshot_path,
        } => {
            let (settings, settings_path) = relflow_config::Settings::discover()?;
            utils::print_settings_source(settings_path.as_deref());
            commands::snapshot::handle(&settings, &release, snapshot_path)
        }
        Commands::Status {
            values_root,
            environments,
            json,
        } => {
            let (settings, _) = relflow_config::Settings::discover()?;
            commands::status::handle(&settings, values_root, environments, json)
        }
    }
}
