use clap::Parser;
use interview_dashboard::{browse, cli, config, error, export, render, session};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use interview_common::{Change, Command};
use session::Session;
use std::path::{Path, PathBuf};

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    let dataset = cli.dataset;
    let state = cli.state;
    match cli.command {
        Commands::Config { set_dataset, set_page_size, show } => run_config(
            config,
            set_dataset,
            set_page_size,
            show,
            dataset.as_deref(),
            state.as_deref(),
        ),
        command => run_command(command, &config, dataset.as_deref(), state.as_deref()),
    }
}

fn run_config(
    mut config: Config,
    set_dataset: Option<PathBuf>,
    set_page_size: Option<i64>,
    show: bool,
    dataset: Option<&Path>,
    state: Option<&Path>,
) -> Result<()> {
    let mut changed = false;

    if let Some(path) = set_dataset {
        config.dataset = Some(path);
        changed = true;
        println!("✔ データセットを設定しました");
    }

    if let Some(size) = set_page_size {
        config.set_page_size(size)?;
        changed = true;
        println!("✔ 既定のページサイズを設定しました: {}", config.page_size);
    }

    if changed {
        config.save()?;
    }

    if set_page_size.is_some() {
        let state_path = config.resolve_state_path(state)?;
        let records = session::load_dataset(config.resolve_dataset(dataset))?;
        let mut session = Session::open(records, &state_path, config.page_size);
        session.reset_page_size(config.page_size)?;
    }

    if show {
        let state_path = config.resolve_state_path(state)?;
        println!("設定:");
        println!(
            "  データセット: {}",
            config
                .dataset
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "同梱データ".into())
        );
        println!("  ページサイズ: {}", config.page_size);
        println!("  状態ファイル: {}", state_path.display());

        let records = session::load_dataset(config.resolve_dataset(dataset))?;
        let session = Session::open(records, &state_path, config.page_size);
        let keys = session.stored_keys();
        println!(
            "  保存済みキー: {}",
            if keys.is_empty() { "-".to_string() } else { keys.join(", ") }
        );
    }
    Ok(())
}

fn run_command(
    command: Commands,
    config: &Config,
    dataset: Option<&Path>,
    state: Option<&Path>,
) -> Result<()> {
    let records = session::load_dataset(config.resolve_dataset(dataset))?;
    let state_path = config.resolve_state_path(state)?;
    tracing::debug!("state file: {}", state_path.display());
    let mut session = Session::open(records, &state_path, config.page_size);

    match command {
        Commands::List { search, page_size, page } => {
            let (commands, ignored) = session::list_commands(search, page_size.as_deref(), page);
            if ignored {
                println!(
                    "⚠ ページサイズは整数で指定してください（無視しました）: {}",
                    page_size.unwrap_or_default()
                );
            }
            session.apply(commands)?;

            let snapshot = session.dashboard().snapshot();
            println!("{}\n", render::render_table(&snapshot));
            println!("{}", render::render_page_links(&snapshot.page_links));
            println!("{}", render::render_summary(&snapshot));
        }

        Commands::Toggle { names } => {
            for name in names {
                let change = session.apply_one(Command::Toggle(name.clone()))?;
                if change == Change::Unchanged {
                    println!("⚠ 現在のページに見つかりません: {}", name);
                } else if session.dashboard().is_selected(&name) {
                    println!("✔ 選択しました: {}", name);
                } else {
                    println!("✔ 選択を解除しました: {}", name);
                }
            }
            println!(
                "\n{}",
                render::render_chart(session.dashboard().chart().entries(), render::DEFAULT_CHART_WIDTH)
            );
        }

        Commands::Chart { width, json } => {
            let chart = session.dashboard().chart();
            if json {
                println!("{}", serde_json::to_string_pretty(&chart.to_trace())?);
            } else {
                println!("{}", render::render_chart(chart.entries(), width));
            }
        }

        Commands::Clear { all } => {
            if all {
                if session.reset()? {
                    println!("✔ 状態ファイルを削除しました: {}", state_path.display());
                } else {
                    println!("状態ファイルは存在しません");
                }
            } else if session.apply_one(Command::ClearSelection)? == Change::Unchanged {
                println!("選択はありません");
            } else {
                println!("✔ 選択を解除しました");
            }
        }

        Commands::Browse => {
            println!("📊 interview-dashboard - 対話モード\n");
            browse::run_browse(&mut session)?;
        }

        Commands::Export { output, title } => {
            println!("📄 interview-dashboard - Excel出力\n");

            let dashboard = session.dashboard();
            if dashboard.selection().is_empty() {
                println!("⚠ 選択された候補者がいません（表のみ出力します）");
            }

            let title = title.unwrap_or_else(export::default_title);
            let output = output.unwrap_or_else(|| PathBuf::from("."));
            let path = export::export_selection(
                dashboard.chart(),
                dashboard.selection(),
                &output,
                &title,
            )?;
            println!("✔ Excel出力完了: {}", path.display());
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}
