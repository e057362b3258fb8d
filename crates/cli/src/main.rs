use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use fphoto_organizer_core::{organize, Action, OrganizeOptions, OrganizeStats, Reporter};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "fphoto-organizer-cli")]
#[command(about = "撮影日(EXIF)ごとの YYYY-MM-DD フォルダへ写真を移動して整理します")]
struct Cli {
    /// 整理対象のフォルダ(省略時はカレントディレクトリ)
    directory: Option<PathBuf>,

    /// 同じベース名のファイル(RAWなど)も一緒に移動する
    #[arg(
        long,
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    move_twin_files: bool,

    /// 実際には移動せず、予定される操作のみ表示する
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// 集計の出力形式
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn planned(&mut self, action: &Action) {
        println!("[dry-run] {}", describe(action));
    }

    fn completed(&mut self, action: &Action) {
        println!("{}", describe(action));
    }
}

fn describe(action: &Action) -> String {
    match action {
        Action::CreateDir { path } => format!("フォルダ作成: {}", path.display()),
        Action::MoveFile { from, to, twin } => {
            let label = if *twin { "同名ファイル移動" } else { "移動" };
            format!("{}: {} -> {}", label, from.display(), to.display())
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let directory = match cli.directory {
        Some(path) => path,
        None => std::env::current_dir().context("カレントディレクトリを取得できませんでした")?,
    };
    let directory = fs::canonicalize(&directory)
        .with_context(|| format!("フォルダを解決できませんでした: {}", directory.display()))?;
    if !directory.is_dir() {
        anyhow::bail!(
            "指定されたパスはフォルダではありません: {}",
            directory.display()
        );
    }

    let options = OrganizeOptions {
        directory,
        move_twin_files: cli.move_twin_files,
        dry_run: cli.dry_run,
    };

    let mut reporter = ConsoleReporter;
    let stats = organize(&options, &mut reporter)?;

    match cli.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Table => print_summary(&stats),
    }

    if cli.dry_run {
        eprintln!("dry-runモード: 実ファイルは変更していません。");
    }

    Ok(())
}

fn print_summary(stats: &OrganizeStats) {
    println!(
        "集計: scanned={} image={} moved={} twins={} dirs={} no_date_skip={} non_image_skip={}",
        stats.scanned_entries,
        stats.image_files,
        stats.moved_files,
        stats.moved_twins,
        stats.created_dirs,
        stats.skipped_no_date,
        stats.skipped_non_image
    );
}
