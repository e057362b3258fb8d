use crate::exif_reader::read_capture_date;
use crate::matcher::find_twin_files;
use crate::report::{Action, Reporter};
use crate::scanner::collect_image_files;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct OrganizeOptions {
    pub directory: PathBuf,
    pub move_twin_files: bool,
    pub dry_run: bool,
}

impl Default for OrganizeOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::new(),
            move_twin_files: true,
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OrganizeStats {
    pub scanned_entries: usize,
    pub image_files: usize,
    pub skipped_non_image: usize,
    pub skipped_no_date: usize,
    pub skipped_relocated: usize,
    pub created_dirs: usize,
    pub moved_files: usize,
    pub moved_twins: usize,
}

#[derive(Debug, Error)]
pub enum OrganizeError {
    #[error("指定されたパスはフォルダではありません: {0}")]
    NotADirectory(PathBuf),
}

/// 撮影日ごとの `YYYY-MM-DD` フォルダへ写真を移動する。途中で失敗した場合、
/// それまでの移動はそのまま残る(ロールバックしない)。
pub fn organize(options: &OrganizeOptions, reporter: &mut dyn Reporter) -> Result<OrganizeStats> {
    if !options.directory.is_dir() {
        return Err(OrganizeError::NotADirectory(options.directory.clone()).into());
    }

    let mut stats = OrganizeStats::default();
    let candidates = collect_image_files(&options.directory, &mut stats)?;

    let mut created = HashSet::<PathBuf>::new();
    let mut relocated = HashSet::<PathBuf>::new();

    for candidate in candidates {
        // 先行する候補の同名ファイルとして既に移動済み
        if relocated.contains(&candidate) {
            stats.skipped_relocated += 1;
            continue;
        }

        let Some(date) = read_capture_date(&candidate)? else {
            stats.skipped_no_date += 1;
            continue;
        };

        let destination = options.directory.join(date.format("%Y-%m-%d").to_string());
        if !created.contains(&destination) && !destination.exists() {
            let action = Action::CreateDir {
                path: destination.clone(),
            };
            if options.dry_run {
                reporter.planned(&action);
            } else {
                fs::create_dir(&destination).with_context(|| {
                    format!("フォルダを作成できませんでした: {}", destination.display())
                })?;
                reporter.completed(&action);
            }
            created.insert(destination.clone());
            stats.created_dirs += 1;
        }

        move_into(
            &candidate,
            &destination,
            false,
            options.dry_run,
            reporter,
            &mut relocated,
        )?;
        stats.moved_files += 1;

        if options.move_twin_files {
            for twin in find_twin_files(&options.directory, &candidate)? {
                if relocated.contains(&twin) {
                    continue;
                }
                move_into(
                    &twin,
                    &destination,
                    true,
                    options.dry_run,
                    reporter,
                    &mut relocated,
                )?;
                stats.moved_twins += 1;
            }
        }
    }

    Ok(stats)
}

fn move_into(
    source: &Path,
    destination: &Path,
    twin: bool,
    dry_run: bool,
    reporter: &mut dyn Reporter,
    relocated: &mut HashSet<PathBuf>,
) -> Result<()> {
    let file_name = source
        .file_name()
        .with_context(|| format!("ファイル名を取得できませんでした: {}", source.display()))?;
    let target = destination.join(file_name);
    let action = Action::MoveFile {
        from: source.to_path_buf(),
        to: target.clone(),
        twin,
    };

    if dry_run {
        reporter.planned(&action);
    } else {
        fs::rename(source, &target).with_context(|| {
            format!(
                "移動に失敗しました: {} -> {}",
                source.display(),
                target.display()
            )
        })?;
        reporter.completed(&action);
    }

    relocated.insert(source.to_path_buf());
    Ok(())
}
