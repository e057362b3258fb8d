use crate::organize::OrganizeStats;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

pub fn collect_image_files(directory: &Path, stats: &mut OrganizeStats) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();

    for entry in fs::read_dir(directory)
        .with_context(|| format!("フォルダを読めませんでした: {}", directory.display()))?
    {
        let entry =
            entry.with_context(|| format!("エントリ読み取り失敗: {}", directory.display()))?;
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        stats.scanned_entries += 1;
        if is_image(&path) {
            stats.image_files += 1;
            out.push(path);
        } else {
            stats.skipped_non_image += 1;
        }
    }

    out.sort();
    Ok(out)
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            IMAGE_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::{collect_image_files, is_image};
    use crate::organize::OrganizeStats;
    use std::fs::{self, File};
    use std::path::Path;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        File::create(path).expect("file must be creatable");
    }

    #[test]
    fn collects_only_image_extensions_case_insensitively() {
        let temp = tempdir().expect("tempdir");
        touch(&temp.path().join("a.jpg"));
        touch(&temp.path().join("b.JPG"));
        touch(&temp.path().join("c.Jpeg"));
        touch(&temp.path().join("notes.txt"));
        touch(&temp.path().join("noext"));
        fs::create_dir(temp.path().join("2023-05-01")).expect("subdir");

        let mut stats = OrganizeStats::default();
        let files = collect_image_files(temp.path(), &mut stats).expect("scan should succeed");

        let names: Vec<String> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|v| v.to_str()).map(str::to_string))
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.JPG", "c.Jpeg"]);
        assert_eq!(stats.scanned_entries, 5);
        assert_eq!(stats.image_files, 3);
        assert_eq!(stats.skipped_non_image, 2);
    }

    #[test]
    fn is_image_rejects_unknown_extensions() {
        assert!(is_image(Path::new("/tmp/photo.JPG")));
        assert!(is_image(Path::new("/tmp/photo.jpeg")));
        assert!(is_image(Path::new("/tmp/photo.JpEg")));
        assert!(!is_image(Path::new("/tmp/photo.png")));
        assert!(!is_image(Path::new("/tmp/photo")));
    }

    #[test]
    fn returns_candidates_sorted_by_path() {
        let temp = tempdir().expect("tempdir");
        touch(&temp.path().join("b.jpg"));
        touch(&temp.path().join("a.jpg"));

        let mut stats = OrganizeStats::default();
        let files = collect_image_files(temp.path(), &mut stats).expect("scan should succeed");
        assert_eq!(
            files,
            vec![temp.path().join("a.jpg"), temp.path().join("b.jpg")]
        );
    }
}
