use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// 候補と同じベース名を持つ同名ファイル(`basename.*`)を探す。候補自身は含めない。
pub fn find_twin_files(directory: &Path, candidate: &Path) -> Result<Vec<PathBuf>> {
    let Some(stem) = candidate.file_stem().map(|v| v.to_string_lossy().to_string()) else {
        return Ok(Vec::new());
    };
    let prefix = format!("{stem}.");

    let mut out = Vec::new();
    for entry in fs::read_dir(directory)
        .with_context(|| format!("フォルダを読めませんでした: {}", directory.display()))?
    {
        let entry =
            entry.with_context(|| format!("エントリ読み取り失敗: {}", directory.display()))?;
        let path = entry.path();
        if path == candidate || !path.is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with(&prefix) {
            out.push(path);
        }
    }

    out.sort();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::find_twin_files;
    use std::fs::{self, File};
    use std::path::Path;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        File::create(path).expect("file must be creatable");
    }

    #[test]
    fn finds_companions_sharing_the_basename() {
        let temp = tempdir().expect("tempdir");
        let jpg = temp.path().join("IMG_0001.JPG");
        let cr2 = temp.path().join("IMG_0001.CR2");
        let xmp = temp.path().join("IMG_0001.xmp");
        touch(&jpg);
        touch(&cr2);
        touch(&xmp);
        touch(&temp.path().join("IMG_0002.CR2"));

        let twins = find_twin_files(temp.path(), &jpg).expect("twin scan should succeed");
        assert_eq!(twins, vec![cr2, xmp]);
    }

    #[test]
    fn requires_a_dot_right_after_the_basename() {
        let temp = tempdir().expect("tempdir");
        let jpg = temp.path().join("IMG_0001.JPG");
        touch(&jpg);
        touch(&temp.path().join("IMG_00012.CR2"));
        touch(&temp.path().join("IMG_0001"));

        let twins = find_twin_files(temp.path(), &jpg).expect("twin scan should succeed");
        assert!(twins.is_empty());
    }

    #[test]
    fn keeps_directories_out_of_the_twin_set() {
        let temp = tempdir().expect("tempdir");
        let jpg = temp.path().join("IMG_0001.JPG");
        touch(&jpg);
        fs::create_dir(temp.path().join("IMG_0001.files")).expect("subdir");

        let twins = find_twin_files(temp.path(), &jpg).expect("twin scan should succeed");
        assert!(twins.is_empty());
    }

    #[test]
    fn multi_dot_basenames_match_their_own_siblings() {
        let temp = tempdir().expect("tempdir");
        let jpg = temp.path().join("trip.day1.jpg");
        let raf = temp.path().join("trip.day1.RAF");
        touch(&jpg);
        touch(&raf);
        touch(&temp.path().join("trip.day2.RAF"));

        let twins = find_twin_files(temp.path(), &jpg).expect("twin scan should succeed");
        assert_eq!(twins, vec![raf]);
    }
}
