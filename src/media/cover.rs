use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Accepted cover file names, compared case-insensitively.
pub const COVER_NAMES: &[&str] = &["cover.png", "cover.jpg", "cover.jpeg"];

/// First file in `dir` named `cover.png`, `cover.jpg` or `cover.jpeg`
/// (any case), in file name order.
pub fn find_cover_image(dir: &Path) -> io::Result<Option<PathBuf>> {
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_lowercase();
        if COVER_NAMES.contains(&name.as_str()) {
            return Ok(Some(entry.into_path()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn finds_cover_case_insensitively() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::write(dir.path().join("Cover.JPG"), b"jpg").unwrap();

        let found = find_cover_image(dir.path()).unwrap().unwrap();
        assert_eq!(found, dir.path().join("Cover.JPG"));
    }

    #[test]
    fn ignores_other_images_and_directories() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("cover.gif"), b"").unwrap();
        fs::write(dir.path().join("back.png"), b"").unwrap();
        fs::create_dir_all(dir.path().join("cover.png")).unwrap();

        assert_eq!(find_cover_image(dir.path()).unwrap(), None);
    }

    #[test]
    fn choice_is_deterministic_when_several_match() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("cover.png"), b"").unwrap();
        fs::write(dir.path().join("cover.jpeg"), b"").unwrap();

        let found = find_cover_image(dir.path()).unwrap().unwrap();
        assert_eq!(found, dir.path().join("cover.jpeg"));
    }
}
