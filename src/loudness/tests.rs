use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use super::*;
use crate::ffmpeg::ToolError;
use crate::testutil::write_tone;

/// Writes a fixed WAV to the output, recording what it was asked to do.
struct CopyTransform {
    replacement: PathBuf,
    calls: RefCell<Vec<(PathBuf, PathBuf)>>,
}

impl LoudnessTransform for CopyTransform {
    fn apply(&self, input: &Path, output: &Path) -> Result<(), ToolError> {
        self.calls
            .borrow_mut()
            .push((input.to_path_buf(), output.to_path_buf()));
        fs::copy(&self.replacement, output).unwrap();
        Ok(())
    }
}

/// Exits non-zero after leaving a partial file behind.
struct FailingTransform;

impl LoudnessTransform for FailingTransform {
    fn apply(&self, _input: &Path, output: &Path) -> Result<(), ToolError> {
        fs::write(output, b"partial").unwrap();
        Err(ToolError::Failed {
            program: PathBuf::from("ffmpeg"),
            code: Some(1),
            stderr: "Invalid data found when processing input".to_string(),
        })
    }
}

/// Reports success but writes `contents` (possibly nothing at all).
struct BogusTransform {
    contents: Option<&'static [u8]>,
}

impl LoudnessTransform for BogusTransform {
    fn apply(&self, _input: &Path, output: &Path) -> Result<(), ToolError> {
        if let Some(bytes) = self.contents {
            fs::write(output, bytes).unwrap();
        }
        Ok(())
    }
}

fn original(dir: &Path) -> (PathBuf, Vec<u8>) {
    let path = dir.join("001. Artist - Song.wav");
    write_tone(&path, 8_000, 1, 500);
    let bytes = fs::read(&path).unwrap();
    (path, bytes)
}

fn names_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn profile_renders_loudnorm_filter() {
    assert_eq!(LOUDNESS_PROFILE.filter(), "loudnorm=I=-16:LRA=11:TP=-1.5");
}

#[test]
fn staging_path_is_hidden_sibling_with_same_extension() {
    assert_eq!(
        staging_path(Path::new("/music/001. A - B.mp3")),
        PathBuf::from("/music/.001. A - B.loudnorm.mp3")
    );
    assert_eq!(
        staging_path(Path::new("/music/track")),
        PathBuf::from("/music/.track.loudnorm")
    );
}

#[test]
fn successful_transform_replaces_original_in_place() {
    let dir = tempdir().unwrap();
    let (path, before) = original(dir.path());

    let replacement = dir.path().join("replacement.bin");
    write_tone(&replacement, 8_000, 1, 900);
    let transform = CopyTransform {
        replacement: replacement.clone(),
        calls: RefCell::new(Vec::new()),
    };

    normalize_file(&transform, &path).unwrap();

    let after = fs::read(&path).unwrap();
    assert_ne!(after, before);
    assert_eq!(after, fs::read(&replacement).unwrap());
    assert_eq!(
        transform.calls.borrow().as_slice(),
        &[(path.clone(), staging_path(&path))]
    );
    assert!(!staging_path(&path).exists());
}

#[test]
fn failing_transform_leaves_original_byte_identical() {
    let dir = tempdir().unwrap();
    let (path, before) = original(dir.path());

    let err = normalize_file(&FailingTransform, &path).unwrap_err();
    match err {
        NormalizeError::Failed { path: failed, reason } => {
            assert_eq!(failed, path);
            assert!(matches!(reason, FailureReason::Transform(_)));
        }
        other => panic!("unexpected error: {other}"),
    }

    assert_eq!(fs::read(&path).unwrap(), before);
    assert_eq!(names_in(dir.path()), vec!["001. Artist - Song.wav"]);
}

#[test]
fn missing_output_is_rejected() {
    let dir = tempdir().unwrap();
    let (path, before) = original(dir.path());

    let err = normalize_file(&BogusTransform { contents: None }, &path).unwrap_err();
    assert!(matches!(
        err,
        NormalizeError::Failed {
            reason: FailureReason::MissingOutput,
            ..
        }
    ));
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn empty_output_is_rejected_and_cleaned_up() {
    let dir = tempdir().unwrap();
    let (path, before) = original(dir.path());

    let err = normalize_file(&BogusTransform { contents: Some(b"") }, &path).unwrap_err();
    assert!(matches!(
        err,
        NormalizeError::Failed {
            reason: FailureReason::EmptyOutput,
            ..
        }
    ));
    assert_eq!(fs::read(&path).unwrap(), before);
    assert_eq!(names_in(dir.path()), vec!["001. Artist - Song.wav"]);
}

#[test]
fn undecodable_output_is_rejected() {
    let dir = tempdir().unwrap();
    let (path, before) = original(dir.path());

    let transform = BogusTransform {
        contents: Some(b"this is not audio at all"),
    };
    let err = normalize_file(&transform, &path).unwrap_err();
    assert!(matches!(
        err,
        NormalizeError::Failed {
            reason: FailureReason::InvalidOutput(_),
            ..
        }
    ));
    assert_eq!(fs::read(&path).unwrap(), before);
    assert!(!staging_path(&path).exists());
}

#[test]
fn normalize_all_stops_at_first_failure() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("1. a.wav");
    let second = dir.path().join("2. b.wav");
    write_tone(&first, 8_000, 1, 200);
    write_tone(&second, 8_000, 1, 200);
    let second_before = fs::read(&second).unwrap();

    struct FailOnSecond;
    impl LoudnessTransform for FailOnSecond {
        fn apply(&self, input: &Path, output: &Path) -> Result<(), ToolError> {
            if input.ends_with("2. b.wav") {
                return Err(ToolError::Failed {
                    program: PathBuf::from("ffmpeg"),
                    code: None,
                    stderr: String::new(),
                });
            }
            fs::copy(input, output).unwrap();
            Ok(())
        }
    }

    let err = normalize_all(&FailOnSecond, &[first.clone(), second.clone()]).unwrap_err();
    assert!(matches!(err, NormalizeError::Failed { path, .. } if path == second));
    assert_eq!(fs::read(&second).unwrap(), second_before);
    assert!(first.exists());
}
