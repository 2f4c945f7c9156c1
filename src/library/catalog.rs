use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::config::{CatalogSettings, OrderingPolicy};
use crate::storage::Storage;

/// Characters that end the leading ordinal token of a file name.
const ORDINAL_SEPARATORS: &[char] = &['.', ' ', '-', '_'];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("directory not found: {}", path.display())]
    MissingDirectory { path: PathBuf },

    #[error("file name has no leading track number: {}", path.display())]
    MalformedFilename { path: PathBuf },

    #[error("failed to list {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|s| s.to_str()).unwrap_or("")
}

fn is_track_file(path: &Path, settings: &CatalogSettings) -> bool {
    let wanted = settings
        .extension
        .trim()
        .trim_start_matches('.')
        .to_ascii_lowercase();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.to_ascii_lowercase() == wanted)
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    file_name(path).starts_with('.')
}

/// Integer formed by the characters before the first separator, if any.
///
/// `"007. Song.mp3"` gives 7, `"12_intro.mp3"` gives 12, `"Song.mp3"` gives none.
pub fn leading_number(name: &str) -> Option<u64> {
    let token = name.split(ORDINAL_SEPARATORS).next()?;
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// List the track files directly inside `dir`, in program order.
pub fn catalog(
    storage: &dyn Storage,
    dir: &Path,
    settings: &CatalogSettings,
) -> Result<Vec<PathBuf>, CatalogError> {
    if !storage.is_dir(dir) {
        return Err(CatalogError::MissingDirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut files: Vec<PathBuf> = storage
        .list_files(dir)
        .map_err(|source| CatalogError::Io {
            path: dir.to_path_buf(),
            source,
        })?
        .into_iter()
        .filter(|p| settings.include_hidden || !is_hidden(p))
        .filter(|p| is_track_file(p, settings))
        .collect();

    match settings.ordering {
        OrderingPolicy::NumericPrefix => {
            let mut keyed = Vec::with_capacity(files.len());
            for path in files {
                let number = leading_number(file_name(&path))
                    .ok_or_else(|| CatalogError::MalformedFilename { path: path.clone() })?;
                keyed.push((number, path));
            }
            // Equal numbers fall back to the name so the order stays total.
            keyed.sort_by(|(na, pa), (nb, pb)| na.cmp(nb).then_with(|| pa.cmp(pb)));
            files = keyed.into_iter().map(|(_, path)| path).collect();
        }
        OrderingPolicy::Lexicographic => {
            files.sort_by(|a, b| file_name(a).cmp(file_name(b)));
        }
    }

    debug!(dir = %dir.display(), count = files.len(), ordering = ?settings.ordering, "catalogued tracks");
    Ok(files)
}
