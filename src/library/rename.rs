use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::RenameMode;
use crate::storage::Storage;

use super::filename::numbered_prefix;

#[derive(Debug, Error)]
pub enum RenameError {
    #[error("cannot rename to {}: a file with that name already exists", path.display())]
    Conflict { path: PathBuf },

    #[error("failed to rename {} to {}: {source}", from.display(), to.display())]
    Io {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameStep {
    pub ordinal: usize,
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Ordered renames for one folder. Empty when the folder is already numbered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenamePlan {
    steps: Vec<RenameStep>,
}

impl RenamePlan {
    pub fn steps(&self) -> &[RenameStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// `"<ordinal:03>. <original name>"`.
pub fn numbered_name(ordinal: usize, file_name: &str) -> String {
    format!("{ordinal:03}. {file_name}")
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|s| s.to_str()).unwrap_or("")
}

/// Whether the first file already starts with `001.`.
fn already_numbered(files: &[PathBuf]) -> bool {
    files
        .first()
        .and_then(|p| numbered_prefix(file_name(p)))
        .is_some_and(|ordinal| ordinal == 1)
}

/// Shuffle `files` in place, reproducibly when `seed` is given.
pub fn shuffle_files(files: &mut [PathBuf], seed: Option<u64>) {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    files.shuffle(&mut rng);
}

/// Work out the new name of every file, in program order.
pub fn plan_renames(files: &[PathBuf], shuffle: bool, seed: Option<u64>) -> RenamePlan {
    if already_numbered(files) {
        return RenamePlan::default();
    }

    let mut order = files.to_vec();
    if shuffle {
        shuffle_files(&mut order, seed);
    }

    let steps = order
        .into_iter()
        .enumerate()
        .map(|(i, from)| {
            let ordinal = i + 1;
            let to = from.with_file_name(numbered_name(ordinal, file_name(&from)));
            RenameStep { ordinal, from, to }
        })
        .collect();

    RenamePlan { steps }
}

fn staging_path(step: &RenameStep) -> PathBuf {
    step.from
        .with_file_name(format!(".mixtape-rename-{:06}.tmp", step.ordinal))
}

fn roll_back(storage: &dyn Storage, journal: &[(PathBuf, PathBuf)]) {
    for (from, to) in journal.iter().rev() {
        if let Err(e) = storage.rename(to, from) {
            warn!(
                from = %to.display(),
                to = %from.display(),
                error = %e,
                "could not restore file name"
            );
        }
    }
}

/// Apply `plan` as one batch.
///
/// Every file is first moved to a hidden staging name, then to its final
/// name. Any failure replays the completed moves backwards so the folder
/// keeps its original names.
pub fn apply_plan(storage: &dyn Storage, plan: &RenamePlan) -> Result<usize, RenameError> {
    let sources: HashSet<&Path> = plan.steps().iter().map(|s| s.from.as_path()).collect();
    let staged: Vec<PathBuf> = plan.steps().iter().map(staging_path).collect();

    for (step, stage) in plan.steps().iter().zip(&staged) {
        if storage.exists(&step.to) && !sources.contains(step.to.as_path()) {
            return Err(RenameError::Conflict {
                path: step.to.clone(),
            });
        }
        if storage.exists(stage) {
            return Err(RenameError::Conflict {
                path: stage.clone(),
            });
        }
    }

    let mut journal: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(plan.steps().len() * 2);

    let moves = plan
        .steps()
        .iter()
        .zip(&staged)
        .map(|(step, stage)| (&step.from, stage))
        .chain(
            plan.steps()
                .iter()
                .zip(&staged)
                .map(|(step, stage)| (stage, &step.to)),
        );

    for (from, to) in moves {
        debug!(from = %from.display(), to = %to.display(), "rename");
        if let Err(source) = storage.rename(from, to) {
            roll_back(storage, &journal);
            return Err(RenameError::Io {
                from: from.clone(),
                to: to.clone(),
                source,
            });
        }
        journal.push((from.clone(), to.clone()));
    }

    Ok(plan.steps().len())
}

/// Number `files` on disk according to `mode`; returns how many were renamed.
pub fn rename_tracks(
    storage: &dyn Storage,
    files: &[PathBuf],
    mode: RenameMode,
    seed: Option<u64>,
) -> Result<usize, RenameError> {
    let shuffle = match mode {
        RenameMode::Off => return Ok(0),
        RenameMode::Sequential => false,
        RenameMode::Shuffled => true,
    };

    let plan = plan_renames(files, shuffle, seed);
    if plan.is_empty() {
        info!("tracks already carry ordinal prefixes, leaving names alone");
        return Ok(0);
    }

    let renamed = apply_plan(storage, &plan)?;
    info!(renamed, shuffled = shuffle, "numbered track files");
    Ok(renamed)
}
