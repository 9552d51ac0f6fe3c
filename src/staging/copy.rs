//! Copying the WebAssembly build artifacts into the static directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::StagingConfig;

/// Error raised while staging assets. Staging stops at the first one.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("failed to create destination directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("source and destination are the same directory: {}", path.display())]
    SameDirectory { path: PathBuf },

    #[error("failed to copy {file} from {} to {}: {source}", from.display(), to.display())]
    Copy {
        file: String,
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Source, destination and file list for one staging run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageConfig {
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    pub files: Vec<String>,
}

impl StageConfig {
    pub fn new(source_dir: impl Into<PathBuf>, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            files: StagingConfig::default().files,
        }
    }

    /// Replace the staged file list.
    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for StageConfig {
    fn default() -> Self {
        Self::from(&StagingConfig::default())
    }
}

impl From<&StagingConfig> for StageConfig {
    fn from(config: &StagingConfig) -> Self {
        Self {
            source_dir: PathBuf::from(&config.source_dir),
            dest_dir: PathBuf::from(&config.dest_dir),
            files: config.files.clone(),
        }
    }
}

/// One file that was copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedAsset {
    pub name: String,
    pub destination: PathBuf,
    pub bytes: u64,
}

/// Outcome of a completed staging run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageReport {
    pub assets: Vec<StagedAsset>,
}

impl StageReport {
    pub fn total_bytes(&self) -> u64 {
        self.assets.iter().map(|a| a.bytes).sum()
    }
}

/// Copy every configured file from the source directory into the destination.
///
/// The destination (and missing parents) is created first. Files are copied in
/// list order, overwriting existing files. The first failure aborts the run;
/// files copied before it are left in place. Staging a directory onto itself
/// is refused, since copying a file onto itself truncates it.
pub fn stage_assets(config: &StageConfig) -> Result<StageReport, StageError> {
    ensure_dir(&config.dest_dir)?;
    reject_same_dir(&config.source_dir, &config.dest_dir)?;

    let mut report = StageReport::default();
    for file in &config.files {
        let asset = copy_one(file, &config.source_dir, &config.dest_dir)?;
        tracing::info!(
            file = %asset.name,
            dest = %config.dest_dir.display(),
            bytes = asset.bytes,
            "Copied {} to {}",
            asset.name,
            config.dest_dir.display()
        );
        report.assets.push(asset);
    }

    Ok(report)
}

fn ensure_dir(path: &Path) -> Result<(), StageError> {
    if path.is_dir() {
        return Ok(());
    }

    fs::create_dir_all(path).map_err(|source| StageError::CreateDir {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "Created destination directory");
    Ok(())
}

fn reject_same_dir(source_dir: &Path, dest_dir: &Path) -> Result<(), StageError> {
    // a missing source fails on the first copy instead
    let Ok(source) = source_dir.canonicalize() else {
        return Ok(());
    };
    match dest_dir.canonicalize() {
        Ok(dest) if dest == source => Err(StageError::SameDirectory { path: source }),
        _ => Ok(()),
    }
}

fn copy_one(file: &str, source_dir: &Path, dest_dir: &Path) -> Result<StagedAsset, StageError> {
    let from = source_dir.join(file);
    let to = dest_dir.join(file);

    let bytes = fs::copy(&from, &to).map_err(|source| StageError::Copy {
        file: file.to_string(),
        from: from.clone(),
        to: to.clone(),
        source,
    })?;

    Ok(StagedAsset {
        name: file.to_string(),
        destination: to,
        bytes,
    })
}
