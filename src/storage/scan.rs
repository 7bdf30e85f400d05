//! Loading every scene file under a directory.

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::Serialize;
use tracing::instrument;
use walkdir::WalkDir;

use crate::{
    domain::{Config, distribution_by_category},
    storage::{LoadError, OpenError, Scene},
};

/// The size breakdown of one scene file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneSummary {
    /// The scene file.
    pub path: PathBuf,
    /// The file size in bytes.
    pub size: u64,
    /// The number of records.
    pub records: usize,
    /// Bytes per record category, as returned by
    /// [`distribution_by_category`].
    pub categories: Vec<(&'static str, u64)>,
}

/// Errors that can occur when scanning a single file.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The file could not be opened.
    #[error(transparent)]
    Open(#[from] OpenError),

    /// The file could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// The outcome of a directory scan.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Every file that loaded, in path order.
    pub scenes: Vec<SceneSummary>,
    /// Every file that failed to load, in path order.
    pub failures: Vec<(PathBuf, ScanError)>,
}

/// Loads every file under `root` carrying the configured extension, in
/// parallel.
///
/// A file that fails to load is reported in [`ScanReport::failures`] and does
/// not stop the scan. Unreadable directory entries are skipped.
#[must_use]
#[instrument(level = "debug", skip(config))]
pub fn scan(root: &Path, config: &Config) -> ScanReport {
    let paths = collect_scene_paths(root, config.extension());
    tracing::debug!(files = paths.len(), "found scene files");

    let (scenes, failures): (Vec<_>, Vec<_>) = paths
        .par_iter()
        .map(|path| summarize(path, config).map_err(|error| (path.clone(), error)))
        .partition(Result::is_ok);

    ScanReport {
        scenes: scenes.into_iter().filter_map(Result::ok).collect(),
        failures: failures.into_iter().filter_map(Result::err).collect(),
    }
}

fn collect_scene_paths(root: &Path, extension: &str) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension() == Some(OsStr::new(extension)))
        .map(walkdir::DirEntry::into_path)
        .collect()
}

fn summarize(path: &Path, config: &Config) -> Result<SceneSummary, ScanError> {
    let scene = Scene::open_with_config(path, config.clone())?;
    let records = scene.load(&mut ())?;
    Ok(SceneSummary {
        path: path.to_path_buf(),
        size: scene.source().size(),
        records: records.len(),
        categories: distribution_by_category(&records),
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn loads_matching_files_in_path_order() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.ma"), "createNode transform -n \"b\";\n").unwrap();
        fs::write(
            dir.path().join("nested").join("a.ma"),
            "requires maya \"2018\";\nconnectAttr \"a.t\" \"b.t\";\n",
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "not a scene\n").unwrap();

        let report = scan(dir.path(), &Config::default());
        assert!(report.failures.is_empty());

        let names: Vec<_> = report
            .scenes
            .iter()
            .map(|scene| scene.path.file_name().unwrap().to_owned())
            .collect();
        assert_eq!(names, vec!["b.ma", "a.ma"]);

        let nested = &report.scenes[1];
        assert_eq!(nested.records, 2);
        assert_eq!(nested.categories[1], ("connection", 25));
    }

    #[test]
    fn empty_directory_yields_empty_report() {
        let dir = tempdir().unwrap();
        let report = scan(dir.path(), &Config::default());
        assert!(report.scenes.is_empty());
        assert!(report.failures.is_empty());
    }

    #[test]
    fn configured_extension_selects_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.ma"), "a;\n").unwrap();
        fs::write(dir.path().join("b.mya"), "b;\n").unwrap();

        let mut config = Config::default();
        config.set_extension("mya");
        let report = scan(dir.path(), &config);
        assert_eq!(report.scenes.len(), 1);
        assert!(report.scenes[0].path.ends_with("b.mya"));
    }
}
