use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::ScanError;
use crate::probe::DurationProbe;

/// File name suffixes treated as video files (case-sensitive)
pub const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".mkv", ".mov"];

/// Check whether a file name carries one of the recognized video suffixes
pub fn is_video_file(file_name: &str) -> bool {
    VIDEO_EXTENSIONS.iter().any(|ext| file_name.ends_with(ext))
}

/// Durations accumulated over one scan.
///
/// Folder keys are paths relative to the scan root joined with `/`; the root
/// itself is the empty string. Keys iterate in first-insertion order.
#[derive(Debug, Default, Clone)]
pub struct ScanResult {
    total_seconds: f64,
    folders: Vec<(String, f64)>,
    index: HashMap<String, usize>,
    failed_files: usize,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one successfully probed file to the total and to its folder
    pub fn record(&mut self, folder: &str, seconds: f64) {
        self.total_seconds += seconds;

        match self.index.get(folder) {
            Some(&i) => self.folders[i].1 += seconds,
            None => {
                self.index.insert(folder.to_string(), self.folders.len());
                self.folders.push((folder.to_string(), seconds));
            }
        }
    }

    pub fn total_seconds(&self) -> f64 {
        self.total_seconds
    }

    pub fn folders(&self) -> impl Iterator<Item = (&str, f64)> {
        self.folders.iter().map(|(key, secs)| (key.as_str(), *secs))
    }

    /// Accumulated seconds for one folder key, if any file was recorded there
    pub fn folder(&self, key: &str) -> Option<f64> {
        self.index.get(key).map(|&i| self.folders[i].1)
    }

    /// True when no file has been recorded
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    /// Eligible files whose probe failed and were left out of every aggregate
    pub fn failed_files(&self) -> usize {
        self.failed_files
    }
}

/// Sequential directory walker that probes each video through `P`
pub struct Scanner<P> {
    probe: P,
}

impl<P: DurationProbe> Scanner<P> {
    pub fn new(probe: P) -> Self {
        Scanner { probe }
    }

    /// Walk `root` depth-first, probing every video file one at a time.
    ///
    /// Probe failures are reported on stderr and skipped. Any error reading
    /// the tree itself aborts the scan.
    pub fn scan(&self, root: &Path) -> Result<ScanResult, ScanError> {
        let metadata = fs::metadata(root).map_err(|source| ScanError::Root {
            path: root.to_path_buf(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory(root.to_path_buf()));
        }

        let mut result = ScanResult::new();

        for entry in WalkDir::new(root).min_depth(1).follow_links(true) {
            let entry = entry?;

            // WalkDir descends on its own
            if entry.file_type().is_dir() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            if !is_video_file(&file_name) {
                debug!(file = %entry.path().display(), "skipping non-video entry");
                continue;
            }

            let folder = relative_folder(root, entry.path());

            match self.probe.probe(entry.path()) {
                Ok(seconds) => {
                    debug!(file = %entry.path().display(), folder = %folder, seconds, "recorded");
                    result.record(&folder, seconds);
                }
                Err(e) => {
                    eprintln!("Error getting duration for {}: {}", file_name, e);
                    result.failed_files += 1;
                }
            }
        }

        info!(
            total_seconds = result.total_seconds,
            folders = result.folders.len(),
            failed = result.failed_files,
            "scan complete"
        );

        Ok(result)
    }
}

/// Folder key for a file: its parent directory relative to `root`
fn relative_folder(root: &Path, file: &Path) -> String {
    let parent = match file.parent() {
        Some(p) => p,
        None => return String::new(),
    };

    let relative = match parent.strip_prefix(root) {
        Ok(relative) => relative,
        Err(_) => {
            debug_assert!(
                parent.starts_with(root),
                "{} is outside scan root {}",
                parent.display(),
                root.display()
            );
            parent
        }
    };

    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
