use std::fmt::Write;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::scanner::ScanResult;

/// Report file written into the scanned directory, replaced on every run
pub const REPORT_FILE_NAME: &str = "video_length_report.txt";

const ROOT_LABEL: &str = "Root";

/// Format seconds as `{h}h {m}m {s}s`, truncating any fractional second
pub fn format_duration(seconds: f64) -> String {
    let hours = (seconds / 3600.0).floor() as u64;
    let minutes = ((seconds % 3600.0) / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;

    format!("{}h {}m {}s", hours, minutes, secs)
}

/// Build the full report text for a finished scan
pub fn render_report(dir: &Path, result: &ScanResult) -> String {
    let mut report = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(report, "Video Length Report");
    let _ = writeln!(report, "Selected Directory: {}\n", dir.display());
    let _ = writeln!(
        report,
        "Total Duration: {}\n",
        format_duration(result.total_seconds())
    );
    let _ = writeln!(report, "Per Folder Duration:");

    for (folder, seconds) in result.folders() {
        let label = if folder.is_empty() { ROOT_LABEL } else { folder };
        let _ = writeln!(report, "{}: {}", label, format_duration(seconds));
    }

    report
}

/// Write the report into `dir`, returning the path written
pub fn write_report(dir: &Path, contents: &str) -> io::Result<PathBuf> {
    let path = dir.join(REPORT_FILE_NAME);
    fs::write(&path, contents)?;
    Ok(path)
}
