use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

use crate::error::ProbeError;

const DEFAULT_PROGRAM: &str = "ffprobe";

/// Value ffprobe prints when a field exists but carries no data
const NOT_AVAILABLE: &str = "N/A";

/// Anything that can report the duration of a media file in seconds
pub trait DurationProbe {
    fn probe(&self, path: &Path) -> Result<f64, ProbeError>;
}

impl<F> DurationProbe for F
where
    F: Fn(&Path) -> Result<f64, ProbeError>,
{
    fn probe(&self, path: &Path) -> Result<f64, ProbeError> {
        self(path)
    }
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

/// Duration probe backed by the ffprobe executable, one process per file
#[derive(Debug, Clone)]
pub struct Ffprobe {
    program: PathBuf,
}

impl Default for Ffprobe {
    fn default() -> Self {
        Ffprobe {
            program: PathBuf::from(DEFAULT_PROGRAM),
        }
    }
}

impl Ffprobe {
    /// Use a specific ffprobe binary instead of the one on PATH
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Ffprobe {
            program: program.into(),
        }
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }
}

impl DurationProbe for Ffprobe {
    fn probe(&self, path: &Path) -> Result<f64, ProbeError> {
        debug!(file = %path.display(), "probing duration");

        let output = Command::new(&self.program)
            .args(["-v", "error", "-show_entries", "format=duration", "-of", "json"])
            .arg(path)
            .output()
            .map_err(|err| {
                if err.kind() == ErrorKind::NotFound {
                    ProbeError::NotFound {
                        program: self.program_name(),
                    }
                } else {
                    ProbeError::Spawn {
                        program: self.program_name(),
                        source: err,
                    }
                }
            })?;

        if !output.status.success() {
            return Err(ProbeError::Exit {
                program: self.program_name(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_duration(&output.stdout)
    }
}

/// Extract `format.duration` from ffprobe's JSON output.
///
/// A missing or `N/A` duration counts as zero seconds.
pub fn parse_duration(stdout: &[u8]) -> Result<f64, ProbeError> {
    let parsed: ProbeOutput = serde_json::from_slice(stdout)?;

    let raw = match parsed.format.and_then(|format| format.duration) {
        Some(raw) => raw,
        None => return Ok(0.0),
    };

    let raw = raw.trim();
    if raw == NOT_AVAILABLE {
        return Ok(0.0);
    }

    match raw.parse::<f64>() {
        Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => Ok(seconds),
        _ => Err(ProbeError::InvalidDuration(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        let stdout = br#"{"programs": [], "format": {"duration": "3661.250000"}}"#;
        assert_eq!(parse_duration(stdout).unwrap(), 3661.25);
    }

    #[test]
    fn test_parse_duration_missing_is_zero() {
        assert_eq!(parse_duration(br#"{"format": {}}"#).unwrap(), 0.0);
        assert_eq!(parse_duration(br#"{}"#).unwrap(), 0.0);
        assert_eq!(parse_duration(br#"{"format": {"duration": "N/A"}}"#).unwrap(), 0.0);
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(matches!(
            parse_duration(b"not json"),
            Err(ProbeError::Parse(_))
        ));
        assert!(matches!(
            parse_duration(br#"{"format": {"duration": "abc"}}"#),
            Err(ProbeError::InvalidDuration(_))
        ));
        assert!(matches!(
            parse_duration(br#"{"format": {"duration": "-4.0"}}"#),
            Err(ProbeError::InvalidDuration(_))
        ));
    }

    #[test]
    fn test_missing_program() {
        let probe = Ffprobe::with_program("/nonexistent/bin/ffprobe-missing");
        let err = probe.probe(Path::new("clip.mp4")).unwrap_err();
        assert!(matches!(err, ProbeError::NotFound { .. }));
        assert!(err.to_string().contains("ffprobe-missing"));
    }

    #[test]
    fn test_closure_probe() {
        let probe = |_: &Path| -> Result<f64, ProbeError> { Ok(12.5) };
        assert_eq!(probe.probe(Path::new("a.mkv")).unwrap(), 12.5);
    }
}
