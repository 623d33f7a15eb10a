use clap::Parser;
use std::path::PathBuf;

/// Total up the running time of every video under a directory
#[derive(Debug, Parser)]
#[command(name = "video-length", version)]
pub struct Args {
    /// Directory to scan; the report is written into it
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_arg_parsing() {
        let args = Args::try_parse_from(["video-length", "/Volumes/Movies"]).unwrap();
        assert_eq!(args.directory, PathBuf::from("/Volumes/Movies"));
    }

    #[test]
    fn test_directory_is_required() {
        let err = Args::try_parse_from(["video-length"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_rejects_extra_arguments() {
        assert!(Args::try_parse_from(["video-length", "a", "b"]).is_err());
    }

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }
}
