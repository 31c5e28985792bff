use std::path::PathBuf;

use thiserror::Error;

/// Name list error types
#[derive(Error, Debug)]
pub enum NamelistError {
    #[error("No source files configured")]
    NoSources,

    #[error("Source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Reload task failed: {0}")]
    ReloadTask(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NamelistError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_not_found_display_includes_path() {
        let err = NamelistError::SourceNotFound(PathBuf::from("/etc/lists/ads.conf"));
        let display = format!("{}", err);
        assert!(display.contains("/etc/lists/ads.conf"), "got: {}", display);
    }

    #[test]
    fn test_io_error_converts() {
        fn open() -> Result<()> {
            Err::<(), _>(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"))?;
            Ok(())
        }
        match open() {
            Err(NamelistError::IoError(e)) => {
                assert_eq!(e.kind(), std::io::ErrorKind::PermissionDenied);
            }
            other => panic!("expected IoError, got {:?}", other),
        }
    }
}
