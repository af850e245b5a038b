//! Errors from the settings and profile files.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which filesystem step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOp {
    /// Reading a file.
    Read,
    /// Writing a file.
    Write,
    /// Creating the config directory.
    CreateDir,
}

impl fmt::Display for IoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IoOp::Read => "read",
            IoOp::Write => "write",
            IoOp::CreateDir => "create directory",
        })
    }
}

/// Anything that can go wrong loading or storing settings and profiles.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The filesystem refused.
    #[error("could not {op} '{path}': {source}")]
    Io {
        /// Step that failed.
        op: IoOp,
        /// File or directory involved.
        path: PathBuf,
        /// Cause.
        #[source]
        source: std::io::Error,
    },

    /// A settings or profile file is not valid TOML for its schema.
    #[error("invalid TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Settings could not be rendered as TOML.
    #[error("could not serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// No saved profile has this name.
    #[error("profile not found: {0}")]
    ProfileNotFound(String),

    /// No factory preset has this name.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// Profile name was empty after trimming.
    #[error("profile name must not be empty")]
    InvalidProfileName,
}

impl ConfigError {
    pub(crate) fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::io(IoOp::Read, path, source)
    }

    pub(crate) fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::io(IoOp::Write, path, source)
    }

    pub(crate) fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::io(IoOp::CreateDir, path, source)
    }

    fn io(op: IoOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// The filesystem step that failed, for I/O errors.
    pub fn io_op(&self) -> Option<IoOp> {
        match self {
            ConfigError::Io { op, .. } => Some(*op),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn not_found() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "gone")
    }

    #[test]
    fn io_errors_name_step_and_path() {
        let err = ConfigError::write_file("/a/profiles.toml", not_found());
        assert_eq!(err.io_op(), Some(IoOp::Write));
        assert_eq!(err.to_string(), "could not write '/a/profiles.toml': gone");

        let err = ConfigError::create_dir("/a", not_found());
        assert!(err.to_string().starts_with("could not create directory"));
    }

    #[test]
    fn lookup_errors_carry_the_name() {
        assert_eq!(
            ConfigError::ProfileNotFound("Office".to_string()).to_string(),
            "profile not found: Office"
        );
        assert_eq!(
            ConfigError::UnknownPreset("concert".to_string()).to_string(),
            "unknown preset: concert"
        );
        assert_eq!(ConfigError::InvalidProfileName.io_op(), None);
    }

    #[test]
    fn only_io_errors_have_a_source() {
        assert!(ConfigError::read_file("/x", not_found()).source().is_some());
        assert!(ConfigError::ProfileNotFound("p".into()).source().is_none());
    }
}
