use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading or writing the data directory
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported schema version {found} in {} (expected at most {supported})", path.display())]
    UnsupportedSchema {
        path: PathBuf,
        found: u32,
        supported: u32,
    },

    #[error("Failed to write {}: {message}", path.display())]
    Write { path: PathBuf, message: String },
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_file() {
        let err = StoreError::io("/tmp/tasks.json", std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert_eq!(err.to_string(), "I/O error on /tmp/tasks.json: boom");

        let err = StoreError::UnsupportedSchema {
            path: PathBuf::from("tasks.json"),
            found: 9,
            supported: 1,
        };
        assert!(err.to_string().contains("version 9"));
    }
}
