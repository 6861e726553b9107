//! Input sources for invoice text
//!
//! An input is either a file path or standard input (`-`). Both a blocking
//! read for the sync strategy and a tokio read for the async strategy are
//! provided; they map errors the same way.

use crate::types::ImportError;
use std::io::Read;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

/// Where a submission's text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// Interpret a command-line argument; `-` means standard input
    pub fn from_arg(arg: &Path) -> Self {
        if arg == Path::new("-") {
            InputSource::Stdin
        } else {
            InputSource::File(arg.to_path_buf())
        }
    }

    /// Label used in reports and error messages
    pub fn label(&self) -> String {
        match self {
            InputSource::Stdin => "<stdin>".to_string(),
            InputSource::File(path) => path.display().to_string(),
        }
    }

    /// Read the whole input, blocking
    pub fn read_to_string(&self) -> Result<String, ImportError> {
        match self {
            InputSource::Stdin => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                Ok(text)
            }
            InputSource::File(path) => {
                std::fs::read_to_string(path).map_err(|e| self.map_read_error(e))
            }
        }
    }

    /// Read the whole input on the tokio runtime
    pub async fn read_to_string_async(&self) -> Result<String, ImportError> {
        match self {
            InputSource::Stdin => {
                let mut text = String::new();
                tokio::io::stdin().read_to_string(&mut text).await?;
                Ok(text)
            }
            InputSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| self.map_read_error(e)),
        }
    }

    fn map_read_error(&self, error: std::io::Error) -> ImportError {
        if error.kind() == std::io::ErrorKind::NotFound {
            ImportError::file_not_found(&self.label())
        } else {
            ImportError::Io {
                message: format!("Failed to read '{}': {}", self.label(), error),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[rstest]
    #[case::dash("-", InputSource::Stdin)]
    #[case::file("fatura.txt", InputSource::File(PathBuf::from("fatura.txt")))]
    #[case::nested("dir/-", InputSource::File(PathBuf::from("dir/-")))]
    fn test_from_arg(#[case] arg: &str, #[case] expected: InputSource) {
        assert_eq!(InputSource::from_arg(Path::new(arg)), expected);
    }

    #[test]
    fn test_label() {
        assert_eq!(InputSource::Stdin.label(), "<stdin>");
        assert_eq!(
            InputSource::File(PathBuf::from("a/fatura.txt")).label(),
            "a/fatura.txt"
        );
    }

    #[test]
    fn test_read_file() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all("25/09/2025 - UBER TRIP - R$ 12,00\n".as_bytes())
            .expect("Failed to write to temp file");

        let source = InputSource::File(file.path().to_path_buf());
        assert_eq!(
            source.read_to_string().unwrap(),
            "25/09/2025 - UBER TRIP - R$ 12,00\n"
        );
    }

    #[test]
    fn test_missing_file_is_file_not_found() {
        let source = InputSource::File(PathBuf::from("nonexistent.txt"));
        assert_eq!(
            source.read_to_string(),
            Err(ImportError::file_not_found("nonexistent.txt"))
        );
    }

    #[tokio::test]
    async fn test_async_read_matches_sync_read() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all("linha 1\nlinha 2\n".as_bytes())
            .expect("Failed to write to temp file");

        let source = InputSource::File(file.path().to_path_buf());
        assert_eq!(
            source.read_to_string_async().await.unwrap(),
            source.read_to_string().unwrap()
        );
    }

    #[tokio::test]
    async fn test_async_missing_file_is_file_not_found() {
        let source = InputSource::File(PathBuf::from("nonexistent.txt"));
        assert_eq!(
            source.read_to_string_async().await,
            Err(ImportError::file_not_found("nonexistent.txt"))
        );
    }
}
