// File uploads for multipart requests

use reqwest::multipart::{Form, Part};
use std::path::Path;

use crate::error::{PortalError, Result};

/// A file ready to be sent as a multipart part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: String,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string();
        Self {
            file_name,
            bytes,
            mime,
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| PortalError::validation(format!("invalid file name: {}", path.display())))?;
        Ok(Self::new(file_name, bytes))
    }

    pub(crate) fn into_part(self) -> Result<Part> {
        Ok(Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime)?)
    }
}

/// Reject blank required text fields before anything is sent
pub(crate) fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PortalError::validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Form with a single `file` part
pub(crate) fn file_form(file: FileUpload) -> Result<Form> {
    Ok(Form::new().part("file", file.into_part()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_guess() {
        assert_eq!(
            FileUpload::new("marks.XLSX", vec![]).mime,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(FileUpload::new("notice.pdf", vec![]).mime, "application/pdf");
        assert_eq!(FileUpload::new("notes.txt", vec![]).mime, "text/plain");
        assert_eq!(FileUpload::new("photo.webp", vec![]).mime, "image/webp");
        assert_eq!(FileUpload::new("scan.tiff", vec![]).mime, "image/tiff");
        assert_eq!(
            FileUpload::new("sheet.ods", vec![]).mime,
            "application/vnd.oasis.opendocument.spreadsheet"
        );
        assert_eq!(
            FileUpload::new("README", vec![]).mime,
            "application/octet-stream"
        );
    }

    #[test]
    fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.csv");
        std::fs::write(&path, "email,role\n").unwrap();

        let upload = FileUpload::from_path(&path).unwrap();
        assert_eq!(upload.file_name, "users.csv");
        assert_eq!(upload.mime, "text/csv");
        assert_eq!(upload.bytes, b"email,role\n");
    }

    #[test]
    fn test_from_missing_path_is_io_error() {
        let err = FileUpload::from_path("/definitely/not/here.pdf").unwrap_err();
        assert!(matches!(err, PortalError::Io(_)));
    }

    #[test]
    fn test_require() {
        assert!(require("title", "Timetable").is_ok());
        assert!(matches!(require("title", "  "), Err(PortalError::Validation(_))));
    }
}
