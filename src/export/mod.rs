//! File Exports
//!
//! Turns in-memory session data into downloadable bytes:
//! todo list → `.txt`, expenses → `.xlsx`, cleaned notes → `.pdf`.

pub mod pdf;
pub mod text;
pub mod xlsx;

use axum::http::header;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
pub const XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const PDF: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("spreadsheet encoding failed: {0}")]
    Spreadsheet(String),

    #[error("PDF encoding failed: {0}")]
    Pdf(String),

    #[error("I/O error while exporting: {0}")]
    Io(#[from] std::io::Error),
}

/// Encoded file ready to be sent as an attachment
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    pub fn text(file_name: &'static str, bytes: Vec<u8>) -> Self {
        Self {
            file_name,
            content_type: TEXT_PLAIN,
            bytes,
        }
    }

    pub fn xlsx(file_name: &'static str, bytes: Vec<u8>) -> Self {
        Self {
            file_name,
            content_type: XLSX,
            bytes,
        }
    }

    pub fn pdf(file_name: &'static str, bytes: Vec<u8>) -> Self {
        Self {
            file_name,
            content_type: PDF,
            bytes,
        }
    }
}

impl IntoResponse for ExportFile {
    fn into_response(self) -> Response {
        tracing::info!(
            "Exporting {} ({} bytes)",
            self.file_name,
            self.bytes.len()
        );
        (
            [
                (header::CONTENT_TYPE, self.content_type.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", self.file_name),
                ),
            ],
            self.bytes,
        )
            .into_response()
    }
}
