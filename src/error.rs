//! Error taxonomy shared by the reader, the report registry and the CLI.

use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort report generation.
///
/// Malformed individual records are not represented here: reports drop
/// them while aggregating and never surface them.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Файл {} не существует", .path.display())]
    MissingInput { path: PathBuf },

    #[error("Неизвестный тип отчета: {name} (доступные: {})", .available.join(", "))]
    UnknownReport { name: String, available: Vec<String> },

    #[error("{}: {message}", .path.display())]
    InvalidData { path: PathBuf, message: String },

    #[error("{}: {message}", .path.display())]
    Malformed { path: PathBuf, message: String },
}

/// The class of message a [`ReportError`] is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    MissingFile,
    Data,
    Processing,
}

impl ReportError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ReportError::MissingInput { .. } => ErrorClass::MissingFile,
            ReportError::UnknownReport { .. } | ReportError::InvalidData { .. } => {
                ErrorClass::Data
            }
            ReportError::Malformed { .. } => ErrorClass::Processing,
        }
    }
}

impl ErrorClass {
    /// User-facing prefix printed before the error detail.
    pub fn prefix(self) -> &'static str {
        match self {
            ErrorClass::MissingFile => "Ошибка: Файл не найден - ",
            ErrorClass::Data => "Ошибка в данных: ",
            ErrorClass::Processing => "Ошибка при обработке данных: ",
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
