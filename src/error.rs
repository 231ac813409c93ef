use polars::prelude::PolarsError;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum TimetableError {
    InvalidInput(String),
    InvalidRange(String),
    EmptyResult,
    UnsupportedFormat(String),
    Io(io::Error),
    XlsxRead(calamine::XlsxError),
    XlsxWrite(rust_xlsxwriter::XlsxError),
    Csv(csv::Error),
    Zip(zip::result::ZipError),
    DataFrame(PolarsError),
}

impl TimetableError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_range(message: impl Into<String>) -> Self {
        Self::InvalidRange(message.into())
    }

    /// Stable identifier for the error kind, used in API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            TimetableError::InvalidInput(_) => "invalid_input",
            TimetableError::InvalidRange(_) => "invalid_range",
            TimetableError::EmptyResult => "empty_result",
            TimetableError::UnsupportedFormat(_) => "unsupported_format",
            TimetableError::Io(_) => "io_error",
            TimetableError::XlsxRead(_) => "invalid_input",
            TimetableError::XlsxWrite(_) => "write_error",
            TimetableError::Csv(_) => "invalid_input",
            TimetableError::Zip(_) => "archive_error",
            TimetableError::DataFrame(_) => "dataframe_error",
        }
    }

    /// True for failures caused by the uploaded data rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            TimetableError::InvalidInput(_)
                | TimetableError::InvalidRange(_)
                | TimetableError::EmptyResult
                | TimetableError::UnsupportedFormat(_)
                | TimetableError::XlsxRead(_)
                | TimetableError::Csv(_)
        )
    }
}

impl fmt::Display for TimetableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimetableError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            TimetableError::InvalidRange(msg) => write!(f, "invalid range: {msg}"),
            TimetableError::EmptyResult => write!(f, "expansion produced no rows"),
            TimetableError::UnsupportedFormat(name) => {
                write!(f, "unsupported file format: {name} (expected .xlsx or .csv)")
            }
            TimetableError::Io(err) => write!(f, "io error: {err}"),
            TimetableError::XlsxRead(err) => write!(f, "xlsx read error: {err}"),
            TimetableError::XlsxWrite(err) => write!(f, "xlsx write error: {err}"),
            TimetableError::Csv(err) => write!(f, "csv error: {err}"),
            TimetableError::Zip(err) => write!(f, "archive error: {err}"),
            TimetableError::DataFrame(err) => write!(f, "dataframe conversion error: {err}"),
        }
    }
}

impl std::error::Error for TimetableError {}

impl From<io::Error> for TimetableError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<calamine::XlsxError> for TimetableError {
    fn from(value: calamine::XlsxError) -> Self {
        Self::XlsxRead(value)
    }
}

impl From<rust_xlsxwriter::XlsxError> for TimetableError {
    fn from(value: rust_xlsxwriter::XlsxError) -> Self {
        Self::XlsxWrite(value)
    }
}

impl From<csv::Error> for TimetableError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<zip::result::ZipError> for TimetableError {
    fn from(value: zip::result::ZipError) -> Self {
        Self::Zip(value)
    }
}

impl From<PolarsError> for TimetableError {
    fn from(value: PolarsError) -> Self {
        Self::DataFrame(value)
    }
}

pub type TimetableResult<T> = Result<T, TimetableError>;
