use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error{}: {kind}", line_suffix(line))]
    Parse {
        line: Option<usize>,
        kind: ReportParseErrorKind,
    },
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(l) => format!(" on line {}", l),
        None => String::new(),
    }
}

impl ReportError {
    pub(crate) fn at_line(line: usize, kind: ReportParseErrorKind) -> Self {
        ReportError::Parse {
            line: Some(line),
            kind,
        }
    }

    pub(crate) fn structural(kind: ReportParseErrorKind) -> Self {
        ReportError::Parse { line: None, kind }
    }

    pub fn kind(&self) -> Option<&ReportParseErrorKind> {
        match self {
            ReportError::Parse { kind, .. } => Some(kind),
            ReportError::Io(_) => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ReportParseErrorKind {
    #[error("Marker '{0}' not found before end of report")]
    MissingMarker(&'static str),
    #[error("No data line found {0}")]
    MissingDataLine(&'static str),
    #[error("Expected {expected} values but found {found}")]
    TermCountMismatch { expected: usize, found: usize },
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),
}
