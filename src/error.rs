//! Error enum
use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Csv(csv::Error),
    Serde(serde_json::Error),
    UnknownLang(String),
    /// Invalid run configuration, raised before any processing starts.
    Config(String),
    /// An expected extracted file is absent. Extraction has to be re-run.
    MissingInput(PathBuf),
    /// Line-aligned files do not have the same number of lines.
    Alignment {
        left: PathBuf,
        right: PathBuf,
        left_lines: usize,
        right_lines: usize,
    },
    Custom(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Csv(e) => write!(f, "tsv error: {}", e),
            Error::Serde(e) => write!(f, "json error: {}", e),
            Error::UnknownLang(l) => write!(f, "unknown language: {:?}", l),
            Error::Config(msg) => write!(f, "invalid configuration: {}", msg),
            Error::MissingInput(p) => write!(
                f,
                "missing input file {:?} (re-run extraction before processing)",
                p
            ),
            Error::Alignment {
                left,
                right,
                left_lines,
                right_lines,
            } => write!(
                f,
                "unaligned files: {:?} has {} lines, {:?} has {} lines",
                left, left_lines, right, right_lines
            ),
            Error::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Csv(e) => Some(e),
            Error::Serde(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Error {
        Error::Csv(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}
