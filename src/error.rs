use std::path::PathBuf;

use thiserror::Error;

/// The dataset could not be loaded or is internally inconsistent.
///
/// These are unrecoverable: the caller must abort before any planning.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to read dataset {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse dataset {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("duplicate station id {0:?}")]
    DuplicateStation(String),

    #[error("duplicate line id {0:?}")]
    DuplicateLine(String),

    #[error("line {line:?} references unknown station {station:?}")]
    UnknownStation { line: String, station: String },

    #[error("line {0:?} must serve at least two stations")]
    ShortLine(String),

    #[error("line {line:?} lists station {station:?} twice in a row")]
    RepeatedStation { line: String, station: String },

    #[error("line {line:?} declares {costs} segment costs for {segments} segments")]
    CostMismatch {
        line: String,
        costs: usize,
        segments: usize,
    },
}

/// No station name scored above the similarity threshold for a query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no station matches {query:?}")]
pub struct NoMatchError {
    pub query: String,
}

/// Start and end stations lie in disconnected components.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no route exists between {from:?} and {to:?}")]
pub struct NoRouteError {
    pub from: String,
    pub to: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DatasetError::UnknownStation {
            line: "7".into(),
            station: "atlantis".into(),
        };
        assert_eq!(
            err.to_string(),
            "line \"7\" references unknown station \"atlantis\""
        );

        let err = DatasetError::CostMismatch {
            line: "A".into(),
            costs: 3,
            segments: 2,
        };
        assert_eq!(
            err.to_string(),
            "line \"A\" declares 3 segment costs for 2 segments"
        );

        let err = NoMatchError {
            query: "Xyzzy123".into(),
        };
        assert_eq!(err.to_string(), "no station matches \"Xyzzy123\"");

        let err = NoRouteError {
            from: "Times Square".into(),
            to: "Far Rockaway".into(),
        };
        assert_eq!(
            err.to_string(),
            "no route exists between \"Times Square\" and \"Far Rockaway\""
        );
    }
}
