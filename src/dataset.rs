use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::DatasetError;
use crate::network::Cost;

#[derive(Deserialize, Debug)]
pub struct StationRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub position: Option<[f64; 2]>,
}

#[derive(Deserialize, Debug)]
pub struct LineRecord {
    pub id: String,
    pub stations: Vec<String>,
    /// One cost per consecutive station pair. Absent means unit cost per segment.
    #[serde(default)]
    pub costs: Option<Vec<Cost>>,
}

/// Raw dataset as deserialized from the line file, before validation.
///
/// The order of `stations` and `lines` is the declared order that all
/// downstream iteration is pinned to.
#[derive(Deserialize, Debug)]
pub struct Dataset {
    pub stations: Vec<StationRecord>,
    pub lines: Vec<LineRecord>,
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let contents = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| DatasetError::Parse {
            path: path.to_owned(),
            source,
        })
    }
}
