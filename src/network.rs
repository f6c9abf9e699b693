use std::collections::HashMap;

use crate::dataset::Dataset;
use crate::error::DatasetError;

pub type Cost = u32;

/// Index of a station in the dataset's declared order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(pub usize);

/// Index of a line in the dataset's declared order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub usize);

#[derive(Debug)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub position: Option<[f64; 2]>,
    /// Lines serving this station, in first-seen declared order.
    pub lines: Vec<LineId>,
}

#[derive(Debug)]
pub struct Line {
    pub id: String,
    pub stations: Vec<StationId>,
}

/// An undirected connection between two consecutive stations on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub to: StationId,
    pub line: LineId,
    pub cost: Cost,
}

/// Immutable station graph, built once per run.
///
/// Adjacency lists keep segments in the dataset's declared line order, so
/// neighbor iteration is deterministic across runs.
#[derive(Debug)]
pub struct Network {
    stations: Vec<Station>,
    lines: Vec<Line>,
    adjacency: Vec<Vec<Segment>>,
    ids: HashMap<String, StationId>,
}

impl Network {
    /// Validate the dataset and build the graph in a single pass: register
    /// all stations, then connect each line's consecutive stations with a
    /// segment in both directions. Missing per-segment costs default to 1.
    pub fn build(dataset: Dataset) -> Result<Self, DatasetError> {
        let mut stations = Vec::with_capacity(dataset.stations.len());
        let mut ids = HashMap::with_capacity(dataset.stations.len());

        for record in dataset.stations {
            let station_id = StationId(stations.len());
            if ids.insert(record.id.clone(), station_id).is_some() {
                return Err(DatasetError::DuplicateStation(record.id));
            }
            stations.push(Station {
                id: record.id,
                name: record.name,
                position: record.position,
                lines: Vec::new(),
            });
        }

        let mut adjacency = vec![Vec::new(); stations.len()];
        let mut lines: Vec<Line> = Vec::with_capacity(dataset.lines.len());

        for record in dataset.lines {
            if lines.iter().any(|line| line.id == record.id) {
                return Err(DatasetError::DuplicateLine(record.id));
            }
            if record.stations.len() < 2 {
                return Err(DatasetError::ShortLine(record.id));
            }

            let line_id = LineId(lines.len());
            let mut resolved = Vec::with_capacity(record.stations.len());
            for station in &record.stations {
                let station_id =
                    *ids.get(station)
                        .ok_or_else(|| DatasetError::UnknownStation {
                            line: record.id.clone(),
                            station: station.clone(),
                        })?;
                resolved.push(station_id);
                let memberships = &mut stations[station_id.0].lines;
                if !memberships.contains(&line_id) {
                    memberships.push(line_id);
                }
            }

            let segments = resolved.len() - 1;
            if let Some(costs) = &record.costs {
                if costs.len() != segments {
                    return Err(DatasetError::CostMismatch {
                        line: record.id,
                        costs: costs.len(),
                        segments,
                    });
                }
            }

            for (i, pair) in resolved.windows(2).enumerate() {
                let (from, to) = (pair[0], pair[1]);
                if from == to {
                    return Err(DatasetError::RepeatedStation {
                        line: record.id,
                        station: stations[from.0].id.clone(),
                    });
                }
                let cost = record.costs.as_ref().map_or(1, |costs| costs[i]);
                adjacency[from.0].push(Segment {
                    to,
                    line: line_id,
                    cost,
                });
                adjacency[to.0].push(Segment {
                    to: from,
                    line: line_id,
                    cost,
                });
            }

            lines.push(Line {
                id: record.id,
                stations: resolved,
            });
        }

        Ok(Self {
            stations,
            lines,
            adjacency,
            ids,
        })
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn station(&self, id: StationId) -> &Station {
        &self.stations[id.0]
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, id: LineId) -> &Line {
        &self.lines[id.0]
    }

    pub fn lines_through(&self, station: StationId) -> &[LineId] {
        &self.stations[station.0].lines
    }

    /// Segments leaving `station`, in the dataset's declared order.
    pub fn neighbors(&self, station: StationId) -> &[Segment] {
        &self.adjacency[station.0]
    }

    pub fn station_by_id(&self, id: &str) -> Option<StationId> {
        self.ids.get(id).copied()
    }
}
