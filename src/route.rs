use itertools::Itertools;

use crate::network::{Cost, LineId, Network, StationId};

/// One ridden segment of a planned route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leg {
    pub from: StationId,
    pub to: StationId,
    pub line: LineId,
    pub cost: Cost,
}

/// A planned trip from start to end. Immutable once returned by the planner;
/// `total_cost` includes transfer penalties, leg costs do not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub legs: Vec<Leg>,
    pub total_cost: Cost,
    pub transfers: u32,
}

impl Route {
    pub fn empty() -> Self {
        Self {
            legs: Vec::new(),
            total_cost: 0,
            transfers: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }
}

/// Render a route as board/ride/transfer instructions, one per element.
///
/// Consecutive legs on the same line collapse into a single ride. Consumes
/// only the route itself; the search is never re-run here.
pub fn steps(network: &Network, route: &Route) -> Vec<String> {
    let mut lines = Vec::new();
    let grouped = route.legs.iter().chunk_by(|leg| leg.line);
    for (i, (line, group)) in (&grouped).into_iter().enumerate() {
        let legs: Vec<&Leg> = group.collect();
        let boarding = network.station(legs[0].from);
        let line_name = &network.line(line).id;
        if i == 0 {
            lines.push(format!("Board line {} at {}", line_name, boarding.name));
        } else {
            lines.push(format!("Transfer to line {} at {}", line_name, boarding.name));
        }
        let last = legs[legs.len() - 1];
        lines.push(format!(
            "Ride {} {} to {}",
            legs.len(),
            if legs.len() == 1 { "stop" } else { "stops" },
            network.station(last.to).name
        ));
    }
    lines
}

/// One-line totals for the end of the printed route.
pub fn summary(route: &Route) -> String {
    format!(
        "Total cost: {} ({} {}, {} {})",
        route.total_cost,
        route.legs.len(),
        if route.legs.len() == 1 { "stop" } else { "stops" },
        route.transfers,
        if route.transfers == 1 {
            "transfer"
        } else {
            "transfers"
        },
    )
}
