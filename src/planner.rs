use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use tracing::debug;

use crate::error::NoRouteError;
use crate::network::{Cost, LineId, Network, StationId};
use crate::route::{Leg, Route};

pub const DEFAULT_TRANSFER_PENALTY: Cost = 5;

/// A search node: a station together with the line used to arrive there.
/// The line matters because leaving on a different line costs the penalty.
type Node = (StationId, Option<LineId>);

#[derive(Clone, Copy, PartialEq, Eq)]
struct State {
    cost: Cost,
    transfers: u32,
    seq: u64,
    station: StationId,
    line: Option<LineId>,
}

// The priority queue depends on `Ord`. Flipped so the max-heap pops the
// cheapest state; equal costs fall back to fewer transfers, then to the
// state discovered first under the pinned neighbor order.
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.transfers.cmp(&self.transfers))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compute the cheapest route from `start` to `end`.
///
/// Dijkstra over (station, arriving line) nodes; each relaxed segment costs
/// its own travel cost plus `transfer_penalty` when its line differs from the
/// line in use. Boarding at the start is free of penalty. Every node is
/// finalized at most once, so the search is bounded by stations times lines.
///
/// A query with `start == end` is treated as a legitimate degenerate trip and
/// returns an empty route with cost 0 rather than an error.
pub fn plan(
    network: &Network,
    start: StationId,
    end: StationId,
    transfer_penalty: Cost,
) -> Result<Route, NoRouteError> {
    if start == end {
        return Ok(Route::empty());
    }

    let mut dist: HashMap<Node, (Cost, u32)> = HashMap::new();
    let mut prev: HashMap<Node, (Node, Leg)> = HashMap::new();
    let mut heap = BinaryHeap::new();
    let mut seq: u64 = 0;

    dist.insert((start, None), (0, 0));
    heap.push(State {
        cost: 0,
        transfers: 0,
        seq,
        station: start,
        line: None,
    });

    let mut settled: u64 = 0;
    while let Some(state) = heap.pop() {
        let node = (state.station, state.line);
        if let Some(&best) = dist.get(&node) {
            if best < (state.cost, state.transfers) {
                continue;
            }
        }
        settled += 1;

        if state.station == end {
            debug!(settled, cost = state.cost, "route search finished");
            return Ok(reconstruct(&prev, node, state.cost, state.transfers));
        }

        for segment in network.neighbors(state.station) {
            let transfer = state.line.is_some_and(|line| line != segment.line);
            let next_cost =
                state.cost + segment.cost + if transfer { transfer_penalty } else { 0 };
            let next_transfers = state.transfers + u32::from(transfer);
            let next: Node = (segment.to, Some(segment.line));

            let improved = match dist.get(&next) {
                None => true,
                Some(&best) => (next_cost, next_transfers) < best,
            };
            if improved {
                dist.insert(next, (next_cost, next_transfers));
                prev.insert(
                    next,
                    (
                        node,
                        Leg {
                            from: state.station,
                            to: segment.to,
                            line: segment.line,
                            cost: segment.cost,
                        },
                    ),
                );
                seq += 1;
                heap.push(State {
                    cost: next_cost,
                    transfers: next_transfers,
                    seq,
                    station: segment.to,
                    line: Some(segment.line),
                });
            }
        }
    }

    debug!(settled, "route search exhausted");
    Err(NoRouteError {
        from: network.station(start).name.clone(),
        to: network.station(end).name.clone(),
    })
}

fn reconstruct(
    prev: &HashMap<Node, (Node, Leg)>,
    mut node: Node,
    total_cost: Cost,
    transfers: u32,
) -> Route {
    let mut legs = Vec::new();
    while let Some(&(parent, leg)) = prev.get(&node) {
        legs.push(leg);
        node = parent;
    }
    legs.reverse();
    Route {
        legs,
        total_cost,
        transfers,
    }
}
