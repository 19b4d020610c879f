//! Breadth-first enumeration of every configuration reachable from a start
//! board, reporting each node and each undirected move exactly once.

use std::collections::{HashSet, VecDeque};
use std::io;
use std::rc::Rc;

use tracing::{debug, instrument};

use crate::error::TraversalError;
use crate::moves::legal_moves;
use crate::puzzle::{Direction, Puzzle, StateKey};

/// Receives the graph as it is discovered.
pub trait GraphSink {
    /// First visit of `state`, `depth` moves from the start.
    fn node(&mut self, state: &Puzzle, depth: usize) -> io::Result<()>;

    /// First sighting of the move between `parent` and `child` in either
    /// direction.
    fn edge(&mut self, parent: &Puzzle, child: &Puzzle, direction: Direction) -> io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct TraversalConfig {
    /// Drop successors that are already visited and whose edge is already
    /// recorded; they would do nothing once dequeued.
    pub prune_settled: bool,
    /// Abort once more than this many nodes would be emitted.
    pub node_limit: Option<usize>,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            prune_settled: true,
            node_limit: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalStats {
    pub nodes: usize,
    pub edges: usize,
    pub max_depth: usize,
    pub peak_frontier: usize,
    /// Successors skipped by `prune_settled`.
    pub pruned: usize,
}

/// A frontier entry. `origin` is absent only for the start board.
struct Pending {
    state: Rc<Puzzle>,
    origin: Option<(Direction, Rc<Puzzle>)>,
    depth: usize,
}

fn edge_key(a: StateKey, b: StateKey) -> (StateKey, StateKey) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Walks the state graph from `start`, feeding `sink` in BFS order.
///
/// Nodes are emitted in non-decreasing distance from `start`. The edge of a
/// dequeued entry is considered even when its target was visited earlier,
/// which is how moves between two already-known boards are found.
#[instrument(skip_all, fields(size = start.size()))]
pub fn traverse<S: GraphSink>(
    start: Puzzle,
    config: &TraversalConfig,
    sink: &mut S,
) -> Result<TraversalStats, TraversalError> {
    let mut visited: HashSet<StateKey> = HashSet::new();
    let mut recorded: HashSet<(StateKey, StateKey)> = HashSet::new();
    let mut stats = TraversalStats::default();

    let mut frontier: VecDeque<Pending> = VecDeque::new();
    frontier.push_back(Pending {
        state: Rc::new(start),
        origin: None,
        depth: 0,
    });

    while let Some(pending) = frontier.pop_front() {
        let key = pending.state.key();

        // Claimed before expansion so the step straight back to `parent`
        // is already settled when the successors are generated.
        let new_edge = match &pending.origin {
            Some((direction, parent)) if recorded.insert(edge_key(parent.key(), key)) => {
                Some((*direction, Rc::clone(parent)))
            }
            _ => None,
        };

        if !visited.contains(&key) {
            if let Some(limit) = config.node_limit {
                if stats.nodes >= limit {
                    return Err(TraversalError::NodeLimitExceeded { limit });
                }
            }

            sink.node(&pending.state, pending.depth)?;
            visited.insert(key);
            stats.nodes += 1;
            stats.max_depth = stats.max_depth.max(pending.depth);

            for mv in legal_moves(&pending.state)? {
                if config.prune_settled {
                    let child = mv.state.key();
                    if visited.contains(&child) && recorded.contains(&edge_key(key, child)) {
                        stats.pruned += 1;
                        continue;
                    }
                }
                frontier.push_back(Pending {
                    state: mv.state,
                    origin: Some((mv.direction, mv.parent)),
                    depth: pending.depth + 1,
                });
            }
            stats.peak_frontier = stats.peak_frontier.max(frontier.len());
        }

        if let Some((direction, parent)) = new_edge {
            sink.edge(&parent, &pending.state, direction)?;
            stats.edges += 1;
        }
    }

    debug!(?stats, "frontier exhausted");
    Ok(stats)
}
