//! Graphviz DOT rendering of the enumerated state graph.

use std::io::{self, Write};

use crate::puzzle::{Direction, Puzzle};
use crate::traversal::GraphSink;

/// Conventional graph name for a board of the given edge length.
pub fn default_graph_name(size: usize) -> String {
    match size {
        2 => "ThreePuzzle".to_string(),
        3 => "EightPuzzle".to_string(),
        4 => "FifteenPuzzle".to_string(),
        5 => "TwentyFourPuzzle".to_string(),
        n => format!("Puzzle{}", n * n - 1),
    }
}

/// Record-shaped node whose label lays the tiles out row by row.
pub fn render_node(state: &Puzzle) -> String {
    let label = state
        .rows()
        .map(|row| {
            let cells: Vec<String> = row.iter().map(u32::to_string).collect();
            format!("{{{}}}", cells.join("|"))
        })
        .collect::<Vec<_>>()
        .join("|");
    format!("{} [shape=record,label=\"{}\"];", state.node_id(), label)
}

pub fn render_edge(parent: &Puzzle, child: &Puzzle, direction: Option<Direction>) -> String {
    match direction {
        Some(direction) => format!(
            "{} -> {} [label=\"{}\"];",
            parent.node_id(),
            child.node_id(),
            direction
        ),
        None => format!("{} -> {};", parent.node_id(), child.node_id()),
    }
}

/// Streams a `digraph` to `out`. The closing brace is only written by
/// [`DotWriter::finish`], so an aborted run leaves the graph unterminated.
pub struct DotWriter<W: Write> {
    out: W,
    edge_labels: bool,
}

impl<W: Write> DotWriter<W> {
    pub fn begin(mut out: W, name: &str, edge_labels: bool) -> io::Result<Self> {
        writeln!(out, "digraph {} {{", name)?;
        Ok(Self { out, edge_labels })
    }

    pub fn finish(mut self) -> io::Result<W> {
        writeln!(self.out, "}}")?;
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> GraphSink for DotWriter<W> {
    fn node(&mut self, state: &Puzzle, _depth: usize) -> io::Result<()> {
        writeln!(self.out, "{}", render_node(state))
    }

    fn edge(&mut self, parent: &Puzzle, child: &Puzzle, direction: Direction) -> io::Result<()> {
        let label = self.edge_labels.then_some(direction);
        writeln!(self.out, "{}", render_edge(parent, child, label))
    }
}
