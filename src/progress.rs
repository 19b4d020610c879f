//! Running count of visited boards on stderr.
//!
//! On a terminal the count is redrawn in place with crossterm; otherwise it
//! is logged every `every` nodes so redirected stderr stays readable.

use std::io::{self, Stderr, Write};

use crossterm::cursor::MoveToColumn;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use crossterm::tty::IsTty;
use crossterm::execute;
use tracing::info;

use crate::puzzle::{Direction, Puzzle};
use crate::traversal::GraphSink;

pub struct ProgressSink<S> {
    inner: S,
    nodes: usize,
    every: usize,
    terminal: Option<Stderr>,
}

impl<S: GraphSink> ProgressSink<S> {
    pub fn new(inner: S, every: usize) -> Self {
        let stderr = io::stderr();
        let terminal = stderr.is_tty().then_some(stderr);
        Self {
            inner,
            nodes: 0,
            every: every.max(1),
            terminal,
        }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Prints the final count and the completion marker.
    pub fn finish(&mut self) -> io::Result<()> {
        match self.terminal.as_mut() {
            Some(stderr) => execute!(
                stderr,
                MoveToColumn(0),
                Clear(ClearType::CurrentLine),
                Print(format!("{} nodes\nFinished!\n", self.nodes))
            ),
            None => {
                info!(nodes = self.nodes, "Finished!");
                Ok(())
            }
        }
    }

    fn report(&mut self) -> io::Result<()> {
        match self.terminal.as_mut() {
            Some(stderr) => execute!(
                stderr,
                MoveToColumn(0),
                Clear(ClearType::CurrentLine),
                Print(format!("{} nodes", self.nodes))
            ),
            None => {
                info!(nodes = self.nodes, "progress");
                Ok(())
            }
        }
    }
}

impl<S: GraphSink> GraphSink for ProgressSink<S> {
    fn node(&mut self, state: &Puzzle, depth: usize) -> io::Result<()> {
        self.inner.node(state, depth)?;
        self.nodes += 1;
        if self.nodes % self.every == 0 {
            self.report()?;
        }
        Ok(())
    }

    fn edge(&mut self, parent: &Puzzle, child: &Puzzle, direction: Direction) -> io::Result<()> {
        self.inner.edge(parent, child, direction)
    }
}
