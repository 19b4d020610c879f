use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::PuzzleError;
use crate::puzzle::Puzzle;

#[derive(Debug, Parser)]
#[command(name = "slider-puzzle-graph")]
#[command(about = "Enumerate every reachable sliding-puzzle board as a Graphviz digraph")]
#[command(version)]
pub struct Cli {
    /// Board edge length; the start is the solved layout
    #[arg(long, default_value_t = 3)]
    pub size: usize,

    /// Explicit start board, row-major, 0 for the blank (e.g. 1,2,3,4,5,6,7,8,0)
    #[arg(long, value_delimiter = ',', conflicts_with_all = ["size", "shuffle"])]
    pub board: Option<Vec<u32>>,

    /// Start from a random board in the solved layout's class
    #[arg(long)]
    pub shuffle: bool,

    /// Seed for --shuffle
    #[arg(long, requires = "shuffle")]
    pub seed: Option<u64>,

    /// Graph name in the digraph header
    #[arg(long)]
    pub name: Option<String>,

    /// Write the graph here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Label each edge with the direction the blank moved
    #[arg(long)]
    pub edge_labels: bool,

    /// Abort once this many boards have been emitted
    #[arg(long)]
    pub max_nodes: Option<usize>,

    /// Keep every generated successor in the queue
    #[arg(long)]
    pub no_prune: bool,

    /// Suppress the progress counter
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn start(&self) -> Result<Puzzle, PuzzleError> {
        if let Some(tiles) = &self.board {
            return Puzzle::from_tiles(tiles.clone());
        }
        if self.shuffle {
            let mut rng = match self.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            return Puzzle::shuffled(self.size, &mut rng);
        }
        Puzzle::new(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("slider-puzzle-graph").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn no_flags_gives_the_eight_puzzle() {
        let cli = parse(&[]);
        assert_eq!(cli.start().unwrap(), Puzzle::default());
        assert!(!cli.no_prune);
    }

    #[test]
    fn explicit_board_is_validated() {
        let cli = parse(&["--board", "1,2,3,0"]);
        assert_eq!(cli.start().unwrap().size(), 2);

        let cli = parse(&["--board", "1,2,0"]);
        assert_eq!(cli.start(), Err(PuzzleError::DimensionMismatch { len: 3 }));

        let cli = parse(&["--board", "1,1,2,0"]);
        assert!(matches!(cli.start(), Err(PuzzleError::InvariantViolation { .. })));
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let a = parse(&["--size", "4", "--shuffle", "--seed", "42"]).start().unwrap();
        let b = parse(&["--size", "4", "--shuffle", "--seed", "42"]).start().unwrap();
        assert_eq!(a, b);
        assert!(a.is_solvable().unwrap());
    }

    #[test]
    fn board_conflicts_with_shuffle() {
        let result = Cli::try_parse_from(["slider-puzzle-graph", "--board", "1,2,3,0", "--shuffle"]);
        assert!(result.is_err());
    }
}
